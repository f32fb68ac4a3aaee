//! Core library for the parentview-convert command line application.
//!
//! The library exposes the batch orchestration that powers the command-line
//! interface as well as the integration tests. Responsibilities are kept
//! narrow: file adapters live under [`parentview::convert::io`], the tabular
//! representation inside [`parentview::convert::model`], row filtering in
//! [`parentview::convert::filter`], console progress in
//! [`parentview::convert::report`], and the batch loop under
//! [`parentview::convert::batch`].

pub mod parentview;

pub use parentview::convert::{ConvertError, Result, batch, error, filter, io, model, report};
