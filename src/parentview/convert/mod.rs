pub mod batch;
pub mod error;
pub mod filter;
pub mod io;
pub mod model;
pub mod report;

pub use error::{ConvertError, Result};
