use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use parentview_convert::batch::{self, BatchConfig};
use parentview_convert::report::Console;
use parentview_convert::{ConvertError, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT_DIR: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/raw/ofsted-parentview-data"
);

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose)?;
    let config = cli.into_config();
    let mut console = Console::new(io::stdout().lock());
    batch::run(&config, &mut console)?;
    Ok(())
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| ConvertError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert Ofsted Parent View workbooks into filtered CSV files."
)]
struct Cli {
    /// Directory holding the Parent View workbooks.
    #[arg(long, env = "PARENTVIEW_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory for the CSV files. Defaults to `converted-csv` inside the input directory.
    #[arg(long, env = "PARENTVIEW_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// File name glob selecting the workbooks.
    #[arg(long, env = "PARENTVIEW_PATTERN", default_value = batch::INPUT_PATTERN)]
    pattern: String,

    /// Number of most recently modified workbooks to convert.
    #[arg(long, env = "PARENTVIEW_LIMIT", default_value_t = batch::DEFAULT_LIMIT)]
    limit: usize,

    /// Worksheet holding the school rows.
    #[arg(long, default_value = batch::SCHOOL_SHEET)]
    sheet: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> BatchConfig {
        let mut config = BatchConfig::new(self.input_dir);
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        config.pattern = self.pattern;
        config.sheet = self.sheet;
        config.limit = self.limit;
        config
    }
}
