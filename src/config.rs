use clap::{Parser, ValueEnum};
use tracing::Level;

pub const DEFAULT_SOURCE: &'static str =
    "http://archive.ics.uci.edu/ml/machine-learning-databases/adult/adult.data";
pub const DEFAULT_SPLIT: f64 = 25.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Just the accuracy percentage.
    Text,
    /// A full run report.
    Json,
}

/// Predict income brackets from census records by comparing them against
/// the average of the class averages.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "census-bar", version)]
pub struct RunConfig {
    /// CSV file path or http(s) URL of the census records
    #[arg(long, env = "CENSUS_BAR_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Percentage of records held out for testing
    #[arg(long, env = "CENSUS_BAR_SPLIT", default_value_t = DEFAULT_SPLIT)]
    pub split: f64,

    /// Output format
    #[arg(long, env = "CENSUS_BAR_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunConfig {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
