use std::error::Error;

use clap::Parser;
use tracing::{error, info};

use census_bar::config::RunConfig;
use census_bar::logging;
use census_bar::report::RunReport;
use census_bar::{Classifier, CsvSource, RecordSource};

fn main() -> Result<(), Box<dyn Error>> {
    let config = RunConfig::parse();
    logging::init(config.log_level())?;

    let source = CsvSource::new(config.source.as_str());
    let report = Classifier::new(&source, config.split)
        .and_then(|classifier| RunReport::from_classifier(&source.describe(), &classifier))
        .map_err(|err| {
            error!("{err}");
            err
        })?;

    info!(
        accuracy = report.accuracy,
        correct = report.evaluation.correct,
        total = report.evaluation.total,
        "classification finished"
    );
    println!("{}", report.render(config.format)?);
    Ok(())
}
