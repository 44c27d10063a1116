//! Predictor entrypoint: loads both ensembles once, scores one household
//! from a CSV snapshot, and prints the result as JSON. Task-queue and
//! metering-API plumbing live in the surrounding service, not here.

use mci_predictor::{
    config::PredictorConfig, logging::StructuredLogger, model::ModelStore,
    series::CsvSeriesSource, predictor::Predictor,
};
use std::time::Duration;
use tracing::info;

fn usage() -> ! {
    eprintln!("usage: mci-predictor <age> <male 0|1> <edu_years> <solo 0|1> <series.csv> [--debug]");
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("MCI_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PredictorConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        usage();
    }
    let parse_int = |s: &String| s.parse::<i64>().unwrap_or_else(|_| usage());
    let age = parse_int(&args[0]);
    let male = parse_int(&args[1]);
    let edu = parse_int(&args[2]);
    let solo = parse_int(&args[3]);
    let csv_path = &args[4];
    let debug = args.iter().any(|a| a == "--debug");

    info!(
        tree_dir = ?config.models.tree_models_dir,
        logistic_dir = ?config.models.logistic_models_dir,
        "loading model store"
    );
    let store = ModelStore::load(&config.models)?;
    let predictor = Predictor::new(store, Duration::from_secs(config.guard.timeout_secs))?;

    let source = CsvSeriesSource::new(csv_path);
    let result = predictor.calculate_score(age, male, edu, solo, &source, debug)?;

    info!(status_code = result.status_code.code(), "prediction finished");
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
