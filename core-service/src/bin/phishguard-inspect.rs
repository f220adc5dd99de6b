//! phishguard-inspect - print the feature vector (and verdict) for a URL
//!
//! Usage: phishguard-inspect <url> [bundle.json]

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use phishguard_core::constants::{APP_NAME, APP_VERSION};
use phishguard_core::{ClassifierBundle, DetectorConfig, LoadOptions, PhishingDetector};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("{} {}\nusage: phishguard-inspect <url> [bundle.json]", APP_NAME, APP_VERSION);
        return ExitCode::from(2);
    };

    let bundle = match args.next() {
        Some(path) => match ClassifierBundle::load(Path::new(&path), &LoadOptions::default()) {
            Ok(bundle) => Some(Arc::new(bundle)),
            Err(e) => {
                log::error!("Error loading bundle: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let detector = PhishingDetector::new(DetectorConfig::from_env(), bundle);

    let mut report = serde_json::json!({
        "url": url,
        "features": detector.features(&url).to_log_entry(),
    });

    if detector.is_model_loaded() {
        report["verdict"] = match detector.analyze(&url) {
            Ok(verdict) => serde_json::to_value(&verdict).unwrap_or_default(),
            Err(e) => serde_json::json!({ "error": e.kind(), "message": e.to_string() }),
        };
    }

    match serde_json::to_string_pretty(&report) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to render report: {}", e);
            ExitCode::FAILURE
        }
    }
}
