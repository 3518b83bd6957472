use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use waste_match::config::{LoggingSettings, Settings};
use waste_match::models::{ErrorResponse, FindMatchesRequest};
use waste_match::{MatchError, Runner};

/// Reads a match request (JSON) from the file named by the first argument,
/// or stdin when none is given, and writes the ranked response to stdout.
fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);
    info!("Starting waste matching run...");

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Matching run failed: {}", e);
            let response = ErrorResponse {
                error: error_kind(&e).to_string(),
                message: e.to_string(),
            };
            if let Err(write_err) = write_json(&response) {
                error!("Failed to write error response: {}", write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), MatchError> {
    let input = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading request from {}", path);
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let request: FindMatchesRequest = serde_json::from_str(&input)?;
    let runner = Runner::from_settings(settings)?;
    let response = runner.run(request)?;

    write_json(&response)
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<(), MatchError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

fn error_kind(error: &MatchError) -> &'static str {
    match error {
        MatchError::InvalidInput(_) | MatchError::Catalog(_) | MatchError::Json(_) => "invalid_input",
        MatchError::InvalidWeights(_) | MatchError::Config(_) => "invalid_config",
        MatchError::Cache(_) | MatchError::Io(_) => "internal",
    }
}

/// Logs go to stderr so stdout carries only the JSON response
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}
