use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::application::{ChartInput, IngestService};
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;

/// Install the fmt subscriber once. `RUST_LOG` overrides the `info` default.
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> ExitCode {
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    let input = match runtime.block_on(ingest_once(&ConfigService::new())) {
        Ok(input) => input,
        Err(err) => {
            error!(error = %err, "Ingest failed");
            return ExitCode::FAILURE;
        }
    };

    match render(&input) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Failed to serialize chart input");
            ExitCode::FAILURE
        }
    }
}

async fn ingest_once(config: &ConfigService) -> Result<ChartInput> {
    let config = config.load()?;
    IngestService::from_config(&config)?.ingest().await
}

fn render(input: &ChartInput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(input)
}
