//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error as StdError;

use campground_cli::CliError;
use log::error;
use tracing_subscriber::EnvFilter;

const ENV_APP_ENV: &str = "APP_ENV";
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    load_dotenv();
    init_logging();

    match campground_cli::run().await {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            error!("campground: {}", render_chain(&err));
            std::process::exit(1);
        }
    }
}

/// Load `.env` outside production; a missing file is not an error.
fn load_dotenv() {
    if std::env::var(ENV_APP_ENV).is_ok_and(|value| value == "production") {
        return;
    }
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("campground: failed to load .env: {err}");
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        eprintln!("campground: failed to install logger: {err}");
    }
}

/// Append each cause not already quoted by the message above it.
fn render_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !rendered.contains(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        source = cause.source();
    }
    rendered
}
