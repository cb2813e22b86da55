//! signin - sign in from the terminal and keep the session token.
//!
//! Prompts for an email and password, posts them to the configured login
//! endpoint, and stores the returned token for the rest of the toolchain.

mod app;

use std::io;
use std::path::Path;

use anyhow::Result;
use signin_core::Config;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, Command};

/// Log file name inside the data directory
const LOG_FILE: &str = "signin.log";

/// Initialize the tracing subscriber for logging.
///
/// Events go to stderr, and to a log file when a directory is available.
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let command = Command::from_args(&args)?;

    let mut config = Config::load()?;
    config.apply_env();

    let log_dir = config
        .data_dir()
        .ok()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());
    let _guard = init_tracing(log_dir.as_deref());
    info!(?command, api_url = %config.api_url, "signin starting");

    let app = App::new(config)?;
    match command {
        Command::Login => app.login().await,
        Command::Status => app.status(),
        Command::Logout => app.logout(),
        Command::Help => {
            app::print_usage();
            Ok(())
        }
    }
}
