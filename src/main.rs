//! Binary entry point: generate one NFL article and print it.
//!
//! Configuration failures abort before any network call. Generation failures
//! are reported on stderr with the `Error generating article:` prefix and a
//! non-zero exit status.

use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use gridiron_press::api::{HttpSubmit, RetrySubmit};
use gridiron_press::cli::Cli;
use gridiron_press::config::Config;
use gridiron_press::generator::{ArticleGenerator, error_message};

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("gridiron_press starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.prompt, args.max_retries, args.max_wait_secs, "Parsed CLI arguments");

    // --- Load configuration (fatal before any network call) ---
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error; aborting before any request");
            return ExitCode::FAILURE;
        }
    };

    // --- Assemble transport and generator ---
    let transport = match HttpSubmit::new(&config) {
        Ok(transport) => transport,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let transport = RetrySubmit::with_bounds(
        transport,
        args.max_retries,
        Duration::from_secs(args.max_wait_secs),
    );
    let generator = ArticleGenerator::new(transport);

    // --- Generate ---
    info!("Generating NFL article");
    match generator.generate(args.prompt.as_deref()).await {
        Ok(article) => {
            let elapsed = start_time.elapsed();
            info!(secs = elapsed.as_secs(), chars = article.len(), "Article generated");
            println!("{}", "=".repeat(50));
            println!("{article}");
            println!("{}", "=".repeat(50));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Article generation failed");
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}
