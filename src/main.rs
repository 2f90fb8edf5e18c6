use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leon_scraper::api::LeonClient;
use leon_scraper::benchmark::Benchmark;
use leon_scraper::cli::{parse_args, ParsedArgs};
use leon_scraper::config::Config;
use leon_scraper::workers::SportScraper;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    let args = match parse_args(std::env::args_os()) {
        ParsedArgs::Run(args) => args,
        ParsedArgs::Exit { message, exit_code } => {
            if exit_code == 0 {
                print!("{message}");
            } else {
                eprint!("{message}");
            }
            std::process::exit(exit_code);
        }
    };

    // Logs go to stderr, stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leon_scraper=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Arc::new(Config::load(&args).context("Failed to load configuration")?);
    info!(
        "Configuration loaded: sports {:?}, {} matches per league, {} workers, selection '{}'",
        config.target_sports, config.max_matches, config.worker_threads, config.event_selection
    );

    // The fixed worker pool every branch runs on
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name("scraper-worker")
        .enable_all()
        .build()
        .context("Failed to start worker pool")?;

    let benchmark = Arc::new(Benchmark::new(config.benchmark));
    let client = LeonClient::new(&config.api_base_url, &config.locale);
    let scraper = SportScraper::new(client, Arc::clone(&config), Arc::clone(&benchmark));

    let summary = runtime.block_on(scraper.run());
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    if let Ok(json) = serde_json::to_string(&summary) {
        info!("Summary: {}", json);
    }
    if let Some(report) = benchmark.report() {
        println!("{report}");
    }

    Ok(())
}
