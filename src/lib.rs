//! Concurrent scraper for the LeonBets betline API.
//!
//! Fetches the sports catalog, keeps the top leagues of the configured
//! sports, detail-fetches the first upcoming events of every such league
//! and writes an indented text report to the console and optionally a file.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use leon_scraper::api::LeonClient;
//! use leon_scraper::benchmark::Benchmark;
//! use leon_scraper::config::Config;
//! use leon_scraper::workers::SportScraper;
//!
//! #[tokio::main(flavor = "multi_thread", worker_threads = 3)]
//! async fn main() {
//!     let config = Arc::new(Config::default());
//!     let client = LeonClient::new(&config.api_base_url, &config.locale);
//!     let benchmark = Arc::new(Benchmark::new(false));
//!
//!     let summary = SportScraper::new(client, config, benchmark).run().await;
//!     println!("{} events rendered", summary.events_rendered);
//! }
//! ```

pub mod api;
pub mod benchmark;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod output;
pub mod workers;

pub use error::ScraperError;
