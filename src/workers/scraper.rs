//! Three-level fetch orchestration.
//!
//! ```text
//! catalog ──► league branch ──► event branch ──► report writer
//!             (one per top      (one per selected
//!              league)           event)
//! ```
//!
//! Every branch is a task on the shared runtime. Each level joins its
//! children with a [`JoinSet`], collecting failures as values so one failed
//! branch never cancels its siblings.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::api::LeonClient;
use crate::benchmark::Benchmark;
use crate::config::Config;
use crate::error::Result;
use crate::filter::{CatalogFilter, LeagueTarget};
use crate::models::{EventDetail, EventSummary};
use crate::output::{ReportFile, ReportRenderer, ReportSink, ReportWriter};

/// Counts describing one finished run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// The catalog fetch itself failed, nothing else ran
    pub catalog_failed: bool,

    pub leagues_spawned: usize,
    pub leagues_failed: usize,

    pub events_spawned: usize,
    pub events_rendered: usize,
    pub events_failed: usize,

    /// Report file written this run, if file output was enabled and could be opened
    pub report_file: Option<PathBuf>,
}

/// Per-league counts folded into the run summary at the level-1 join
#[derive(Debug, Default)]
struct LeagueOutcome {
    events_spawned: usize,
    events_rendered: usize,
    events_failed: usize,
}

/// Everything a branch needs, shared read-only across tasks
struct ScrapeContext {
    client: LeonClient,
    config: Arc<Config>,
    filter: CatalogFilter,
    renderer: ReportRenderer,
    benchmark: Arc<Benchmark>,
}

/// Scrapes the betline catalog down to a report of top-league matches
pub struct SportScraper {
    ctx: Arc<ScrapeContext>,
    console: Box<dyn Write + Send>,
}

impl SportScraper {
    pub fn new(client: LeonClient, config: Arc<Config>, benchmark: Arc<Benchmark>) -> Self {
        let filter = CatalogFilter::new(config.target_sports.iter().cloned());
        let renderer = ReportRenderer::new(config.time_zone);

        Self {
            ctx: Arc::new(ScrapeContext {
                client,
                config,
                filter,
                renderer,
                benchmark,
            }),
            console: Box::new(io::stdout()),
        }
    }

    /// Send console output somewhere other than stdout
    pub fn with_console(mut self, console: Box<dyn Write + Send>) -> Self {
        self.console = console;
        self
    }

    /// Run the whole pipeline and tear down the report writer.
    ///
    /// Consumes the scraper, so the writer (and report file) is closed exactly
    /// once, after every branch has settled. A failed catalog fetch is logged
    /// and reported in the summary rather than returned.
    pub async fn run(self) -> RunSummary {
        let started = Instant::now();
        let ctx = self.ctx;

        let file = if ctx.config.print_to_file {
            match ReportFile::create(&ctx.config.reports_dir, Utc::now()) {
                Ok(file) => {
                    info!("Writing report to {}", file.path().display());
                    Some(file)
                }
                Err(e) => {
                    error!(
                        "Failed to create report file in {}: {}, falling back to console only",
                        ctx.config.reports_dir.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        let (sink, report) = ReportWriter::spawn(self.console, file);
        let mut summary = RunSummary::default();

        match ctx.client.fetch_sports().await {
            Ok(catalog) => process_sports(&ctx, &sink, &catalog, &mut summary).await,
            Err(e) => {
                error!("Error in processing: {}", e);
                summary.catalog_failed = true;
            }
        }

        drop(sink);
        match report.finish().await {
            Ok(stats) => summary.report_file = stats.file_path,
            Err(e) => error!("Report writer failed: {}", e),
        }

        ctx.benchmark.record("Total Execution", started);
        info!(
            "Run finished: {} leagues ({} failed), {} events rendered ({} failed)",
            summary.leagues_spawned,
            summary.leagues_failed,
            summary.events_rendered,
            summary.events_failed
        );
        summary
    }
}

/// Level 1: spawn one branch per selected league and wait for all of them
async fn process_sports(
    ctx: &Arc<ScrapeContext>,
    sink: &ReportSink,
    catalog: &Value,
    summary: &mut RunSummary,
) {
    let started = Instant::now();

    let Some(targets) = ctx.filter.select_leagues(catalog) else {
        warn!("Sports catalog is not an array, nothing to do");
        return;
    };
    info!("Found {} top leagues to process", targets.len());

    let mut leagues = JoinSet::new();
    for target in targets {
        leagues.spawn(process_league(Arc::clone(ctx), sink.clone(), target));
    }
    summary.leagues_spawned = leagues.len();

    while let Some(joined) = leagues.join_next().await {
        match joined {
            Ok(Ok(outcome)) => {
                summary.events_spawned += outcome.events_spawned;
                summary.events_rendered += outcome.events_rendered;
                summary.events_failed += outcome.events_failed;
            }
            // Already logged by the branch
            Ok(Err(_)) => summary.leagues_failed += 1,
            Err(e) => {
                error!("League task failed: {}", e);
                summary.leagues_failed += 1;
            }
        }
    }

    ctx.benchmark.record("Process Sports", started);
}

/// Level 2: fetch one league's events and spawn a branch per selected event
async fn process_league(
    ctx: Arc<ScrapeContext>,
    sink: ReportSink,
    target: LeagueTarget,
) -> Result<LeagueOutcome> {
    let started = Instant::now();
    let league = &target.league;

    let doc = match ctx.client.fetch_league_events(league.id).await {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to fetch events for league {} ({}): {}", league.id, league.name, e);
            return Err(e);
        }
    };

    let Some(events) = EventSummary::list_from_json(&doc) else {
        debug!("League {} has no event list", league.id);
        return Ok(LeagueOutcome::default());
    };

    let selected = ctx
        .config
        .event_selection
        .select(&events, ctx.config.max_matches);
    debug!(
        "League {} ({}): {} of {} events selected",
        league.id,
        league.name,
        selected.len(),
        events.len()
    );

    let sport_name: Arc<str> = Arc::from(target.sport_name.as_str());
    let league_name: Arc<str> = Arc::from(league.name.as_str());

    let mut matches = JoinSet::new();
    for event in selected {
        matches.spawn(process_event(
            Arc::clone(&ctx),
            sink.clone(),
            Arc::clone(&sport_name),
            Arc::clone(&league_name),
            event.id,
        ));
    }

    let mut outcome = LeagueOutcome {
        events_spawned: matches.len(),
        ..Default::default()
    };

    while let Some(joined) = matches.join_next().await {
        match joined {
            Ok(Ok(())) => outcome.events_rendered += 1,
            Ok(Err(_)) => outcome.events_failed += 1,
            Err(e) => {
                error!("Event task in league {} failed: {}", league.id, e);
                outcome.events_failed += 1;
            }
        }
    }

    ctx.benchmark
        .record(&format!("Process League {}", league.name), started);
    Ok(outcome)
}

/// Level 3: fetch one event's detail and hand its report block to the writer
async fn process_event(
    ctx: Arc<ScrapeContext>,
    sink: ReportSink,
    sport_name: Arc<str>,
    league_name: Arc<str>,
    event_id: i64,
) -> Result<()> {
    let result = fetch_and_render(&ctx, &sink, &sport_name, &league_name, event_id).await;
    if let Err(e) = &result {
        error!("Failed to process event {} in {}: {}", event_id, league_name, e);
    }
    result
}

async fn fetch_and_render(
    ctx: &ScrapeContext,
    sink: &ReportSink,
    sport_name: &str,
    league_name: &str,
    event_id: i64,
) -> Result<()> {
    let doc = ctx.client.fetch_event_details(event_id).await?;

    let started = Instant::now();
    let event = EventDetail::from_json(&doc);
    let block = ctx.renderer.render(sport_name, league_name, &event);
    sink.emit(block).await?;

    ctx.benchmark
        .record(&format!("Print Match {}", event.name), started);
    Ok(())
}

