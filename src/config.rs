use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::cli::Args;
use crate::output::ReportZone;
use crate::workers::EventSelection;

pub const DEFAULT_API_URL: &str = "https://leonbets.com/api-2";
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_TARGET_SPORTS: &[&str] = &["Football", "Tennis", "Ice Hockey", "Basketball"];
pub const DEFAULT_MAX_MATCHES: usize = 2;
pub const DEFAULT_WORKER_THREADS: usize = 3;
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Run configuration, built once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct Config {
    /// Betline API base URL
    pub api_base_url: String,

    /// Content tag (`ctag`) sent with every request
    pub locale: String,

    /// Sport names whose top leagues are scraped
    pub target_sports: Vec<String>,

    /// Maximum events detail-fetched per league
    pub max_matches: usize,

    /// Size of the worker pool running every branch
    pub worker_threads: usize,

    /// How events are picked from a league's list
    pub event_selection: EventSelection,

    /// Also write the report to a file under `reports_dir`
    pub print_to_file: bool,

    pub reports_dir: PathBuf,

    /// Zone kickoff times are rendered in
    pub time_zone: ReportZone,

    /// Print a benchmark table after the run
    pub benchmark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            target_sports: DEFAULT_TARGET_SPORTS.iter().map(|s| s.to_string()).collect(),
            max_matches: DEFAULT_MAX_MATCHES,
            worker_threads: DEFAULT_WORKER_THREADS,
            event_selection: EventSelection::default(),
            print_to_file: false,
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            time_zone: ReportZone::default(),
            benchmark: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`), then apply CLI flags
    pub fn load(args: &Args) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        Ok(config.with_args(args))
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Config {
            api_base_url: lookup("LEON_API_URL").unwrap_or(defaults.api_base_url),

            locale: lookup("LEON_LOCALE").unwrap_or(defaults.locale),

            target_sports: match lookup("TARGET_SPORTS") {
                Some(list) => list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.target_sports,
            },

            max_matches: parse_var(&lookup, "MAX_MATCHES", defaults.max_matches)?,

            worker_threads: parse_var(&lookup, "WORKER_THREADS", defaults.worker_threads)?,

            event_selection: parse_var(&lookup, "EVENT_SELECTION", defaults.event_selection)?,

            print_to_file: parse_flag(&lookup, "PRINT_TO_FILE", defaults.print_to_file)?,

            reports_dir: lookup("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),

            time_zone: parse_var(&lookup, "REPORT_TIMEZONE", defaults.time_zone)?,

            benchmark: parse_flag(&lookup, "BENCHMARK", defaults.benchmark)?,
        };

        if config.worker_threads == 0 {
            bail!("WORKER_THREADS must be at least 1");
        }

        Ok(config)
    }

    /// CLI flags override environment values
    pub fn with_args(mut self, args: &Args) -> Self {
        if args.file {
            self.print_to_file = true;
        }
        if let Some(dir) = &args.output_dir {
            self.reports_dir = dir.clone();
        }
        if let Some(zone) = args.timezone {
            self.time_zone = zone;
        }
        if args.benchmark {
            self.benchmark = true;
        }
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off" | "") => Ok(false),
        Some(v) => bail!("{key} must be a boolean, got '{v}'"),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::FixedOffset;
    use clap::Parser;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.target_sports, DEFAULT_TARGET_SPORTS);
        assert_eq!(config.max_matches, 2);
        assert_eq!(config.worker_threads, 3);
        assert_eq!(config.event_selection, EventSelection::PrematchPrefix);
        assert!(!config.print_to_file);
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.time_zone, ReportZone::Utc);
        assert!(!config.benchmark);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TARGET_SPORTS", "Darts, Snooker ,"),
            ("MAX_MATCHES", "5"),
            ("WORKER_THREADS", "8"),
            ("EVENT_SELECTION", "first"),
            ("PRINT_TO_FILE", "yes"),
            ("REPORT_TIMEZONE", "+03:00"),
        ]))
        .unwrap();

        assert_eq!(config.target_sports, vec!["Darts", "Snooker"]);
        assert_eq!(config.max_matches, 5);
        assert_eq!(config.worker_threads, 8);
        assert_eq!(config.event_selection, EventSelection::FirstK);
        assert!(config.print_to_file);
        assert_eq!(
            config.time_zone,
            ReportZone::Fixed(FixedOffset::east_opt(3 * 3600).unwrap())
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("MAX_MATCHES", "two")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("WORKER_THREADS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("BENCHMARK", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("REPORT_TIMEZONE", "Mars/Base")])).is_err());
    }

    #[test]
    fn test_cli_overrides_env() {
        let args = Args::try_parse_from([
            "leon-scraper",
            "--file",
            "--output-dir",
            "/tmp/out",
            "--timezone",
            "UTC-02:00",
            "--benchmark",
        ])
        .unwrap();
        let config = Config::from_lookup(lookup_from(&[("REPORTS_DIR", "env-reports")]))
            .unwrap()
            .with_args(&args);

        assert!(config.print_to_file);
        assert!(config.benchmark);
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/out"));
        assert_eq!(
            config.time_zone,
            ReportZone::Fixed(FixedOffset::west_opt(2 * 3600).unwrap())
        );
    }
}
