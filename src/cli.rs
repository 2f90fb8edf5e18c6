use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::output::ReportZone;

/// LeonBets top-league scraper
///
/// Fetches the sports catalog, picks the top leagues of the configured
/// sports, and prints the first upcoming matches of each league with all
/// their markets and outcomes.
#[derive(Parser, Debug, Default)]
#[command(name = "leon-scraper", about, long_about = None)]
pub struct Args {
    /// Also write the report to a timestamped file
    #[arg(short = 'f', long = "file")]
    pub file: bool,

    /// Directory report files are written to with --file
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Time zone for kickoff times: UTC, local, a region like Europe/Berlin, or an offset like +02:00
    #[arg(short = 't', long = "timezone", value_name = "TZ", value_parser = parse_zone)]
    pub timezone: Option<ReportZone>,

    /// Print a timing table for every operation after the run
    #[arg(short = 'b', long = "benchmark")]
    pub benchmark: bool,
}

fn parse_zone(s: &str) -> Result<ReportZone, String> {
    s.parse()
}

/// Outcome of reading the command line
#[derive(Debug)]
pub enum ParsedArgs {
    Run(Args),

    /// Help was requested or parsing failed; print `message` and exit with `exit_code`
    Exit { message: String, exit_code: i32 },
}

/// Parse `argv`. Help exits 0; any other parse failure exits 1 after usage.
pub fn parse_args<I, T>(argv: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => ParsedArgs::Run(args),
        Err(e) => {
            let exit_code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            ParsedArgs::Exit {
                message: e.render().to_string(),
                exit_code,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let ParsedArgs::Run(args) = parse_args(["leon-scraper"]) else {
            panic!("expected run");
        };
        assert!(!args.file);
        assert!(args.output_dir.is_none());
        assert!(args.timezone.is_none());
        assert!(!args.benchmark);
    }

    #[test]
    fn test_short_flags() {
        let argv = ["leon-scraper", "-f", "-b", "-o", "out", "-t", "local"];
        let ParsedArgs::Run(args) = parse_args(argv) else {
            panic!("expected run");
        };
        assert!(args.file);
        assert!(args.benchmark);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.timezone, Some(ReportZone::Local));
    }

    #[test]
    fn test_region_timezone() {
        let ParsedArgs::Run(args) = parse_args(["leon-scraper", "--timezone", "Europe/Berlin"]) else {
            panic!("expected run");
        };
        assert_eq!(
            args.timezone,
            Some(ReportZone::Named(chrono_tz::Europe::Berlin))
        );
    }

    #[test]
    fn test_help_exits_zero() {
        match parse_args(["leon-scraper", "--help"]) {
            ParsedArgs::Exit { message, exit_code } => {
                assert_eq!(exit_code, 0);
                assert!(message.contains("--timezone"));
            }
            ParsedArgs::Run(_) => panic!("expected help"),
        }
    }

    #[test]
    fn test_unknown_flag_exits_one() {
        match parse_args(["leon-scraper", "--bogus"]) {
            ParsedArgs::Exit { message, exit_code } => {
                assert_eq!(exit_code, 1);
                assert!(message.contains("Usage"));
            }
            ParsedArgs::Run(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_bad_timezone_exits_one() {
        assert!(matches!(
            parse_args(["leon-scraper", "--timezone", "Nowhere/City"]),
            ParsedArgs::Exit { exit_code: 1, .. }
        ));
    }
}
