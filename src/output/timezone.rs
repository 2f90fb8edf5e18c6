use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone kickoff times are rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportZone {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),

    /// IANA region such as `Europe/Moscow`, labelled with its abbreviation
    Named(Tz),
}

impl ReportZone {
    /// Render as `yyyy-MM-dd HH:mm:ss <label>`
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        match self {
            ReportZone::Utc => format!("{} UTC", instant.format(TIMESTAMP_FORMAT)),
            ReportZone::Local => instant
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            ReportZone::Fixed(offset) => instant
                .with_timezone(offset)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            ReportZone::Named(tz) => instant
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M:%S %Z")
                .to_string(),
        }
    }
}

impl FromStr for ReportZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        match upper.as_str() {
            "UTC" | "Z" | "GMT" => return Ok(ReportZone::Utc),
            "LOCAL" => return Ok(ReportZone::Local),
            _ => {}
        }

        let offset = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);

        if let Some(seconds) = parse_offset(offset) {
            return Ok(if seconds == 0 {
                ReportZone::Utc
            } else {
                // parse_offset bounds the value to +-18h, which FixedOffset accepts
                FixedOffset::east_opt(seconds).map_or(ReportZone::Utc, ReportZone::Fixed)
            });
        }

        trimmed
            .parse::<Tz>()
            .map(ReportZone::Named)
            .map_err(|_| {
                format!(
                    "invalid time zone '{trimmed}' (expected UTC, local, \
                     a region like Europe/Berlin, or an offset like +02:00)"
                )
            })
    }
}

impl fmt::Display for ReportZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportZone::Utc => write!(f, "UTC"),
            ReportZone::Local => write!(f, "local"),
            ReportZone::Fixed(offset) => write!(f, "{offset}"),
            ReportZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// Parse `+HH`, `+HH:MM` or `+HHMM` into seconds east of UTC
fn parse_offset(s: &str) -> Option<i32> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() > 2 => rest.split_at(2),
        None => (rest, "0"),
    };

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 18 || minutes > 59 || (hours == 18 && minutes > 0) {
        return None;
    }

    Some(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_utc_format() {
        assert_eq!(ReportZone::Utc.format(instant()), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_fixed_offset_format() {
        let zone: ReportZone = "+02:00".parse().unwrap();
        assert_eq!(zone.format(instant()), "2023-11-15 00:13:20 +02:00");

        let zone: ReportZone = "UTC-05:30".parse().unwrap();
        assert_eq!(zone.format(instant()), "2023-11-14 16:43:20 -05:30");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("utc".parse::<ReportZone>(), Ok(ReportZone::Utc));
        assert_eq!("Z".parse::<ReportZone>(), Ok(ReportZone::Utc));
        assert_eq!("Local".parse::<ReportZone>(), Ok(ReportZone::Local));
        assert_eq!("+00:00".parse::<ReportZone>(), Ok(ReportZone::Utc));
        assert_eq!(
            "+0930".parse::<ReportZone>(),
            Ok(ReportZone::Fixed(FixedOffset::east_opt(9 * 3600 + 1800).unwrap()))
        );
        assert_eq!(
            "GMT+3".parse::<ReportZone>(),
            Ok(ReportZone::Fixed(FixedOffset::east_opt(3 * 3600).unwrap()))
        );
    }

    #[test]
    fn test_named_zone_uses_abbreviation() {
        let zone: ReportZone = "Europe/Moscow".parse().unwrap();
        assert_eq!(zone, ReportZone::Named(chrono_tz::Europe::Moscow));
        assert_eq!(zone.format(instant()), "2023-11-15 01:13:20 MSK");
        assert_eq!(zone.to_string(), "Europe/Moscow");
    }

    #[test]
    fn test_named_zone_follows_daylight_saving() {
        let zone: ReportZone = "Europe/Berlin".parse().unwrap();
        // November is winter time
        assert_eq!(zone.format(instant()), "2023-11-14 23:13:20 CET");

        let summer = DateTime::from_timestamp(1_690_000_000, 0).unwrap();
        assert_eq!(zone.format(summer), "2023-07-22 06:26:40 CEST");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("Europe/Nowhere".parse::<ReportZone>().is_err());
        assert!("Mars/Base".parse::<ReportZone>().is_err());
        assert!("+25:00".parse::<ReportZone>().is_err());
        assert!("+02:75".parse::<ReportZone>().is_err());
        assert!("+".parse::<ReportZone>().is_err());
        assert!("".parse::<ReportZone>().is_err());
    }
}
