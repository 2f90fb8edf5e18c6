use urlencoding::encode;

/// Flag set on the catalog endpoint
pub const SPORTS_FLAGS: &[&str] = &["urlv2"];

/// Flags sent with every league-events and event-detail request
pub const COMMON_API_FLAGS: &[&str] = &[
    "reg",   // regular markets
    "urlv2", // url ver-2
    "mm2",   // market metadata ver-2
    "rrc",   // real-time changes
    "nodup", // no duplicates
];

/// Extra flags for the event-detail endpoint
pub const EVENT_DETAIL_FLAGS: &[&str] = &[
    "smgv2", // special markets group ver-2
    "outv2", // outcomes ver-2
    "wd2",   // withdrawal ver-2
    "dar",   // direct access to runners
];

/// Builds betline endpoint URLs. Query parameters keep insertion order;
/// flags are de-duplicated and joined with commas.
#[derive(Debug, Clone)]
pub struct ApiUrlBuilder {
    path: &'static str,
    query: Vec<(&'static str, String)>,
    flags: Vec<&'static str>,
}

impl ApiUrlBuilder {
    fn new(path: &'static str, locale: &str) -> Self {
        Self {
            path,
            query: vec![("ctag", locale.to_string())],
            flags: Vec::new(),
        }
    }

    pub fn sports(locale: &str) -> Self {
        Self::new("/betline/sports", locale).flags(SPORTS_FLAGS)
    }

    pub fn league_events(locale: &str, league_id: i64) -> Self {
        Self::new("/betline/events/all", locale)
            .param("league_id", league_id.to_string())
            .param("hideClosed", "true")
            .flags(COMMON_API_FLAGS)
    }

    pub fn event_details(locale: &str, event_id: i64) -> Self {
        Self::new("/betline/event/all", locale)
            .param("eventId", event_id.to_string())
            .flags(COMMON_API_FLAGS)
            .flags(EVENT_DETAIL_FLAGS)
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    pub fn flags(mut self, flags: &[&'static str]) -> Self {
        for flag in flags {
            if !self.flags.contains(flag) {
                self.flags.push(*flag);
            }
        }
        self
    }

    pub fn build(&self, base_url: &str) -> String {
        let mut parts: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect();

        if !self.flags.is_empty() {
            let flags: Vec<String> = self.flags.iter().map(|f| encode(f).into_owned()).collect();
            parts.push(format!("flags={}", flags.join(",")));
        }

        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.path,
            parts.join("&")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://leonbets.com/api-2";

    #[test]
    fn test_sports_url() {
        assert_eq!(
            ApiUrlBuilder::sports("en-US").build(BASE),
            "https://leonbets.com/api-2/betline/sports?ctag=en-US&flags=urlv2"
        );
    }

    #[test]
    fn test_league_events_url() {
        assert_eq!(
            ApiUrlBuilder::league_events("en-US", 1970324836974595).build(BASE),
            "https://leonbets.com/api-2/betline/events/all?ctag=en-US&league_id=1970324836974595&hideClosed=true&flags=reg,urlv2,mm2,rrc,nodup"
        );
    }

    #[test]
    fn test_event_details_url() {
        assert_eq!(
            ApiUrlBuilder::event_details("en-US", 42).build(&format!("{BASE}/")),
            "https://leonbets.com/api-2/betline/event/all?ctag=en-US&eventId=42&flags=reg,urlv2,mm2,rrc,nodup,smgv2,outv2,wd2,dar"
        );
    }

    #[test]
    fn test_param_overrides_and_encodes() {
        let url = ApiUrlBuilder::sports("en-US")
            .param("ctag", "pt BR")
            .build("http://localhost");
        assert_eq!(url, "http://localhost/betline/sports?ctag=pt%20BR&flags=urlv2");
    }
}
