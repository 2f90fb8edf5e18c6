use crate::models::EventDetail;
use crate::output::timezone::ReportZone;

const INDENT: &str = "\t";

/// One event's report: indented lines ending in a blank separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    pub lines: Vec<String>,
}

impl ReportBlock {
    /// Lines joined with newlines, including the trailing one
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Formats fully fetched events into report blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    zone: ReportZone,
}

impl ReportRenderer {
    /// Renderer printing kickoff times in `zone`
    pub fn new(zone: ReportZone) -> Self {
        Self { zone }
    }

    /// Lay out one event as an indented block ending in a blank line
    pub fn render(&self, sport: &str, league: &str, event: &EventDetail) -> ReportBlock {
        let mut lines = Vec::new();
        let mut push = |level: usize, text: String| lines.push(INDENT.repeat(level) + &text);

        push(0, format!("{sport}, {league}"));
        push(
            1,
            format!(
                "{}, {}, {}",
                event.name,
                self.zone.format(event.kickoff_at()),
                event.id
            ),
        );

        for market in &event.markets {
            push(2, market.name.clone());
            for runner in &market.runners {
                push(3, format!("{}, {:?}, {}", runner.name, runner.price, runner.id));
            }
        }
        push(0, String::new());

        ReportBlock { lines }
    }
}
