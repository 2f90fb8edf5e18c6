pub mod scraper;
pub mod selection;

pub use scraper::{RunSummary, SportScraper};
pub use selection::EventSelection;
