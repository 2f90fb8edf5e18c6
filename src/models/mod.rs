pub mod catalog;
pub mod event;

pub use catalog::{EventSummary, League, Region, Sport};
pub use event::{EventDetail, Market, Runner};
