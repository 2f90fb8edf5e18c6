pub mod catalog;
pub mod json;

pub use catalog::{CatalogFilter, LeagueTarget};
