pub mod client;
pub mod urls;

pub use client::LeonClient;
pub use urls::ApiUrlBuilder;
