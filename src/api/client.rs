use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::urls::ApiUrlBuilder;
use crate::error::{Result, ScraperError};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; LeonScraper/1.0)";

/// Client for the LeonBets betline API.
///
/// Cheap to share: the inner `reqwest::Client` pools connections and is safe
/// to use from many branches at once.
#[derive(Debug, Clone)]
pub struct LeonClient {
    client: Client,
    base_url: String,
    locale: String,
}

impl LeonClient {
    /// Create a new client against `base_url` using the `locale` content tag
    pub fn new(base_url: &str, locale: &str) -> Self {
        Self::with_client(Client::new(), base_url, locale)
    }

    /// Create a client reusing an existing reqwest `Client` and its connection pool
    pub fn with_client(client: Client, base_url: &str, locale: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale: locale.to_string(),
        }
    }

    /// Fetch the full sports catalog
    pub async fn fetch_sports(&self) -> Result<Value> {
        let url = ApiUrlBuilder::sports(&self.locale).build(&self.base_url);
        self.fetch_json(&url).await
    }

    /// Fetch the event list of one league
    pub async fn fetch_league_events(&self, league_id: i64) -> Result<Value> {
        let url = ApiUrlBuilder::league_events(&self.locale, league_id).build(&self.base_url);
        self.fetch_json(&url).await
    }

    /// Fetch full detail (markets and runners) of one event
    pub async fn fetch_event_details(&self, event_id: i64) -> Result<Value> {
        let url = ApiUrlBuilder::event_details(&self.locale, event_id).build(&self.base_url);
        self.fetch_json(&url).await
    }

    /// GET `url` and parse the body as a JSON tree. Non-success statuses fail.
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("LeonBets API error: {} - {}", status, text);
            return Err(ScraperError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ScraperError::Json {
            url: url.to_string(),
            source,
        })
    }
}
