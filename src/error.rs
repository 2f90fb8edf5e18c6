use thiserror::Error;

/// Failures that end a single fetch branch (or, at the catalog level, the run)
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("malformed JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report writer is no longer accepting blocks")]
    ReportClosed,

    #[error("branch task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
