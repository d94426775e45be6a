use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be retrieved, either at the transport level or
    /// because the server answered with a non-success status.
    #[error("Retrieval error for {url}: {reason}")]
    Retrieval { url: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn retrieval(url: &str, reason: impl ToString) -> Self {
        Self::Retrieval {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_column(name: &str) -> Self {
        Self::Parse(format!("Column {} not found in table header", name))
    }

    pub fn unknown_category(name: &str) -> Self {
        Self::Configuration(format!("No short code defined for category {}", name))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
