use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    category::SEASON,
    config::ScraperConfig,
    error::{Result, ScrapeError},
    html::parse_first_table,
    types::{Cell, Table},
};

/// Pulls one stats table per request. Holds nothing but the HTTP client.
pub struct TableFetcher {
    client: Client,
}

impl TableFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .build()
            .map_err(|e| ScrapeError::Configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn fetch_html(&self, url: &str) -> Result<String> {
        info!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::retrieval(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::retrieval(url, format!("HTTP status {}", status)));
        }
        response.text().map_err(|e| ScrapeError::retrieval(url, e))
    }

    /// Fetches `url` and returns the selected columns of its first table plus
    /// a `SEASON` column. Nothing is retried.
    pub fn fetch_category_table<S: AsRef<str>>(&self, url: &str, columns: &[S], season: &str) -> Result<Table> {
        let html = self.fetch_html(url)?;
        extract_category_table(&html, columns, season)
    }
}

/// Offline half of the fetch: parse, flatten, select and tag with the season.
pub fn extract_category_table<S: AsRef<str>>(html: &str, columns: &[S], season: &str) -> Result<Table> {
    let table = parse_first_table(html)?;
    debug!("Flattened header: {:?}", table.columns);
    let selected = table.select(columns)?;
    Ok(selected.with_constant_column(SEASON, Cell::Text(season.to_string())))
}
