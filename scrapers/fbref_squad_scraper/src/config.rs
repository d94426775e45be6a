use serde::{Deserialize, Serialize};
use std::env;

use crate::category::Category;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; FbrefSquadScraper/0.1)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Page URL with `{season}` and `{page}` placeholders.
    pub url_template: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: "https://fbref.com/en/comps/9/{season}/{page}/{season}-Premier-League-Stats"
                .to_string(),
        }
    }
}

impl SourceConfig {
    pub fn url_for(&self, season: &str, category: Category) -> String {
        self.url_template
            .replace("{season}", season)
            .replace("{page}", category.page_id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScraperConfig {
    pub scraping: ScrapingConfig,
    pub source: SourceConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Ok(Some(timeout)) = env::var("SCRAPER_TIMEOUT_SECS").map_or(Ok(None), |t| t.parse::<u64>().map(Some)) {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Ok(template) = env::var("FBREF_URL_TEMPLATE") {
            config.source.url_template = template;
        }

        config
    }
}
