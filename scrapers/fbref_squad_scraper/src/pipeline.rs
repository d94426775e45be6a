use tracing::info;

use crate::{
    category::Category,
    config::ScraperConfig,
    error::Result,
    fetcher::{extract_category_table, TableFetcher},
    merge::{merge_season_tables, stack_seasons},
    normalizer::normalize_for,
    types::{NormalizedTable, Table},
};

/// Runs fetch then normalize for each (category, season) unit, one at a time.
/// The first failing unit aborts the run.
pub struct SeasonScraper {
    config: ScraperConfig,
    fetcher: TableFetcher,
}

impl SeasonScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            fetcher: TableFetcher::new(config)?,
            config: config.clone(),
        })
    }

    pub fn scrape_category(&self, category: Category, season: &str) -> Result<NormalizedTable> {
        let url = self.config.source.url_for(season, category);
        let table = self.fetcher.fetch_category_table(&url, category.columns(), season)?;
        normalize_for(table, category)
    }

    /// One wide table for `season`, joined on squad.
    pub fn scrape_season(&self, categories: &[Category], season: &str) -> Result<Table> {
        let mut tables = Vec::with_capacity(categories.len());
        for &category in categories {
            let table = self.scrape_category(category, season)?;
            info!("{} {}: {} rows", season, category, table.rows().len());
            tables.push(table);
        }
        merge_season_tables(&tables)
    }

    pub fn scrape_seasons<S: AsRef<str>>(&self, categories: &[Category], seasons: &[S]) -> Result<Table> {
        let mut wide = Vec::with_capacity(seasons.len());
        for season in seasons {
            wide.push(self.scrape_season(categories, season.as_ref())?);
        }
        Ok(stack_seasons(wide))
    }
}

/// Same pipeline for a page already on disk.
pub fn normalize_page(html: &str, category: Category, season: &str) -> Result<NormalizedTable> {
    let table = extract_category_table(html, category.columns(), season)?;
    normalize_for(table, category)
}
