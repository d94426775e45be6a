pub mod category;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;
pub mod merge;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod types;

pub use category::Category;
pub use error::ScrapeError;
pub use fetcher::{extract_category_table, TableFetcher};
pub use normalizer::normalize_columns;
pub use types::{Cell, NormalizedTable, Table};
