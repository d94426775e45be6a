use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::{
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use tracing::info;

use fbref_squad_scraper::{
    config::ScraperConfig,
    output::{write_csv, write_json},
    pipeline::{normalize_page, SeasonScraper},
    Category, Table,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape squad stats and write one wide table per season
    Scrape {
        /// Season label as used in page URLs, e.g. 2023-2024
        #[arg(short, long, required = true)]
        season: Vec<String>,
        /// Category keys to include (all when omitted)
        #[arg(short, long)]
        category: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize the first table of a saved HTML page
    Normalize {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        season: String,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the categories with their short codes and columns
    Categories,
}

fn parse_categories(keys: &[String]) -> Result<Vec<Category>> {
    if keys.is_empty() {
        return Ok(Category::ALL.to_vec());
    }
    keys.iter()
        .map(|key| Category::from_key(key).map_err(anyhow::Error::from))
        .collect()
}

fn write_table(table: &Table, format: Format, output: Option<&PathBuf>) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            info!("Writing {} rows to {:?}", table.len(), path);
            Box::new(File::create(path).with_context(|| format!("Failed to create {:?}", path))?)
        }
        None => Box::new(io::stdout().lock()),
    };
    match format {
        Format::Csv => write_csv(table, writer)?,
        Format::Json => write_json(table, writer)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = ScraperConfig::from_env();

    match cli.command {
        Commands::Scrape { season, category, format, output } => {
            let categories = parse_categories(&category)?;
            let scraper = SeasonScraper::new(&config)?;
            let table = scraper
                .scrape_seasons(&categories, &season)
                .context("Scrape failed")?;
            write_table(&table, format, output.as_ref())?;
        }
        Commands::Normalize { file, category, season, format, output } => {
            let category = Category::from_key(&category)?;
            let html = fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;
            let table = normalize_page(&html, category, &season)?;
            write_table(&table.into_table(), format, output.as_ref())?;
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!(
                    "{:<24} {:<6} {:<14} {}",
                    category.key(),
                    category.short_code(),
                    category.page_id(),
                    category.columns().join(", ")
                );
            }
        }
    }

    Ok(())
}
