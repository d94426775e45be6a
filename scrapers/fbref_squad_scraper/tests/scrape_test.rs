use pretty_assertions::assert_eq;
use std::fs;

use fbref_squad_scraper::{
    config::{ScraperConfig, SourceConfig},
    extract_category_table, normalize_columns,
    output::write_csv,
    pipeline::{normalize_page, SeasonScraper},
    Category, Cell, ScrapeError, TableFetcher,
};

const SHOOTING_PAGE: &str = include_str!("fixtures/squad_shooting_2023-2024.html");
const GCA_PAGE: &str = include_str!("fixtures/squad_gca_2023-2024.html");
const PAGE_PATH: &str = "/en/comps/9/2023-2024/{page}/2023-2024-Premier-League-Stats";

fn config_for(server: &mockito::Server) -> ScraperConfig {
    ScraperConfig {
        source: SourceConfig {
            url_template: format!("{}/en/comps/9/{{season}}/{{page}}/{{season}}-Premier-League-Stats", server.url()),
        },
        ..ScraperConfig::default()
    }
}

#[test]
fn test_shooting_page_end_to_end() {
    let table = extract_category_table(SHOOTING_PAGE, Category::Shooting.columns(), "2023-2024").unwrap();
    assert_eq!(table.columns, vec!["Squad", "Sh", "Dist", "SEASON"]);
    assert_eq!(table.len(), 4);

    let normalized = normalize_columns(table, "shooting").unwrap();
    assert_eq!(normalized.columns(), ["SQUAD", "SHOOT_SH", "SHOOT_DIST", "SEASON"]);
    assert_eq!(
        normalized.rows()[3],
        vec![
            Cell::from("Nott'ham Forest"),
            Cell::Int(409),
            Cell::Float(17.8),
            Cell::from("2023-2024"),
        ]
    );
}

#[test]
fn test_gca_page_dedupes_repeated_headers() {
    let normalized = normalize_page(GCA_PAGE, Category::GoalAndShotCreation, "2023-2024").unwrap();
    assert_eq!(
        normalized.columns(),
        [
            "SQUAD",
            "GSC_PASSLIVE",
            "GSC_PASSDEAD",
            "GSC_TO",
            "GSC_SH",
            "GSC_FLD",
            "GSC_DEF",
            "GSC_PASSLIVE1",
            "GSC_PASSDEAD1",
            "GSC_TO1",
            "GSC_SH1",
            "GSC_FLD1",
            "GSC_DEF1",
            "SEASON",
        ]
    );
    assert_eq!(normalized.rows()[0][1], Cell::Int(841));
    assert_eq!(normalized.rows()[0][7], Cell::Int(101));
}

#[test]
fn test_repeated_request_keeps_every_column() {
    let columns = ["Squad", "Sh", "Sh"];
    let table = extract_category_table(SHOOTING_PAGE, &columns, "2023-2024").unwrap();
    assert_eq!(table.width(), columns.len() + 1);

    let normalized = normalize_columns(table, "shooting").unwrap();
    assert_eq!(normalized.columns(), ["SQUAD", "SHOOT_SH", "SHOOT_SH1", "SEASON"]);
    assert_eq!(normalized.rows()[0][1], Cell::Int(666));
    assert_eq!(normalized.rows()[0][2], Cell::Int(666));
}

#[test]
fn test_missing_column_is_parse_error() {
    let err = extract_category_table(SHOOTING_PAGE, &["Squad", "Poss"], "2023-2024").unwrap_err();
    assert!(matches!(err, ScrapeError::Parse(_)));
}

#[test]
fn test_fetch_category_table_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", PAGE_PATH.replace("{page}", "shooting").as_str())
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(SHOOTING_PAGE)
        .create();

    let fetcher = TableFetcher::new(&ScraperConfig::default()).unwrap();
    let url = format!("{}{}", server.url(), PAGE_PATH.replace("{page}", "shooting"));
    let table = fetcher
        .fetch_category_table(&url, &["Squad", "Sh"], "2023-2024")
        .unwrap();

    mock.assert();
    assert_eq!(table.columns, vec!["Squad", "Sh", "SEASON"]);
    assert_eq!(table.rows[0][1], Cell::Int(666));
}

#[test]
fn test_non_success_status_is_retrieval_error() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/missing").with_status(404).create();

    let fetcher = TableFetcher::new(&ScraperConfig::default()).unwrap();
    let err = fetcher
        .fetch_category_table(&format!("{}/missing", server.url()), &["Squad"], "2023-2024")
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Retrieval { .. }));
}

#[test]
fn test_page_without_table_is_parse_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/empty")
        .with_status(200)
        .with_body("<html><body><p>Rate limited</p></body></html>")
        .create();

    let fetcher = TableFetcher::new(&ScraperConfig::default()).unwrap();
    let err = fetcher
        .fetch_category_table(&format!("{}/empty", server.url()), &["Squad"], "2023-2024")
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Parse(_)));
}

#[test]
fn test_scrape_season_merges_categories() {
    let mut server = mockito::Server::new();
    let shooting = server
        .mock("GET", PAGE_PATH.replace("{page}", "shooting").as_str())
        .with_status(200)
        .with_body(SHOOTING_PAGE)
        .create();
    let gca = server
        .mock("GET", PAGE_PATH.replace("{page}", "gca").as_str())
        .with_status(200)
        .with_body(GCA_PAGE)
        .create();

    let scraper = SeasonScraper::new(&config_for(&server)).unwrap();
    let wide = scraper
        .scrape_season(&[Category::Shooting, Category::GoalAndShotCreation], "2023-2024")
        .unwrap();

    shooting.assert();
    gca.assert();
    assert_eq!(&wide.columns[..4], ["SQUAD", "SEASON", "SHOOT_SH", "SHOOT_DIST"]);
    assert_eq!(wide.width(), 2 + 2 + 12);
    // Everton only appears on the creation page
    assert_eq!(wide.len(), 5);
    let everton = &wide.rows[4];
    assert_eq!(everton[0], Cell::from("Everton"));
    assert!(everton[2].is_empty());
    assert_eq!(everton[4], Cell::Int(507));
}

#[test]
fn test_scrape_stops_on_first_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", PAGE_PATH.replace("{page}", "shooting").as_str())
        .with_status(500)
        .create();

    let scraper = SeasonScraper::new(&config_for(&server)).unwrap();
    let err = scraper.scrape_season(&Category::ALL, "2023-2024").unwrap_err();
    assert!(matches!(err, ScrapeError::Retrieval { .. }));
}

#[test]
fn test_write_normalized_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shooting.csv");
    let normalized = normalize_page(SHOOTING_PAGE, Category::Shooting, "2023-2024").unwrap();

    write_csv(&normalized.into_table(), fs::File::create(&path).unwrap()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("SQUAD,SHOOT_SH,SHOOT_DIST,SEASON"));
    assert_eq!(lines.next(), Some("Arsenal,666,16.2,2023-2024"));
    assert_eq!(written.lines().count(), 5);
}
