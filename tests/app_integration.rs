use fxscrape::AppCommand;
use fxscrape::cli::OutputFormat;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const USER_AGENT: &str = "fxscrape-test/1.0";

    pub async fn create_mock_server(url_path: &str, body: &str, status: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(url_path))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
            providers:
              yahoo:
                base_url: {base_url}
            http:
              user_agent: "{USER_AGENT}"
              timeout_secs: 5
        "#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_rate_command_with_mock() {
    let body = r#"<html><body>
        <fin-streamer data-field="regularMarketPrice" data-symbol="JPY=X" value="151.23">151.23</fin-streamer>
    </body></html>"#;
    let mock_server = test_utils::create_mock_server("/quote/USDJPY=X/", body, 200).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxscrape::run_command(
        AppCommand::Rate {
            from: "USD".to_string(),
            to: "JPY".to_string(),
        },
        config_file.path().to_str(),
        OutputFormat::Json,
    )
    .await;
    assert!(result.is_ok(), "Rate command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_exchange_command_fails_on_unknown_pair() {
    let mock_server =
        test_utils::create_mock_server("/quote/EURXYZ=X/", "<html></html>", 200).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxscrape::run_command(
        AppCommand::Exchange {
            from: "EUR".to_string(),
            to: "XYZ".to_string(),
            amount: 100.0,
        },
        config_file.path().to_str(),
        OutputFormat::Table,
    )
    .await;
    let err = result.expect_err("Exchange of an unknown pair should fail");
    info!(error = %err, "Exchange failed as expected");
    assert_eq!(err.to_string(), "No market price found for symbol: EURXYZ=X");
}

#[test_log::test(tokio::test)]
async fn test_currencies_command_with_mock() {
    let body = r#"<html><body><section id="yfin-list"><table><tbody>
        <tr><td aria-label="Name">EUR/USD</td><td aria-label="Last Price">1.0841</td></tr>
        <tr><td aria-label="Name">EUR/GBP</td><td aria-label="Last Price">0.8512</td></tr>
    </tbody></table></section></body></html>"#;
    let mock_server = test_utils::create_mock_server("/currencies/", body, 200).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxscrape::run_command(
        AppCommand::Currencies,
        config_file.path().to_str(),
        OutputFormat::Table,
    )
    .await;
    assert!(result.is_ok(), "Currencies command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_listing_commands_succeed_when_page_is_down() {
    let mock_server = test_utils::create_mock_server("/world-indices/", "", 503).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fxscrape::run_command(
        AppCommand::Indices,
        config_file.path().to_str(),
        OutputFormat::Json,
    )
    .await;
    assert!(result.is_ok(), "Indices command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("missing.yaml");
    assert!(!config_path.exists());

    let result = fxscrape::run_command(
        AppCommand::Crypto,
        config_path.to_str(),
        OutputFormat::Table,
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_scraper_library_api_end_to_end() {
    use fxscrape::core::config::AppConfig;
    use fxscrape::providers::YahooFinanceScraper;

    let body = r#"<html><body><section id="yfin-list"><table><tbody>
        <tr><td aria-label="Name">EUR/USD</td><td aria-label="Last Price">1,234.56</td></tr>
    </tbody></table></section></body></html>"#;
    let mock_server = test_utils::create_mock_server("/currencies/", body, 200).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");
    let scraper = YahooFinanceScraper::from_config(&config).expect("Failed to build scraper");
    let table = scraper.scrape_currencies().await;

    assert_eq!(table.len(), 1);
    assert_eq!(table["EUR"]["USD"], 1234.56);
}
