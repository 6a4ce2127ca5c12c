pub mod http;
pub mod yahoo_finance;

pub use http::PageFetcher;
pub use yahoo_finance::YahooFinanceScraper;
