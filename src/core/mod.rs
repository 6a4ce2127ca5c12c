//! Core extraction logic and domain types

pub mod config;
pub mod currency;
pub mod extract;
pub mod listing;
pub mod log;
pub mod numeric;
pub mod shape;

// Re-export main types for cleaner imports
pub use currency::{ExchangeRateProvider, QuoteSymbol};
pub use listing::{
    ChangeDirection, CryptoListing, CryptoRecord, CurrencyTable, IndexListing, IndexRecord,
};
