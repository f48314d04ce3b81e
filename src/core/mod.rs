//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod history;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConvertError, convert};
pub use history::{ConversionRecord, HISTORY_CAPACITY, History, HistoryStore};
pub use rates::{RateProvider, RateSnapshot, RateSource, RateTable};
