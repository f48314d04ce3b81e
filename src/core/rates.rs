//! Exchange rate table, snapshot status and the provider seam

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::warn;

/// Where a rate snapshot came from: a live fetch or the offline
/// fallback table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    Live,
    Fallback,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSource::Live => "online",
                RateSource::Fallback => "offline data",
            }
        )
    }
}

/// Rates for one base currency: units of each currency per one unit
/// of `base`. Invariant: `get(base) == Some(1.0)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: &str, mut rates: HashMap<String, f64>) -> Self {
        rates.insert(base.to_string(), 1.0);
        RateTable {
            base: base.to_string(),
            rates,
        }
    }

    /// Hardcoded rates used when the remote service is unreachable or
    /// returns garbage.
    pub fn fallback() -> Self {
        RateTable::new(
            "USD",
            HashMap::from([
                ("USD".to_string(), 1.0),
                ("IDR".to_string(), 14500.0),
                ("EUR".to_string(), 0.85),
                ("GBP".to_string(), 0.73),
                ("JPY".to_string(), 110.0),
                ("SGD".to_string(), 1.35),
            ]),
        )
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// A rate table plus its freshness metadata.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub table: RateTable,
    pub last_updated: DateTime<Utc>,
    pub source: RateSource,
}

impl RateSnapshot {
    /// Offline snapshot stamped with the current instant.
    pub fn fallback() -> Self {
        RateSnapshot {
            table: RateTable::fallback(),
            last_updated: Utc::now(),
            source: RateSource::Fallback,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest(&self, base: &str) -> Result<RateSnapshot>;
}

/// Fetches the latest rates, degrading to the fallback table on any
/// failure. Never returns an error: a refresh failure is a status, not
/// a hard failure.
pub async fn load_snapshot(provider: &dyn RateProvider, base: &str) -> RateSnapshot {
    match provider.latest(base).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Rate refresh failed, using offline fallback rates");
            RateSnapshot::fallback()
        }
    }
}
