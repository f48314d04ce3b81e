//! Conversion history: a newest-first, capacity-bounded log persisted
//! wholesale after every mutation.

use crate::core::convert::Conversion;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Oldest entries are evicted once the log grows past this.
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: i64,
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    pub rate: f64,
    pub date: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(amount: f64, from: &str, to: &str, conversion: &Conversion) -> Self {
        let now = Utc::now();
        ConversionRecord {
            id: now.timestamp_millis(),
            amount,
            from: from.to_string(),
            to: to.to_string(),
            converted: conversion.converted,
            rate: conversion.rate,
            date: now,
        }
    }
}

/// Storage seam for the history log. The log is read and written as a
/// whole; a missing log is an empty one.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self) -> Result<Vec<ConversionRecord>>;
    async fn save(&self, log: &[ConversionRecord]) -> Result<()>;
}

/// History operations over any [`HistoryStore`] backend.
pub struct History<S: HistoryStore> {
    store: S,
}

impl<S: HistoryStore> History<S> {
    pub fn new(store: S) -> Self {
        History { store }
    }

    /// Inserts at the front; evicts the oldest entry past capacity.
    pub async fn append(&self, record: ConversionRecord) -> Result<()> {
        let mut log = self.store.load().await?;
        log.insert(0, record);
        log.truncate(HISTORY_CAPACITY);
        self.store.save(&log).await
    }

    /// Full log, newest first.
    pub async fn list(&self) -> Result<Vec<ConversionRecord>> {
        self.store.load().await
    }

    /// Removes the record with the given id. Returns whether anything
    /// was removed; an unknown id is a no-op, not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut log = self.store.load().await?;
        let before = log.len();
        log.retain(|record| record.id != id);
        if log.len() == before {
            return Ok(false);
        }
        self.store.save(&log).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.save(&[]).await
    }
}
