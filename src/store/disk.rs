use crate::core::history::{ConversionRecord, HistoryStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// The whole log lives under a single key and is rewritten wholesale
/// on every mutation.
const HISTORY_KEY: &str = "conversions";

/// History log persisted in a fjall keyspace.
pub struct FjallHistoryStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallHistoryStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open history store at {}", path.display()))?;
        let partition = keyspace
            .open_partition("history", PartitionCreateOptions::default())
            .context("Failed to open history partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl HistoryStore for FjallHistoryStore {
    async fn load(&self) -> Result<Vec<ConversionRecord>> {
        match self.partition.get(HISTORY_KEY)? {
            Some(bytes) => {
                let log: Vec<ConversionRecord> = serde_json::from_slice(&bytes)
                    .context("Failed to decode persisted history log")?;
                debug!("Loaded {} history records", log.len());
                Ok(log)
            }
            None => {
                debug!("No persisted history found");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, log: &[ConversionRecord]) -> Result<()> {
        self.partition
            .insert(HISTORY_KEY, serde_json::to_vec(log)?)?;
        // The log is the sole source of truth between sessions, sync it
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Persisted {} history records", log.len());
        Ok(())
    }
}
