pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::{AppConfig, DEFAULT_EXCHANGE_RATE_BASE_URL};
use crate::core::history::History;
use anyhow::Result;
use tracing::debug;

/// Commands the application can execute, decoupled from the clap surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert { amount: f64, from: String, to: String },
    HistoryList,
    HistoryDelete { id: i64 },
    HistoryClear { yes: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .exchange_rate
        .as_ref()
        .map_or(DEFAULT_EXCHANGE_RATE_BASE_URL, |p| &p.base_url);
    let provider = providers::ExchangeRateApiProvider::new(base_url);

    let data_path = config.default_data_path()?;
    let store = store::FjallHistoryStore::open(&data_path.join("history"))?;
    let history = History::new(store);

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(
                amount,
                &from,
                &to,
                &config.base_currency,
                &provider,
                &history,
            )
            .await
        }
        AppCommand::HistoryList => cli::history::run(&history).await,
        AppCommand::HistoryDelete { id } => cli::history::delete(&history, id).await,
        AppCommand::HistoryClear { yes } => {
            // Destructive, so gated behind an explicit acknowledgment.
            let confirmed = yes || cli::ui::confirm("Delete all conversion history?")?;
            cli::history::clear(&history, confirmed).await
        }
    }
}
