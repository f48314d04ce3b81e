use super::ui;
use crate::core::convert;
use crate::core::history::{ConversionRecord, History, HistoryStore};
use crate::core::rates::{self, RateProvider};
use anyhow::Result;
use tracing::debug;

pub async fn run<S: HistoryStore>(
    amount: f64,
    from: &str,
    to: &str,
    base: &str,
    provider: &dyn RateProvider,
    history: &History<S>,
) -> Result<()> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();

    let pb = ui::new_spinner("Fetching latest rates...");
    let snapshot = rates::load_snapshot(provider, base).await;
    pb.finish_and_clear();
    debug!(source = %snapshot.source, "Loaded rate snapshot");

    let conversion = match convert::convert(amount, &from, &to, &snapshot.table) {
        Ok(conversion) => conversion,
        // User input errors are surfaced, never fatal; nothing is written.
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            return Ok(());
        }
    };

    history
        .append(ConversionRecord::new(amount, &from, &to, &conversion))
        .await?;

    println!("1 {from} = {:.6} {to}", conversion.rate);
    println!(
        "{amount:.2} {from} = {} {to}",
        ui::style_text(&format!("{:.2}", conversion.converted), ui::StyleType::TotalValue)
    );

    let updated = format!(
        "Last updated: {}",
        snapshot.last_updated.format("%Y-%m-%d %H:%M UTC")
    );
    if snapshot.is_offline() {
        println!(
            "{} {}",
            ui::style_text(&updated, ui::StyleType::Subtle),
            ui::style_text(&format!("({})", snapshot.source), ui::StyleType::Warning)
        );
    } else {
        println!(
            "{}",
            ui::style_text(&format!("{updated} ({})", snapshot.source), ui::StyleType::Subtle)
        );
    }

    Ok(())
}
