use super::ui;
use crate::core::history::{ConversionRecord, History, HistoryStore};
use anyhow::Result;
use comfy_table::Cell;

fn format_record_row(record: &ConversionRecord) -> Vec<Cell> {
    vec![
        Cell::new(record.id),
        Cell::new(record.date.format("%Y-%m-%d %H:%M")),
        ui::amount_cell(&format!("{:.2} {}", record.amount, record.from)),
        ui::amount_cell(&format!("{:.2} {}", record.converted, record.to)),
        ui::amount_cell(&format!("{:.6}", record.rate)),
    ]
}

pub async fn run<S: HistoryStore>(history: &History<S>) -> Result<()> {
    let log = history.list().await?;

    if log.is_empty() {
        println!(
            "{}",
            ui::style_text("No conversion history yet.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Date (UTC)"),
        ui::header_cell("Amount"),
        ui::header_cell("Converted"),
        ui::header_cell("Rate"),
    ]);

    for record in &log {
        table.add_row(format_record_row(record));
    }

    println!(
        "{}\n\n{table}",
        ui::style_text("Conversion history", ui::StyleType::Title)
    );

    Ok(())
}

pub async fn delete<S: HistoryStore>(history: &History<S>, id: i64) -> Result<()> {
    if history.delete(id).await? {
        println!("Deleted history entry {id}");
    } else {
        println!(
            "{}",
            ui::style_text(&format!("No history entry with id {id}"), ui::StyleType::Subtle)
        );
    }
    Ok(())
}

/// Erases the log only when the caller has obtained a positive
/// acknowledgment; a declined confirmation leaves it untouched.
pub async fn clear<S: HistoryStore>(history: &History<S>, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!("Aborted, history left untouched.");
        return Ok(());
    }

    history.clear().await?;
    println!("Conversion history cleared.");
    Ok(())
}
