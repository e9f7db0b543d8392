//! `barcode` and `receipt` commands.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use snaptrack_core::{AppConfig, GroceryItem, ReceiptLine};
use snaptrack_llm::{parse_barcode_answer, parse_receipt_items};

use crate::inventory::{add_to_inventory, render_item};
use crate::sheets::purchase_records;

pub(crate) async fn run_barcode(
    config: &AppConfig,
    code: &str,
    json: bool,
    inventory: Option<&Path>,
) -> anyhow::Result<()> {
    let client = crate::build_chat_client(config)?;
    let answer = client.lookup_barcode(code).await?;
    let item = parse_barcode_answer(&answer, code);
    tracing::info!(barcode = code, name = %item.name, "barcode lookup complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("{}\n\n{}", render_item(&item), answer.trim());
    }

    if let Some(path) = inventory {
        add_to_inventory(path, [item]).await?;
        println!("added to {}", path.display());
    }
    Ok(())
}

pub(crate) async fn run_receipt(
    config: &AppConfig,
    image: &Path,
    json: bool,
    log_email: Option<&str>,
    inventory: Option<&Path>,
) -> anyhow::Result<()> {
    let jpeg = tokio::fs::read(image)
        .await
        .with_context(|| format!("failed to read {}", image.display()))?;

    let client = crate::build_chat_client(config)?;
    let answer = client.scan_receipt(&jpeg).await?;
    let lines = parse_receipt_items(&answer)?;
    tracing::info!(items = lines.len(), "receipt scanned");

    let scanned_at = Utc::now();
    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", render_receipt(&lines, scanned_at));
    }

    if let Some(path) = inventory {
        let items = lines
            .iter()
            .cloned()
            .map(|line| GroceryItem::from_receipt_line(line, scanned_at));
        let updated = add_to_inventory(path, items).await?;
        println!("inventory now holds {} items", updated.len());
    }

    if let Some(email) = log_email {
        let records = purchase_records(&lines, email, scanned_at.date_naive());
        let sheets = crate::build_sheets_client(config)?;
        sheets
            .append_receipt_rows(config.require_receipt_sheet()?, &records)
            .await?;
        println!("logged {} items for {email}", records.len());
    }
    Ok(())
}

fn render_receipt(lines: &[ReceiptLine], scanned_at: DateTime<Utc>) -> String {
    if lines.is_empty() {
        return "no grocery items found\n".to_string();
    }
    lines
        .iter()
        .cloned()
        .map(|line| GroceryItem::from_receipt_line(line, scanned_at))
        .map(|item| format!("{}\n", render_item(&item)))
        .collect()
}
