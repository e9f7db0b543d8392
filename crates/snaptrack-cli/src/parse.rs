//! `parse` command and the shared text rendering of price groups.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use snaptrack_core::AppConfig;
use snaptrack_pricing::{arrange, normalize_response_with, PriceGroup, SortOption};
use tokio::io::AsyncReadExt;

pub(crate) async fn run_parse(
    config: &AppConfig,
    file: Option<&Path>,
    sort: SortOption,
    json: bool,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let groups = arrange(normalize_response_with(&text, config.value_score_mode), sort);
    tracing::info!(groups = groups.len(), %sort, "normalized price answer");

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        print!("{}", render_groups(&groups));
    }
    Ok(())
}

pub(crate) fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

/// Renders groups as an indented plain-text listing, one record per line.
pub(crate) fn render_groups(groups: &[PriceGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{}", group.title);
        if group.is_empty() {
            let _ = writeln!(out, "  (no prices)");
        }
        for record in &group.items {
            let price = if record.price_found {
                format_price(record.price)
            } else {
                "price unknown".to_string()
            };
            let _ = write!(out, "  {}: {price}", record.store_label());
            if !record.unit.is_empty() {
                let _ = write!(out, " per {}", record.unit);
            }
            if record.is_best_deal {
                let _ = write!(out, "  [best deal]");
            }
            out.push('\n');
        }
    }
    out
}
