use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use snaptrack_core::{predict_next_purchase, typical_repurchase_interval_days, PurchaseRecord};

pub(crate) async fn run_repurchase(
    item: &str,
    history: Option<&Path>,
    today: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let history: Vec<PurchaseRecord> = match history {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of purchases", path.display()))?
        }
        None => Vec::new(),
    };

    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    println!("{}", describe_prediction(item, &history, today));
    Ok(())
}

fn describe_prediction(item: &str, history: &[PurchaseRecord], today: NaiveDate) -> String {
    match predict_next_purchase(item, history, today) {
        Some(date) => format!(
            "{item}: next purchase around {date} (typically every {} days)",
            typical_repurchase_interval_days(item)
        ),
        None => format!("{item}: no prediction available"),
    }
}
