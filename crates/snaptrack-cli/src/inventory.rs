//! `inventory` command and the inventory file `barcode` and `receipt` add to.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use snaptrack_core::{GroceryItem, Inventory};

use crate::parse::format_price;

pub(crate) async fn run_inventory(
    file: &Path,
    category: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let inventory = load_inventory(file).await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&inventory.filtered(category, search))?
        );
    } else {
        print!("{}", render_inventory(&inventory, category, search));
    }
    Ok(())
}

pub(crate) async fn load_inventory(path: &Path) -> anyhow::Result<Inventory> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of items", path.display()))
}

/// Merges `items` into the inventory file at `path`, creating the file when
/// it does not exist yet.
pub(crate) async fn add_to_inventory(
    path: &Path,
    items: impl IntoIterator<Item = GroceryItem>,
) -> anyhow::Result<Inventory> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("failed to check {}", path.display()))?;
    let mut inventory = if exists {
        load_inventory(path).await?
    } else {
        Inventory::new()
    };

    let before = inventory.len();
    inventory.extend(items);

    let raw = serde_json::to_string_pretty(&inventory)?;
    tokio::fs::write(path, raw)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        new_items = inventory.len() - before,
        total = inventory.len(),
        "inventory updated"
    );
    Ok(inventory)
}

/// One item as a fixed-width row: name, price, quantity, category, and the
/// per-unit price when more than one was bought.
pub(crate) fn render_item(item: &GroceryItem) -> String {
    let mut row = format!(
        "{:<32} {:>8}  x{}  {}",
        item.name,
        item.price_formatted(),
        item.quantity,
        item.category
    );
    if item.quantity > Decimal::ONE {
        let _ = write!(row, "  ({} each)", format_price(item.unit_price()));
    }
    row
}

fn render_inventory(inventory: &Inventory, category: Option<&str>, search: Option<&str>) -> String {
    let items = inventory.filtered(category, search);
    let mut out = String::new();
    if items.is_empty() {
        out.push_str("no matching items\n");
    }
    for item in items {
        let _ = writeln!(out, "{}", render_item(item));
    }
    let _ = writeln!(
        out,
        "{} items, quantity {}, total value {}",
        inventory.len(),
        inventory.total_quantity(),
        format_price(inventory.total_value())
    );
    let _ = writeln!(out, "categories: {}", inventory.categories().join(", "));
    out
}
