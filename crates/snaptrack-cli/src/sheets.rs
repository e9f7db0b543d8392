//! `sheets` command handlers for the product catalogue and receipt log.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use snaptrack_core::{AppConfig, PurchaseRecord, ReceiptLine};
use snaptrack_sheets::{
    available_stores, category_breakdown, compare_across_stores, lookup_by_barcode,
    lookup_product, SheetProduct, SheetsClient, StoreComparison,
};

/// Sub-commands available under `sheets`.
#[derive(Debug, Subcommand)]
pub enum SheetsCommands {
    /// List the stores present in the catalogue
    Stores,
    /// Find an item at one store
    Lookup {
        name: String,

        #[arg(long)]
        store: String,

        /// Match NAME as a barcode against item and brand text
        #[arg(long)]
        barcode: bool,
    },
    /// Show an item's catalogue entry at every store, cheapest first
    Compare { item: String },
    /// Count catalogue products per category
    Categories,
    /// Append receipt lines (JSON from `receipt --json`) to the receipt log
    LogReceipt {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        email: String,
    },
}

pub(crate) async fn run_sheets(config: &AppConfig, command: SheetsCommands) -> anyhow::Result<()> {
    let client = crate::build_sheets_client(config)?;

    match command {
        SheetsCommands::Stores => {
            let products = fetch_catalogue(&client, config).await?;
            for store in available_stores(&products) {
                println!("{store}");
            }
        }
        SheetsCommands::Lookup {
            name,
            store,
            barcode,
        } => {
            let products = fetch_catalogue(&client, config).await?;
            let found = if barcode {
                lookup_by_barcode(&products, &name, &store)
            } else {
                lookup_product(&products, &name, &store)
            };
            match found {
                Some(product) => println!("{}", describe_product(product)),
                None => anyhow::bail!("'{name}' not found at {store}"),
            }
        }
        SheetsCommands::Compare { item } => {
            let products = fetch_catalogue(&client, config).await?;
            let comparison = compare_across_stores(&products, &item)?;
            for product in by_price(&comparison) {
                println!("{}", describe_product(product));
            }
        }
        SheetsCommands::Categories => {
            let products = fetch_catalogue(&client, config).await?;
            for (category, count) in category_breakdown(&products) {
                println!("{category}: {count}");
            }
        }
        SheetsCommands::LogReceipt { file, email } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let lines: Vec<ReceiptLine> = serde_json::from_str(&raw).with_context(|| {
                format!("{} is not a JSON array of receipt lines", file.display())
            })?;
            let records = purchase_records(&lines, &email, chrono::Utc::now().date_naive());
            client
                .append_receipt_rows(config.require_receipt_sheet()?, &records)
                .await?;
            println!("logged {} items for {email}", records.len());
        }
    }
    Ok(())
}

async fn fetch_catalogue(
    client: &SheetsClient,
    config: &AppConfig,
) -> anyhow::Result<Vec<SheetProduct>> {
    client
        .fetch_products(config.require_product_sheet()?, &config.product_sheet_range)
        .await
        .context("failed to fetch product catalogue")
}

/// Converts receipt lines to receipt-log rows. Lines without a printed date
/// take the first date printed on any line of the receipt, else
/// `fallback_date` as `MM/DD/YYYY`.
pub(crate) fn purchase_records(
    lines: &[ReceiptLine],
    email: &str,
    fallback_date: NaiveDate,
) -> Vec<PurchaseRecord> {
    let fallback = lines
        .iter()
        .find_map(|line| line.date.clone())
        .unwrap_or_else(|| fallback_date.format("%m/%d/%Y").to_string());
    lines
        .iter()
        .map(|line| PurchaseRecord {
            item: line.name.clone(),
            price: line.price,
            date: line.date.clone().unwrap_or_else(|| fallback.clone()),
            email: email.to_owned(),
            next_purchase: None,
        })
        .collect()
}

/// Store entries ordered by catalogue price, store name breaking ties.
fn by_price(comparison: &StoreComparison) -> Vec<&SheetProduct> {
    let mut products: Vec<_> = comparison.by_store.values().collect();
    products.sort_by_key(|product| product.numeric_price());
    products
}

fn describe_product(product: &SheetProduct) -> String {
    let mut text = format!("{}: {} {}", product.store, product.item, product.price);
    if !product.brand.is_empty() {
        text.push_str(&format!(" ({})", product.brand));
    }
    if !product.price_per_unit.is_empty() {
        text.push_str(&format!(", {} per unit", product.price_per_unit));
    }
    text
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(store: &str, price: &str) -> SheetProduct {
        SheetProduct {
            store: store.to_owned(),
            item: "Whole Milk".to_owned(),
            category: "Dairy".to_owned(),
            brand: String::new(),
            price: price.to_owned(),
            quantity: "1 gal".to_owned(),
            price_per_unit: String::new(),
            link: String::new(),
        }
    }

    #[test]
    fn by_price_orders_cheapest_first() {
        let catalogue = vec![
            product("Aldi", "$3.19"),
            product("Giant", "$2.89"),
            product("Publix", "$3.19"),
            product("Safeway", "$4.09"),
        ];
        let comparison = compare_across_stores(&catalogue, "milk").unwrap();
        let stores: Vec<_> = by_price(&comparison)
            .iter()
            .map(|p| p.store.as_str())
            .collect();
        assert_eq!(stores, vec!["Giant", "Aldi", "Publix", "Safeway"]);
    }

    fn line(name: &str, date: Option<&str>) -> ReceiptLine {
        ReceiptLine {
            name: name.to_owned(),
            price: Decimal::new(399, 2),
            quantity: Decimal::ONE,
            category: "Dairy".to_owned(),
            price_per_unit: None,
            date: date.map(str::to_owned),
        }
    }

    #[test]
    fn purchase_records_share_the_printed_receipt_date() {
        let fallback = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let records = purchase_records(
            &[line("Butter", None), line("Milk", Some("02/15/2025"))],
            "shopper@example.com",
            fallback,
        );
        assert_eq!(records[0].date, "02/15/2025");
        assert_eq!(records[1].date, "02/15/2025");
        assert!(records.iter().all(|r| r.email == "shopper@example.com"));
        assert_eq!(records[0].price, Decimal::new(399, 2));
    }

    #[test]
    fn purchase_records_without_dates_use_fallback() {
        let fallback = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let records = purchase_records(&[line("Butter", None)], "a@example.com", fallback);
        assert_eq!(records[0].date, "03/07/2025");
    }

    #[test]
    fn describe_product_includes_optional_fields() {
        let product = SheetProduct {
            store: "Aldi".to_owned(),
            item: "Whole Milk".to_owned(),
            category: "Dairy".to_owned(),
            brand: "Friendly Farms".to_owned(),
            price: "$2.99".to_owned(),
            quantity: "1 gal".to_owned(),
            price_per_unit: "$0.02/oz".to_owned(),
            link: String::new(),
        };
        assert_eq!(
            describe_product(&product),
            "Aldi: Whole Milk $2.99 (Friendly Farms), $0.02/oz per unit"
        );
    }
}
