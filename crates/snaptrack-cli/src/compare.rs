//! `compare` command: price lookups fanned out over stores or inventory items.
//!
//! Lookups run concurrently up to `SNAPTRACK_MAX_CONCURRENT_REQUESTS`. A
//! failed lookup is logged and counted; the run only fails when every
//! lookup failed.

use std::future::Future;
use std::path::PathBuf;

use clap::Subcommand;
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use snaptrack_core::{AppConfig, GroceryItem};
use snaptrack_llm::{LlmError, Store};
use snaptrack_pricing::{
    arrange, normalize_response_with, summarize_store_price, PriceGroup, SortOption, StorePrice,
    ValueScoreMode,
};

use crate::inventory::load_inventory;
use crate::parse::render_groups;

/// Sub-commands available under `compare`.
#[derive(Debug, Subcommand)]
pub enum CompareCommands {
    /// Price one item at a store, or at every known store when none is given
    Item {
        item: String,

        #[arg(long)]
        store: Option<String>,

        #[arg(long, default_value_t = SortOption::default())]
        sort: SortOption,

        #[arg(long)]
        json: bool,
    },
    /// Price the first inventory items (SNAPTRACK_COMPARE_BATCH_SIZE) at one store
    Inventory {
        /// JSON array of inventory items
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        store: String,

        #[arg(long, default_value_t = SortOption::default())]
        sort: SortOption,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompareJob {
    pub item: String,
    pub store: String,
}

/// Normalized answer for one item at one store.
#[derive(Debug, Serialize)]
pub(crate) struct StoreReport {
    pub item: String,
    pub store: String,
    pub summary: Option<StorePrice>,
    pub groups: Vec<PriceGroup>,
}

/// Result of a single lookup. `Err` keeps the job so the failure can be
/// attributed in logs.
#[derive(Debug)]
pub(crate) enum CompareOutcome {
    Ok(StoreReport),
    Err { job: CompareJob, error: LlmError },
}

pub(crate) async fn run_compare(config: &AppConfig, command: CompareCommands) -> anyhow::Result<()> {
    let (jobs, sort, json) = match command {
        CompareCommands::Item {
            item,
            store,
            sort,
            json,
        } => (item_jobs(&item, store.as_deref()), sort, json),
        CompareCommands::Inventory {
            file,
            store,
            sort,
            json,
        } => {
            let inventory = load_inventory(&file).await?;
            (
                inventory_jobs(inventory.items(), &store, config.compare_batch_size),
                sort,
                json,
            )
        }
    };

    if jobs.is_empty() {
        println!("nothing to compare");
        return Ok(());
    }

    let client = crate::build_chat_client(config)?;
    let client = &client;
    let outcomes = run_batch(
        jobs,
        config.max_concurrent_requests,
        config.value_score_mode,
        sort,
        move |item, store| async move { client.compare_price(&item, &store).await },
    )
    .await;

    report_outcomes(&outcomes, json)
}

/// One job per known store when `store` is `None`.
pub(crate) fn item_jobs(item: &str, store: Option<&str>) -> Vec<CompareJob> {
    match store {
        Some(store) => vec![CompareJob {
            item: item.to_owned(),
            store: store.to_owned(),
        }],
        None => Store::ALL
            .iter()
            .map(|s| CompareJob {
                item: item.to_owned(),
                store: s.to_string(),
            })
            .collect(),
    }
}

/// Jobs for the first `limit` inventory items at `store`.
pub(crate) fn inventory_jobs(items: &[GroceryItem], store: &str, limit: usize) -> Vec<CompareJob> {
    items
        .iter()
        .take(limit)
        .map(|i| CompareJob {
            item: i.name.clone(),
            store: store.to_owned(),
        })
        .collect()
}

/// Runs `query` for every job with at most `max_concurrent` in flight and
/// returns outcomes in job order.
pub(crate) async fn run_batch<F, Fut>(
    jobs: Vec<CompareJob>,
    max_concurrent: usize,
    mode: ValueScoreMode,
    sort: SortOption,
    query: F,
) -> Vec<CompareOutcome>
where
    F: Fn(String, String) -> Fut,
    Fut: Future<Output = Result<String, LlmError>>,
{
    let mut results: Vec<(usize, CompareJob, Result<String, LlmError>)> =
        stream::iter(jobs.into_iter().enumerate())
            .map(|(idx, job)| {
                let fut = query(job.item.clone(), job.store.clone());
                async move { (idx, job, fut.await) }
            })
            .buffer_unordered(max_concurrent.max(1))
            .collect()
            .await;
    results.sort_by_key(|(idx, _, _)| *idx);

    results
        .into_iter()
        .map(|(_, job, result)| match result {
            Ok(answer) => CompareOutcome::Ok(build_report(job, &answer, mode, sort)),
            Err(error) => CompareOutcome::Err { job, error },
        })
        .collect()
}

fn build_report(job: CompareJob, answer: &str, mode: ValueScoreMode, sort: SortOption) -> StoreReport {
    StoreReport {
        summary: summarize_store_price(answer, &job.store),
        groups: arrange(normalize_response_with(answer, mode), sort),
        item: job.item,
        store: job.store,
    }
}

fn report_outcomes(outcomes: &[CompareOutcome], json: bool) -> anyhow::Result<()> {
    let mut reports = Vec::new();
    let mut failed: usize = 0;

    for outcome in outcomes {
        match outcome {
            CompareOutcome::Ok(report) => reports.push(report),
            CompareOutcome::Err { job, error } => {
                tracing::error!(
                    item = %job.item,
                    store = %job.store,
                    error = %error,
                    "price comparison failed"
                );
                failed += 1;
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = outcomes.len(), "some price comparisons failed");
    }
    if failed == outcomes.len() {
        anyhow::bail!("all {failed} price comparisons failed");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", render_report(report));
        }
        if reports.len() > 1 {
            if let Some((report, summary)) = cheapest(&reports) {
                println!(
                    "cheapest: {} at {} ({})",
                    report.item,
                    report.store,
                    summary.price_formatted()
                );
            }
        }
    }
    Ok(())
}

/// The report whose headline price is lowest. Summaries without a readable
/// price are ignored; ties keep the earlier report.
fn cheapest<'a>(reports: &[&'a StoreReport]) -> Option<(&'a StoreReport, &'a StorePrice)> {
    reports
        .iter()
        .copied()
        .filter_map(|report| report.summary.as_ref().map(|summary| (report, summary)))
        .filter(|(_, summary)| summary.numeric_price() > Decimal::ZERO)
        .min_by_key(|(_, summary)| summary.numeric_price())
}

fn render_report(report: &StoreReport) -> String {
    let mut out = format!("== {} at {} ==\n", report.item, report.store);
    if let Some(summary) = &report.summary {
        out.push_str(&summary.price_formatted());
        if summary.on_sale {
            out.push_str(" (on sale)");
        }
        if !summary.unit_price.is_empty() {
            out.push_str(&format!(", {}", summary.unit_price));
        }
        if !summary.brand.is_empty() {
            out.push_str(&format!(", brand {}", summary.brand));
        }
        out.push('\n');
    }
    out.push_str(&render_groups(&report.groups));
    out
}
