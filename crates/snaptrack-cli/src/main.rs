mod compare;
mod inventory;
mod parse;
mod repurchase;
mod scan;
mod sheets;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use snaptrack_core::AppConfig;
use snaptrack_llm::ChatClient;
use snaptrack_pricing::SortOption;
use snaptrack_sheets::SheetsClient;
use tracing_subscriber::EnvFilter;

use crate::compare::CompareCommands;
use crate::sheets::SheetsCommands;

#[derive(Debug, Parser)]
#[command(name = "snaptrack")]
#[command(about = "SnapTrack grocery price tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a free-text price answer (file or stdin) into price groups
    Parse {
        /// Read the answer from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Record ordering: price-asc, price-desc, store, or value
        #[arg(long, default_value_t = SortOption::default())]
        sort: SortOption,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Look up product details for a scanned barcode
    Barcode {
        code: String,

        /// Print the parsed item as JSON
        #[arg(long)]
        json: bool,

        /// Add the item to this inventory file
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
    /// Read grocery lines from a JPEG receipt photo
    Receipt {
        image: PathBuf,

        /// Print the decoded lines as JSON
        #[arg(long)]
        json: bool,

        /// Also append the lines to the receipt log sheet under this email
        #[arg(long)]
        log_email: Option<String>,

        /// Add the lines to this inventory file
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
    /// List inventory items with totals
    Inventory {
        /// JSON array of inventory items
        #[arg(long)]
        file: PathBuf,

        /// Only items in this category (exact match)
        #[arg(long)]
        category: Option<String>,

        /// Only items whose name contains this text
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Compare store prices through the chat-completion API
    Compare {
        #[command(subcommand)]
        command: CompareCommands,
    },
    /// Query the product catalogue sheet or log receipts
    Sheets {
        #[command(subcommand)]
        command: SheetsCommands,
    },
    /// Predict when an item will need buying again
    Repurchase {
        item: String,

        /// JSON file holding past purchases
        #[arg(long)]
        history: Option<PathBuf>,

        /// Date to predict from (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = snaptrack_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Parse { file, sort, json } => {
            parse::run_parse(&config, file.as_deref(), sort, json).await?;
        }
        Commands::Barcode {
            code,
            json,
            inventory,
        } => scan::run_barcode(&config, &code, json, inventory.as_deref()).await?,
        Commands::Receipt {
            image,
            json,
            log_email,
            inventory,
        } => {
            scan::run_receipt(
                &config,
                &image,
                json,
                log_email.as_deref(),
                inventory.as_deref(),
            )
            .await?;
        }
        Commands::Inventory {
            file,
            category,
            search,
            json,
        } => {
            inventory::run_inventory(&file, category.as_deref(), search.as_deref(), json).await?;
        }
        Commands::Compare { command } => compare::run_compare(&config, command).await?,
        Commands::Sheets { command } => sheets::run_sheets(&config, command).await?,
        Commands::Repurchase {
            item,
            history,
            today,
        } => repurchase::run_repurchase(&item, history.as_deref(), today).await?,
    }

    Ok(())
}

/// Builds the chat-completion client from configuration.
pub(crate) fn build_chat_client(config: &AppConfig) -> anyhow::Result<ChatClient> {
    let client = ChatClient::with_base_url(
        config.require_openrouter_key()?,
        config.request_timeout_secs,
        &config.user_agent,
        &config.openrouter_base_url,
    )?
    .with_models(&config.text_model, &config.vision_model);
    Ok(client)
}

/// Builds the spreadsheet client from configuration.
pub(crate) fn build_sheets_client(config: &AppConfig) -> anyhow::Result<SheetsClient> {
    let client = SheetsClient::with_base_url(
        config.require_sheets_key()?,
        config.request_timeout_secs,
        &config.user_agent,
        &config.sheets_base_url,
    )?;
    Ok(client)
}
