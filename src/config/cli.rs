use crate::core::persistence::DEFAULT_STORAGE_KEY;
use crate::domain::model::ProductId;
use crate::domain::ports::{ConfigProvider, StockCheckPolicy};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cart")]
#[command(about = "Manage a persisted storefront shopping cart")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the connection flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:3333")]
    pub api_base_url: String,

    #[arg(long, default_value = "./cart-storage.json")]
    pub storage_path: String,

    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(long, value_enum, default_value_t = StockCheckPolicy::NextUnit)]
    pub stock_check: StockCheckPolicy,

    /// Per-request timeout for catalog and stock lookups, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product line
    Remove { product_id: ProductId },
    /// Set the quantity of a product
    Update { product_id: ProductId, amount: u32 },
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn stock_check(&self) -> StockCheckPolicy {
        self.stock_check
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.timeout
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> validation::Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_path("storage_path", &self.storage_path)?;
        validation::validate_non_empty_string("storage_key", &self.storage_key)?;
        if let Some(timeout) = self.timeout {
            validation::validate_range("timeout", timeout, 1, 300)?;
        }
        Ok(())
    }
}
