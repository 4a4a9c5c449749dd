//! Trolley CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use trolley::persistence::DEFAULT_KEY;

/// Trolley shopping cart
#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Persistent shopping cart", long_about = None)]
pub struct Config {
    /// Storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do with the cart.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Where the cart is persisted.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "TROLLEY_STORAGE_DIR", default_value = ".trolley")]
    pub storage_dir: PathBuf,

    /// Storage key of the cart
    #[arg(long, env = "TROLLEY_STORAGE_KEY", default_value = DEFAULT_KEY)]
    pub storage_key: String,
}

/// Where products come from and how prices are shown.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Product catalog YAML file
    #[arg(long, env = "TROLLEY_CATALOG", default_value = "fixtures/catalog.yml")]
    pub catalog: PathBuf,

    /// Display currency (USD, GBP, EUR)
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "USD")]
    pub currency: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Cart commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog products
    Products,

    /// Show the cart
    Show,

    /// Add a product to the cart
    Add {
        /// Product id
        product: String,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        product: String,
    },

    /// Raise a product's quantity by one
    Increment {
        /// Product id
        product: String,
    },

    /// Lower a product's quantity by one
    Decrement {
        /// Product id
        product: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_defaults() -> TestResult {
        let config = Config::try_parse_from(["trolley", "show"])?;

        assert_eq!(config.storage.storage_key, DEFAULT_KEY);
        assert!(matches!(config.command, Command::Show));

        Ok(())
    }

    #[test]
    fn parses_add_with_overrides() -> TestResult {
        let config = Config::try_parse_from([
            "trolley",
            "--storage-dir",
            "/tmp/cart",
            "--currency",
            "GBP",
            "add",
            "widget-a",
        ])?;

        assert_eq!(config.storage.storage_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.catalog.currency, "GBP");
        assert!(matches!(config.command, Command::Add { product } if product == "widget-a"));

        Ok(())
    }

    #[test]
    fn log_level_defaults_to_info() -> TestResult {
        let command = Config::command();
        let log_level = command
            .get_arguments()
            .find(|arg| arg.get_id() == "log_level")
            .ok_or("missing log_level argument")?;

        assert_eq!(
            log_level.get_default_values().first().and_then(|value| value.to_str()),
            Some("info")
        );

        Ok(())
    }
}
