use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "photo-quote")]
#[command(about = "Price calculator for photography service bookings")]
pub struct CliConfig {
    /// TOML catalog replacing the built-in services and payment methods
    #[arg(long, global = true, env = "PHOTO_QUOTE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the service packages
    Services,

    /// List the payment methods
    Payments,

    /// Price one booking
    Quote {
        #[arg(short, long)]
        service: String,

        /// Requested hours, as typed into the form
        #[arg(long, allow_hyphen_values = true)]
        hours: Option<String>,

        /// Payment method id (defaults to the catalog default)
        #[arg(short, long)]
        payment: Option<String>,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Price every service with every payment method as CSV
    Table {
        /// Hours to price; each service is clamped to its minimum
        #[arg(long)]
        hours: Option<i64>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay form events read from stdin, one per line
    Session {
        /// Render views as JSON lines
        #[arg(long)]
        json: bool,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validation::validate_path("catalog", &catalog.to_string_lossy())?;
        }

        match &self.command {
            Command::Quote { service, payment, .. } => {
                validation::validate_non_empty_string("service", service)?;
                if let Some(payment) = payment {
                    validation::validate_non_empty_string("payment", payment)?;
                }
            }
            Command::Table {
                output: Some(output),
                ..
            } => {
                validation::validate_path("output", &output.to_string_lossy())?;
            }
            _ => {}
        }

        Ok(())
    }
}
