//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod quote;
pub mod shop;

use clap::{Args, Subcommand};
use techknot_shop::ProductId;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show this category (e.g. "Sensors"); "All" shows everything.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Match text in the name or description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum price in rupees.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Maximum price in rupees.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Hide products that are out of stock.
    #[arg(long)]
    pub in_stock: bool,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product ids to price; repeat an id to add another unit.
    #[arg(required = true)]
    pub ids: Vec<ProductId>,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Product ids to put in the cart before starting.
    #[arg(short, long = "add")]
    pub add: Vec<ProductId>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,

    /// Write a default techknot.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Check the configuration for errors.
    Validate,
}
