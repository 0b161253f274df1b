//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use packgauge_domain::model::ContainerKind;
use packgauge_types::{Entity, Metric, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packgauge")]
#[command(version)]
#[command(about = "Weight and capacity gauge for bags and suitcases")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Store directory override
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Container kind as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Bag,
    Suitcase,
}

impl From<KindArg> for ContainerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bag => ContainerKind::Bag,
            KindArg::Suitcase => ContainerKind::Suitcase,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Store(StoreCommand),

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set number field override file (TOML)
        #[arg(long)]
        set_fields: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Commands that open the packing store
#[derive(Subcommand)]
pub enum StoreCommand {
    /// Manage containers
    #[command(subcommand)]
    Container(ContainerCommand),

    /// Manage the item catalogue
    #[command(subcommand)]
    Item(ItemCommand),

    /// Add items to a container (all or nothing)
    Add {
        /// Container ID
        container: String,

        /// Item IDs
        #[arg(required = true)]
        items: Vec<String>,

        /// Units of each item
        #[arg(long, short = 'q', default_value_t = 1)]
        quantity: u32,
    },

    /// Check whether items would fit, without adding them
    Check {
        /// Container ID
        container: String,

        /// Item IDs
        #[arg(required = true)]
        items: Vec<String>,

        /// Units of each item
        #[arg(long, short = 'q', default_value_t = 1)]
        quantity: u32,
    },

    /// Remove units of an item from a container
    Remove {
        /// Container ID
        container: String,

        /// Item ID
        item: String,

        /// Units to remove
        #[arg(long, short = 'q', default_value_t = 1)]
        quantity: u32,
    },

    /// Validate a numeric range filter
    Filter {
        entity: Entity,

        metric: Metric,

        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ContainerCommand {
    /// Create a bag or suitcase
    Create {
        name: String,

        #[arg(long, value_enum, default_value_t = KindArg::Bag)]
        kind: KindArg,

        /// Weight limit for contents (kg)
        #[arg(long)]
        max_weight: f64,

        /// Capacity limit (L)
        #[arg(long)]
        max_capacity: f64,

        /// Empty container weight (kg)
        #[arg(long, default_value_t = 0.0)]
        tare: f64,
    },

    /// Show a container with its metrics
    Show {
        /// Container ID
        id: String,
    },

    /// List all containers
    List,
}

#[derive(Subcommand)]
pub enum ItemCommand {
    /// Add an item to the catalogue
    Create {
        name: String,

        /// Per-unit weight
        #[arg(long)]
        weight: f64,

        /// Weight unit (kg, g, lb, oz)
        #[arg(long, default_value = "kg")]
        weight_unit: String,

        /// Per-unit volume
        #[arg(long)]
        volume: f64,

        /// Volume unit (L, mL, cm3, in3)
        #[arg(long, default_value = "L")]
        volume_unit: String,
    },

    /// List catalogue items
    List,

    /// Import items from CSV (name, weight, weight_unit, volume, volume_unit)
    Import {
        file: PathBuf,

        /// Parse only, do not store
        #[arg(long)]
        dry_run: bool,
    },
}
