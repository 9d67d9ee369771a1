use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "payrail")]
#[command(about = "Command line interface for the payrail payments API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, env = "PAYRAIL_PROFILE")]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Tenant id sent as x-tenant-id, overriding the profile
    #[arg(long, global = true)]
    pub tenant: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Payments
    Payments {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Accounts
    Accounts {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Clients
    Clients {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Recipients
    Recipients {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Transfers
    Transfers {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List records
    List {
        /// Filters in key=value format
        #[arg(long, action = clap::ArgAction::Append)]
        filter: Vec<String>,
        /// Page size; 0 fetches every page
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Offset of the first record
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,
        /// Fetch every page
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Fetch one record by id
    Get {
        /// Record ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (url, tenant, timeout)
        key: String,
        /// Configuration value
        value: String,
    },
}
