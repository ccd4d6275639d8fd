//! Command-line interface for Larder.

mod commands;

use clap::{Parser, Subcommand};

use crate::models::SearchDomain;

/// Larder - grocery and restaurant search with offline fallbacks
#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep the database in memory and cache in-process; nothing is persisted
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    #[command(alias = "web")]
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run a search through the fallback chain
    #[command(alias = "s")]
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
        /// grocery or restaurant
        #[arg(long, short, default_value = "grocery")]
        domain: SearchDomain,
        /// City for restaurant searches
        #[arg(long)]
        city: Option<String>,
        /// Skip the first-word related search
        #[arg(long)]
        no_related: bool,
    },

    /// Show the most searched queries
    Popular {
        #[arg(long, short, default_value = "grocery")]
        domain: SearchDomain,
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// Manage a user's favorites
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },

    /// Check the database and search backend
    Status,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorites
    #[command(alias = "ls")]
    List {
        user_id: String,
        #[arg(long, short, default_value = "grocery")]
        domain: SearchDomain,
    },
    /// Mark an item as favorite
    Add {
        user_id: String,
        identity: String,
        #[arg(long, short, default_value = "grocery")]
        domain: SearchDomain,
    },
    /// Remove an item from favorites
    #[command(alias = "rm")]
    Remove {
        user_id: String,
        identity: String,
        #[arg(long, short, default_value = "grocery")]
        domain: SearchDomain,
    },
}

pub use commands::*;
