pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roost")]
#[command(about = "Browse and favorite flat listings from the terminal", long_about = None)]
pub struct Cli {
    /// API base URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token to use instead of the saved session
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all listings
    Listings,
    /// Search listings by location, address or pin code
    Search {
        /// Search terms
        query: String,
    },
    /// Show one listing in detail
    Show {
        /// Listing id
        id: String,
    },
    /// List your favorite listings
    Favorites,
    /// Add or remove listings from your favorites
    Toggle {
        /// Listing ids; each one is flipped
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
