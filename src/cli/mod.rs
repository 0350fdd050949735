pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A terminal news reader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a page of top headlines
    Headlines {
        /// Category filter (general, business, technology, sports,
        /// entertainment, health, science)
        #[arg(short, long, default_value = "general")]
        category: String,

        /// Two-letter country code; persisted preference when omitted
        #[arg(long)]
        country: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Search headlines by free text
    Search {
        /// Search term
        query: String,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List bookmarked articles
    Bookmarks,
    /// Print feed analytics: sources, keywords, categories, last 7 days
    Analytics {
        /// Category to analyze
        #[arg(short, long, default_value = "general")]
        category: String,
    },
    /// Launch the TUI
    Tui,
}
