//! Command-line interface for Cinelog.

use clap::{Parser, Subcommand};

/// Cinelog - a single-admin movie watchlist server
#[derive(Parser)]
#[command(name = "cinelog")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve,

    /// Initialize the database schema
    Initdb {
        /// Drop existing tables before creating the schema
        #[arg(long)]
        drop: bool,
    },

    /// Seed the database with demo data
    Forge,

    /// Create or update the admin account (interactive)
    Admin,
}
