use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tablon")]
#[command(author, version, about = "Announcement board REST service")]
pub struct Cli {
    /// Path to config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
