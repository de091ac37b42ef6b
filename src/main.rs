mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use tb_core::config::Config;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // CLI flags win over the config file.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting tablon");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    tb_server::start(config)
        .await
        .context("server terminated with an error")
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        anyhow::bail!("no config file given; pass one as an argument or with --config");
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = Config::from_json(&contents)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid: {}", path.display());
    } else {
        println!("Configuration has {} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tablon=debug,tb_server=debug,tb_store=debug,tb_core=debug,tower_http=debug".to_string()
        } else {
            "tablon=info,tb_server=info,tb_store=info,tb_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("tablon {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
