use std::net::SocketAddr;

use colored::Colorize;

use pwhash_server::{HashServer, ServerConfig};

use crate::cli::{Cli, Command, HashArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    println!("{}", pwhash_crypto::hashify(&args.password));
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    println!(
        "{} pwhash server on {} (delay {} ms, {} mode)",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        config.hash_delay_ms,
        config.response_mode.to_string().cyan(),
    );
    println!(
        "  Stop with {} or Ctrl-C; in-flight hashes finish first.",
        "PUT /shutdown".yellow()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(HashServer::new(config).serve())?;
    println!("{} drained and stopped", "✓".green().bold());
    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    let ip = args.bind.unwrap_or(config.bind_addr.ip());
    let port = args.port.unwrap_or(config.bind_addr.port());
    config.bind_addr = SocketAddr::new(ip, port);
    if let Some(ms) = args.delay_ms {
        config.hash_delay_ms = ms;
    }
    if let Some(mode) = args.mode {
        config.response_mode = mode.into();
    }
    tracing::debug!(?config, "resolved server config");
    Ok(config)
}
