use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pwhash_server::ResponseMode;

#[derive(Parser)]
#[command(
    name = "pwhash",
    about = "Password hashing server with graceful drain",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP hashing server
    Serve(ServeArgs),
    /// Print the encoded SHA-512 digest of a password
    Hash(HashArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Answer submissions with a retrieval key
    Deferred,
    /// Answer submissions with the digest itself
    Synchronous,
}

impl From<ModeArg> for ResponseMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Deferred => ResponseMode::Deferred,
            ModeArg::Synchronous => ResponseMode::Synchronous,
        }
    }
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    pub port: Option<u16>,
    /// Address to bind (the port comes from PORT or the config)
    #[arg(long)]
    pub bind: Option<IpAddr>,
    /// Artificial delay before each hash, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    /// TOML config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Clear-text password
    pub password: String,
}
