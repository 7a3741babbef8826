// src/main.rs

use anyhow::Context;
use chrono::Duration as ChronoDuration;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tocookie::Config;

/// Mint, verify and refresh signed session cookies.
///
/// The secret and default TTL come from TOCOOKIE_SECRET / TOCOOKIE_TTL.
#[derive(Parser)]
#[command(name = "tocookie", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a token for an identity
    Mint {
        identity: String,
        /// Validity in seconds, overriding TOCOOKIE_TTL
        #[arg(long, conflicts_with = "expires")]
        ttl: Option<u32>,
        /// Absolute expiry, Unix seconds
        #[arg(long)]
        expires: Option<i64>,
    },
    /// Verify a token and print its payload as JSON
    Verify { token: String },
    /// Verify a token and print a fresh one for the same identity
    Refresh { token: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env().context("loading configuration")?;
    let mut codec = cfg.codec();

    match cli.command {
        Command::Mint {
            identity,
            ttl,
            expires,
        } => {
            if let Some(ttl) = ttl {
                codec = codec.with_validity(ChronoDuration::seconds(i64::from(ttl)));
            }
            let token = match expires {
                Some(at) => codec.mint_until(&identity, at)?,
                None => codec.mint(&identity)?,
            };
            println!("{token}");
        }
        Command::Verify { token } => {
            let record = codec.parse(token.trim()).context("token rejected")?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Refresh { token } => {
            let record = codec.parse(token.trim()).context("token rejected")?;
            println!("{}", codec.refresh(&record)?);
        }
    }

    Ok(())
}
