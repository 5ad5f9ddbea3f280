#![forbid(unsafe_code)]

//! **tales-demo** – wires `tales-claims`, `tales-jwt` and `tales-capability`
//! together for manual smoke-testing: mint a token carrying a capability
//! set, then gate a made-up operation on it. Mirrors `toka-cli`'s
//! `clap`-driven CLI shape, trimmed to the one thing this core actually
//! does.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use tales_capability::prelude::*;
use tales_claims::{ClaimRegistry, ClaimValue, GenerationConfig, SigningAlgorithm};
use tales_jwt::TokenManager;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "tales-demo")]
#[command(about = "Mint and check a capability-bearing JWT")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a token for `subject` carrying the given capabilities, then
    /// immediately check it against `required`.
    Mint {
        /// Subject (`sub` claim).
        #[arg(long)]
        subject: String,
        /// Capabilities to grant, comma-separated (subset of read,write,admin).
        #[arg(long, value_delimiter = ',')]
        grant: Vec<String>,
        /// Capabilities the demo operation requires, comma-separated.
        #[arg(long, value_delimiter = ',')]
        require: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Mint { subject, grant, require } => run_mint(&subject, &grant, &require),
    }
}

fn run_mint(subject: &str, grant: &[String], require: &[String]) -> Result<()> {
    let ops_family = Arc::new(
        CapabilityFamily::builder("ops")
            .capability("read")
            .and_then(|b| b.capability("write"))
            .and_then(|b| b.capability("admin"))
            .context("building the ops capability family")?
            .build(),
    );

    let mut claim_registry = ClaimRegistry::new();
    let mut authz = AuthorizationRegistry::new();
    authz
        .register_claim_family(&mut claim_registry, "ops_caps", ops_family.clone())
        .context("binding ops_caps to the ops family")?;

    let manager = TokenManager::new(claim_registry);
    let secret = b"tales-demo-secret-tales-demo-secret"; // 36 bytes, clears the HS256 minimum

    let granted = CapabilitySet::from_names(ops_family, grant).context("building the granted capability set")?;

    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string(subject));
    claims.insert("ops_caps".to_string(), ClaimValue::Custom(Box::new(granted)));

    let config = GenerationConfig::with_algorithm(SigningAlgorithm::Hs256);
    let token = manager.generate(None, &claims, Some(secret), Some(&config))?;
    info!(serialized = token.serialized(), "minted token");

    let parsed = manager.parse(token.serialized(), Some(secret))?;
    debug!(verified = parsed.verified(), "parsed token back");

    let declaration = authz.declare("ops_caps", require).context("building the access-control declaration")?;
    let decision = authorize(&parsed, &[declaration], &AuthorizeOptions::at(current_unix_time()));

    match &decision {
        Decision::Granted => info!("access granted"),
        Decision::Denied(reason) => info!(%reason, "access denied"),
    }

    Ok(())
}

fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_string()));

    let _ = tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).try_init();
}
