mod clob;
mod config;
mod error;
mod exec;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::clob::HttpClobClient;
use crate::config::Settings;
use crate::exec::OrderExecutor;
use crate::types::{OrderRequest, Side};

/// Execute one hedging order against the CLOB, or simulate it with --dry-run.
#[derive(Debug, Parser)]
#[command(name = "polymarket-executor")]
struct Cli {
    /// CLOB condition_id / market id
    #[arg(long)]
    market_id: String,

    /// Outcome index (0 for Yes)
    #[arg(long, default_value_t = 0)]
    outcome_index: usize,

    #[arg(long, value_enum, default_value_t = Side::Buy)]
    side: Side,

    /// Size in shares
    #[arg(long)]
    size: Decimal,

    /// Limit price, inside (0, 1)
    #[arg(long)]
    limit_price: Decimal,

    /// Order lifetime override in seconds
    #[arg(long)]
    ttl_seconds: Option<i64>,

    /// Slippage guard override in basis points
    #[arg(long)]
    max_slippage_bps: Option<i64>,

    /// Build and sign the order but do not submit it
    #[arg(long)]
    dry_run: bool,

    /// Skip market resolution and trade this outcome token directly
    #[arg(long)]
    token_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let api = Arc::new(HttpClobClient::new(settings.clob_host.clone()));
    let executor = OrderExecutor::new(api, settings);

    let req = OrderRequest {
        market_id: cli.market_id,
        outcome_index: cli.outcome_index,
        side: cli.side,
        size: cli.size,
        limit_price: cli.limit_price,
        ttl_seconds: cli.ttl_seconds,
        max_slippage_bps: cli.max_slippage_bps,
        dry_run: cli.dry_run,
        token_id: cli.token_id,
    };

    let result = executor.execute(&req).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
