use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire encoding: 0 = buy, 1 = sell.
    pub fn as_wire(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

/// One tradeable outcome of a market. Position within `Market::tokens` is
/// meaningful: index i is outcome i (0 = "Yes" on binary markets).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeToken {
    pub token_id: String,
    pub outcome: String,
}

/// Market metadata as normalized from the CLOB, fetched fresh per call.
/// `id` is the venue's listing id; it participates in identifier matching
/// alongside `condition_id` and `question_id` but is otherwise unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub condition_id: String,
    pub question_id: String,
    pub id: String,
    pub tokens: Vec<OutcomeToken>,
}

impl Market {
    /// Case-insensitive match against any of the market's identifiers.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.condition_id.to_lowercase() == needle
            || self.id.to_lowercase() == needle
            || self.question_id.to_lowercase() == needle
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub size: Decimal,
}

/// Ephemeral bid/ask ladder for one outcome token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    // Computed rather than trusting venue ordering.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.iter().map(|l| l.price).max()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.iter().map(|l| l.price).min()
    }
}

/// Inbound contract from the routing layer: one resolved hedging decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub market_id: String,
    pub outcome_index: usize,
    pub side: Side,
    pub size: Decimal,
    pub limit_price: Decimal,
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
    #[serde(default)]
    pub max_slippage_bps: Option<i64>,
    #[serde(default)]
    pub dry_run: bool,
    /// Skips market resolution entirely when set.
    #[serde(default)]
    pub token_id: Option<String>,
}

/// Canonical wire payload. `price` and `size` are the decimal values scaled
/// by 10^6 and serialized as integer strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBody {
    pub token_id: String,
    pub side: u8,
    pub price: String,
    pub size: String,
    pub expiration: i64,
    pub salt: String,
    #[serde(rename = "feeRateBps")]
    pub fee_rate_bps: u32,
    pub maker: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedOrder {
    #[serde(flatten)]
    pub body: OrderBody,
    pub signature: String,
}

/// Outbound contract: everything the caller needs to audit the execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub maker: String,
    pub market_id: String,
    pub token_id: String,
    pub outcome_index: usize,
    pub side: Side,
    pub size: Decimal,
    pub limit_price: Decimal,
    pub used_price: Decimal,
    pub outcomes: Vec<String>,
    pub order_body: OrderBody,
    pub signature: String,
    pub response: serde_json::Value,
}
