use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Side;

/// Execution pipeline errors. Every stage fails fast; an order is either
/// fully built, signed and submitted/simulated, or not produced at all.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("missing configuration: {0}")]
    Configuration(String),

    #[error("market not found: {0}")]
    NotFound(String),

    #[error("invalid order request: {0}")]
    Validation(String),

    #[error("no orderbook available for token {token_id} (market={market_id}); likely no liquidity or wrong chain/token")]
    LiquidityUnavailable { token_id: String, market_id: String },

    #[error("{side} price {limit_price} breaches slippage guard {allowed}")]
    SlippageExceeded {
        side: Side,
        limit_price: Decimal,
        allowed: Decimal,
    },

    #[error("order notional {notional} exceeds cap {cap}")]
    LimitExceeded { notional: Decimal, cap: Decimal },

    #[error("order signing failed: {0}")]
    Signing(String),

    #[error("order submit failed {status}: {body}")]
    Submission { status: u16, body: String },
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Transport-level failure from the CLOB client. Carries enough to be mapped
/// into the owning stage's `ExecutorError` class without re-probing the venue.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context} returned status {status}: {body}")]
    Status {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("{context}: {message}")]
    Transport {
        context: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn status(context: &'static str, status: u16, body: String) -> Self {
        Self::Status {
            context,
            status,
            body,
        }
    }

    pub fn transport(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            context,
            message: err.to_string(),
        }
    }
}
