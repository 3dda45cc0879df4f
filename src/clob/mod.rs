pub mod http;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{Market, OrderBookSnapshot, SignedOrder};

/// Cursor value the venue uses to mark the end of the market listing.
pub const END_CURSOR: &str = "LTE=";

#[derive(Debug, Clone)]
pub struct MarketsPage {
    pub data: Vec<Market>,
    pub next_cursor: String,
}

/// Venue client seam. One implementation speaks HTTP to the CLOB; tests
/// substitute their own. An instance is constructed explicitly and handed to
/// the engine rather than living in process-wide state.
#[async_trait]
pub trait ClobApi: Send + Sync {
    /// Point lookup by market identifier. `Ok(None)` when the venue does not
    /// recognize the id; the resolver falls back to the listing scan.
    async fn market(&self, id: &str) -> Result<Option<Market>, ApiError>;

    /// One page of the full market listing; the empty cursor starts the scan.
    async fn markets(&self, cursor: &str) -> Result<MarketsPage, ApiError>;

    /// Live bid/ask ladder for one outcome token.
    async fn book(&self, token_id: &str) -> Result<OrderBookSnapshot, ApiError>;

    /// Post the signed payload; returns the venue's parsed response.
    async fn submit_order(&self, order: &SignedOrder) -> Result<serde_json::Value, ApiError>;
}

pub use http::HttpClobClient;
