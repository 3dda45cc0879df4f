use crate::clob::ClobApi;
use crate::error::{ExecutorError, ExecutorResult};
use crate::types::{OrderBookSnapshot, OutcomeToken};

/// Which candidate token ultimately produced a book.
#[derive(Debug)]
pub enum BookFetch {
    Primary(OrderBookSnapshot),
    Sibling {
        index: usize,
        token_id: String,
        snapshot: OrderBookSnapshot,
    },
}

impl BookFetch {
    pub fn into_snapshot(self) -> OrderBookSnapshot {
        match self {
            BookFetch::Primary(s) => s,
            BookFetch::Sibling { snapshot, .. } => snapshot,
        }
    }
}

/// Fetch the book for `token_id`. When the primary fetch fails and a sibling
/// token list is available, the remaining tokens are tried in their listing
/// order and the first live book wins. A sibling hit on an index other than
/// the desired outcome is a degraded match and is surfaced, not silently
/// substituted.
pub async fn fetch_book(
    api: &dyn ClobApi,
    market_id: &str,
    token_id: &str,
    siblings: Option<&[OutcomeToken]>,
    desired_index: Option<usize>,
) -> ExecutorResult<BookFetch> {
    match api.book(token_id).await {
        Ok(snapshot) => return Ok(BookFetch::Primary(snapshot)),
        Err(e) => {
            tracing::warn!(token_id = %token_id, error = %e, "primary book fetch failed");
        }
    }

    if let Some(tokens) = siblings {
        for (idx, t) in tokens.iter().enumerate() {
            if t.token_id.is_empty() || t.token_id == token_id {
                continue;
            }
            match api.book(&t.token_id).await {
                Ok(snapshot) => {
                    if desired_index.map_or(false, |want| idx != want) {
                        tracing::warn!(
                            index = idx,
                            token_id = %t.token_id,
                            "degraded match: book found on a different outcome"
                        );
                    }
                    return Ok(BookFetch::Sibling {
                        index: idx,
                        token_id: t.token_id.clone(),
                        snapshot,
                    });
                }
                Err(e) => {
                    tracing::debug!(
                        index = idx,
                        token_id = %t.token_id,
                        error = %e,
                        "sibling book fetch failed"
                    );
                }
            }
        }
    }

    Err(ExecutorError::LiquidityUnavailable {
        token_id: token_id.to_string(),
        market_id: market_id.to_string(),
    })
}
