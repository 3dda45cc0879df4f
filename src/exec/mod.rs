pub mod book;
pub mod order;
pub mod price;
pub mod resolver;
pub mod signer;
pub mod submit;

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::clob::ClobApi;
use crate::config::Settings;
use crate::error::{ExecutorError, ExecutorResult};
use crate::types::{ExecutionResult, OrderBookSnapshot, OrderRequest, SignedOrder};

/// The order execution engine. Holds nothing but the injected venue client
/// and settings; every execution builds its state fresh on the stack,
/// including the signing credential.
pub struct OrderExecutor {
    api: Arc<dyn ClobApi>,
    settings: Settings,
}

impl OrderExecutor {
    pub fn new(api: Arc<dyn ClobApi>, settings: Settings) -> Self {
        Self { api, settings }
    }

    /// Run the full pipeline for one order request. Stages are strictly
    /// sequential and fail fast: an order is either fully built, signed and
    /// submitted (or simulated), or not produced at all.
    pub async fn execute(&self, req: &OrderRequest) -> ExecutorResult<ExecutionResult> {
        tracing::info!(
            market_id = %req.market_id,
            outcome = req.outcome_index,
            side = %req.side,
            size = %req.size,
            limit = %req.limit_price,
            dry_run = req.dry_run,
            "executing order"
        );

        // Everything up to resolution runs before the first network call.
        let signing = self.settings.signing()?;
        validate(req)?;

        // The cap is checked against the requested limit, not the
        // post-guard price: a pre-flight bound independent of book state.
        let notional = req.size * req.limit_price;
        if notional > self.settings.max_order_notional {
            return Err(ExecutorError::LimitExceeded {
                notional,
                cap: self.settings.max_order_notional,
            });
        }

        let signer = signer::parse_signer(&signing.private_key)?;
        let maker = signer.address();
        tracing::debug!(maker = %maker, "maker address derived");

        // 1) Resolve the outcome token, unless the caller pinned one.
        let (token_id, outcomes, siblings) = match &req.token_id {
            Some(tid) => {
                tracing::debug!(token_id = %tid, "using provided token id");
                (tid.clone(), vec![], None)
            }
            None => {
                let market = resolver::resolve_market(self.api.as_ref(), &req.market_id).await?;
                let (token_id, outcomes) = resolver::select_outcome(&market, req.outcome_index)?;
                tracing::info!(
                    market_id = %req.market_id,
                    token_id = %token_id,
                    outcomes = ?outcomes,
                    "market resolved"
                );
                (token_id, outcomes, Some(market.tokens))
            }
        };

        // 2) Order book, with sibling fallback and the dry-run override.
        let book = match book::fetch_book(
            self.api.as_ref(),
            &req.market_id,
            &token_id,
            siblings.as_deref(),
            Some(req.outcome_index),
        )
        .await
        {
            Ok(fetch) => fetch.into_snapshot(),
            Err(e) if req.dry_run && self.settings.allow_missing_book => {
                tracing::warn!(error = %e, "orderbook unavailable; dry run continues with empty book");
                OrderBookSnapshot::empty()
            }
            Err(e) => return Err(e),
        };
        tracing::info!(
            top_bid = ?book.best_bid(),
            top_ask = ?book.best_ask(),
            "orderbook fetched"
        );

        // 3) Execution price under the slippage guard.
        let slippage_bps = req
            .max_slippage_bps
            .unwrap_or(self.settings.max_slippage_bps);
        let used_price = price::pick_price(req.side, req.limit_price, &book, slippage_bps)?;

        // 4) Build and sign.
        let ttl = req.ttl_seconds.unwrap_or(self.settings.order_ttl_seconds);
        let body = order::build_order_body(
            maker,
            &token_id,
            req.side,
            used_price,
            req.size,
            ttl,
            self.settings.chain_id,
        );
        let signature = signer::sign_order(&signer, &signing, &body).await?;
        tracing::info!(
            signature_prefix = %&signature[..10.min(signature.len())],
            "order signed"
        );

        // 5) Submit or simulate.
        let signed = SignedOrder {
            body: body.clone(),
            signature: signature.clone(),
        };
        let response = submit::submit_order(self.api.as_ref(), &signed, req.dry_run).await?;
        let preview: String = response.to_string().chars().take(400).collect();
        tracing::debug!(response = %preview, "submission response");

        Ok(ExecutionResult {
            maker: maker.to_string(),
            market_id: req.market_id.clone(),
            token_id,
            outcome_index: req.outcome_index,
            side: req.side,
            size: req.size,
            limit_price: req.limit_price,
            used_price,
            outcomes,
            order_body: body,
            signature,
            response,
        })
    }
}

fn validate(req: &OrderRequest) -> ExecutorResult<()> {
    if req.size <= Decimal::ZERO {
        return Err(ExecutorError::Validation(format!(
            "size must be positive, got {}",
            req.size
        )));
    }
    if req.limit_price <= Decimal::ZERO || req.limit_price >= Decimal::ONE {
        return Err(ExecutorError::Validation(format!(
            "limit price must be inside (0, 1), got {}",
            req.limit_price
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::clob::{ClobApi, MarketsPage};
    use crate::error::ApiError;
    use crate::types::{BookLevel, Market, OrderBookSnapshot, OutcomeToken, SignedOrder};

    pub fn market(condition_id: &str, toks: &[(&str, &str)]) -> Market {
        Market {
            condition_id: condition_id.to_string(),
            question_id: String::new(),
            id: String::new(),
            tokens: toks
                .iter()
                .map(|&(tid, outcome)| OutcomeToken {
                    token_id: tid.to_string(),
                    outcome: outcome.to_string(),
                })
                .collect(),
        }
    }

    pub fn tokens(ids: &[&str]) -> Vec<OutcomeToken> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| OutcomeToken {
                token_id: id.to_string(),
                outcome: format!("outcome_{i}"),
            })
            .collect()
    }

    pub fn page(data: Vec<Market>, next_cursor: &str) -> MarketsPage {
        MarketsPage {
            data,
            next_cursor: next_cursor.to_string(),
        }
    }

    pub fn snapshot(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> OrderBookSnapshot {
        let level = |&(price, size): &(Decimal, Decimal)| BookLevel { price, size };
        OrderBookSnapshot {
            bids: bids.iter().map(level).collect(),
            asks: asks.iter().map(level).collect(),
        }
    }

    /// Scriptable venue double. Pages are addressed by their predecessor's
    /// `next_cursor`; books are keyed by token id, and anything not scripted
    /// fails the way a venue 404 would.
    pub struct MockClob {
        point: Option<Market>,
        pages: Vec<MarketsPage>,
        books: HashMap<String, OrderBookSnapshot>,
        submit_response: serde_json::Value,
        submit_failure: Option<(u16, String)>,
        pub pages_fetched: AtomicUsize,
        pub submissions: AtomicUsize,
        book_log: Mutex<Vec<String>>,
    }

    impl MockClob {
        pub fn new() -> Self {
            Self {
                point: None,
                pages: vec![],
                books: HashMap::new(),
                submit_response: serde_json::json!({"orderId": "mock-1", "status": "live"}),
                submit_failure: None,
                pages_fetched: AtomicUsize::new(0),
                submissions: AtomicUsize::new(0),
                book_log: Mutex::new(vec![]),
            }
        }

        pub fn with_point(mut self, m: Market) -> Self {
            self.point = Some(m);
            self
        }

        pub fn with_pages(mut self, pages: Vec<MarketsPage>) -> Self {
            self.pages = pages;
            self
        }

        pub fn with_book(mut self, token_id: &str, book: OrderBookSnapshot) -> Self {
            self.books.insert(token_id.to_string(), book);
            self
        }

        pub fn with_submit_failure(mut self, status: u16, body: &str) -> Self {
            self.submit_failure = Some((status, body.to_string()));
            self
        }

        pub fn book_requests(&self) -> Vec<String> {
            self.book_log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClobApi for MockClob {
        async fn market(&self, _id: &str) -> Result<Option<Market>, ApiError> {
            Ok(self.point.clone())
        }

        async fn markets(&self, cursor: &str) -> Result<MarketsPage, ApiError> {
            self.pages_fetched.fetch_add(1, Ordering::SeqCst);
            let idx: usize = if cursor.is_empty() {
                0
            } else {
                cursor.parse().expect("mock cursors are page indexes")
            };
            self.pages
                .get(idx)
                .cloned()
                .ok_or_else(|| ApiError::status("GET /markets", 404, "page out of range".into()))
        }

        async fn book(&self, token_id: &str) -> Result<OrderBookSnapshot, ApiError> {
            self.book_log.lock().unwrap().push(token_id.to_string());
            self.books
                .get(token_id)
                .cloned()
                .ok_or_else(|| ApiError::status("GET /book", 404, "no orderbook".into()))
        }

        async fn submit_order(&self, _order: &SignedOrder) -> Result<serde_json::Value, ApiError> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            if let Some((status, body)) = &self.submit_failure {
                return Err(ApiError::status("POST /orders", *status, body.clone()));
            }
            Ok(self.submit_response.clone())
        }
    }
}
