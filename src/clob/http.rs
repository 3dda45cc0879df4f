use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{BookLevel, Market, OrderBookSnapshot, OutcomeToken, SignedOrder};

use super::{ClobApi, MarketsPage};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);
const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
const BOOK_TIMEOUT: Duration = Duration::from_secs(30);
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

const FETCH_SNIPPET: usize = 200;
const SUBMIT_SNIPPET: usize = 400;

/// HTTP client for the CLOB REST API. Owns its `reqwest::Client`; no global
/// handle, no cross-request caches.
#[derive(Clone)]
pub struct HttpClobClient {
    host: String,
    http: reqwest::Client,
}

impl HttpClobClient {
    pub fn new(host: String) -> Self {
        Self {
            host,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), path)
    }
}

fn snippet(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

#[async_trait]
impl ClobApi for HttpClobClient {
    async fn market(&self, id: &str) -> Result<Option<Market>, ApiError> {
        let url = format!("{}/{}", self.url("/markets"), id);
        let resp = self
            .http
            .get(url)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::transport("GET /markets/{id}", e))?;

        if !resp.status().is_success() {
            // Point lookup misses are expected; the caller scans the listing.
            return Ok(None);
        }
        let m: MarketDto = resp
            .json()
            .await
            .map_err(|e| ApiError::transport("decode /markets/{id} json", e))?;
        Ok(Some(m.into_market()))
    }

    async fn markets(&self, cursor: &str) -> Result<MarketsPage, ApiError> {
        let mut url = self.url("/markets");
        if !cursor.is_empty() {
            url = format!("{}?next_cursor={}", url, cursor);
        }

        let resp = self
            .http
            .get(url)
            .timeout(PAGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::transport("GET /markets", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport("read /markets body", e))?;
        if !status.is_success() {
            return Err(ApiError::status(
                "GET /markets",
                status.as_u16(),
                snippet(&body, FETCH_SNIPPET),
            ));
        }

        let page: MarketsPageDto = serde_json::from_str(&body)
            .map_err(|e| ApiError::transport("decode /markets json", e))?;
        Ok(MarketsPage {
            data: page.data.into_iter().map(MarketDto::into_market).collect(),
            next_cursor: page.next_cursor.unwrap_or_default(),
        })
    }

    async fn book(&self, token_id: &str) -> Result<OrderBookSnapshot, ApiError> {
        let resp = self
            .http
            .get(self.url("/book"))
            .query(&[("token_id", token_id)])
            .timeout(BOOK_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::transport("GET /book", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport("read /book body", e))?;
        if !status.is_success() {
            return Err(ApiError::status(
                "GET /book",
                status.as_u16(),
                snippet(&body, FETCH_SNIPPET),
            ));
        }

        let book: BookDto = serde_json::from_str(&body)
            .map_err(|e| ApiError::transport("decode /book json", e))?;
        book.into_snapshot()
    }

    async fn submit_order(&self, order: &SignedOrder) -> Result<serde_json::Value, ApiError> {
        let resp = self
            .http
            .post(self.url("/orders"))
            .json(order)
            .timeout(SUBMIT_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::transport("POST /orders", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport("read /orders body", e))?;
        if !status.is_success() {
            return Err(ApiError::status(
                "POST /orders",
                status.as_u16(),
                snippet(&body, SUBMIT_SNIPPET),
            ));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::transport("decode /orders json", e))
    }
}

// Venue DTOs, normalized into crate types right here so nothing downstream
// probes alternate shapes or key names.

#[derive(Debug, Clone, Deserialize)]
struct MarketsPageDto {
    #[serde(default)]
    data: Vec<MarketDto>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MarketDto {
    #[serde(default)]
    condition_id: String,
    #[serde(default)]
    question_id: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    tokens: Vec<TokenDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenDto {
    #[serde(default)]
    token_id: String,
    #[serde(default)]
    outcome: String,
}

impl MarketDto {
    fn into_market(self) -> Market {
        let tokens = self
            .tokens
            .into_iter()
            .enumerate()
            .map(|(i, t)| OutcomeToken {
                token_id: t.token_id,
                outcome: if t.outcome.is_empty() {
                    format!("outcome_{}", i)
                } else {
                    t.outcome
                },
            })
            .collect();
        Market {
            condition_id: self.condition_id,
            question_id: self.question_id,
            id: self.id,
            tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BookDto {
    #[serde(default)]
    bids: Vec<LevelDto>,
    #[serde(default)]
    asks: Vec<LevelDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct LevelDto {
    price: String,
    size: String,
}

impl BookDto {
    fn into_snapshot(self) -> Result<OrderBookSnapshot, ApiError> {
        let parse = |levels: Vec<LevelDto>| -> Result<Vec<BookLevel>, ApiError> {
            levels
                .into_iter()
                .map(|l| {
                    let price = l
                        .price
                        .parse::<Decimal>()
                        .map_err(|e| ApiError::transport("decode /book price", e))?;
                    let size = l
                        .size
                        .parse::<Decimal>()
                        .map_err(|e| ApiError::transport("decode /book size", e))?;
                    Ok(BookLevel { price, size })
                })
                .collect()
        };
        Ok(OrderBookSnapshot {
            bids: parse(self.bids)?,
            asks: parse(self.asks)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_dto_labels_unnamed_outcomes_by_index() {
        let dto: MarketDto = serde_json::from_str(
            r#"{
                "condition_id": "0xAbC",
                "question_id": "0xQ",
                "tokens": [
                    {"token_id": "111", "outcome": "Yes"},
                    {"token_id": "222"}
                ]
            }"#,
        )
        .unwrap();
        let market = dto.into_market();
        assert_eq!(market.tokens[0].outcome, "Yes");
        assert_eq!(market.tokens[1].outcome, "outcome_1");
        assert!(market.matches("0xabc"));
        assert!(market.matches("0xq"));
        assert!(!market.matches("0xother"));
    }

    #[test]
    fn book_dto_parses_decimal_strings() {
        let dto: BookDto = serde_json::from_str(
            r#"{"bids": [{"price": "0.45", "size": "120"}], "asks": [{"price": "0.55", "size": "80.5"}]}"#,
        )
        .unwrap();
        let snap = dto.into_snapshot().unwrap();
        assert_eq!(snap.best_bid().unwrap().to_string(), "0.45");
        assert_eq!(snap.best_ask().unwrap().to_string(), "0.55");
    }

    #[test]
    fn book_dto_rejects_garbage_prices() {
        let dto: BookDto =
            serde_json::from_str(r#"{"bids": [{"price": "abc", "size": "1"}], "asks": []}"#)
                .unwrap();
        assert!(dto.into_snapshot().is_err());
    }

    #[test]
    fn missing_sides_decode_as_empty() {
        let dto: BookDto = serde_json::from_str(r#"{}"#).unwrap();
        let snap = dto.into_snapshot().unwrap();
        assert!(snap.bids.is_empty() && snap.asks.is_empty());
        assert!(snap.best_bid().is_none());
    }
}
