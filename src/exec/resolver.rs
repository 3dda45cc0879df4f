use crate::clob::{ClobApi, END_CURSOR};
use crate::error::{ExecutorError, ExecutorResult};
use crate::types::Market;

/// Resolve a market identifier to its CLOB metadata.
///
/// Fast path is the venue's point lookup; a miss or failure there falls back
/// to a full cursor-paginated scan of the listing, matching the identifier
/// against condition/listing/question ids case-insensitively. The venue's
/// point lookup can lag the listing, so the scan is the resilience path, not
/// an error path.
pub async fn resolve_market(api: &dyn ClobApi, market_id: &str) -> ExecutorResult<Market> {
    let needle = market_id.to_lowercase();

    match api.market(&needle).await {
        Ok(Some(m)) if m.matches(&needle) => {
            tracing::debug!(market_id = %market_id, "matched via point lookup");
            return Ok(m);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(market_id = %market_id, error = %e, "point lookup failed; scanning listing")
        }
    }

    let mut cursor = String::new();
    loop {
        tracing::debug!(cursor = %cursor, "fetching markets page");
        let page = api
            .markets(&cursor)
            .await
            .map_err(|e| ExecutorError::NotFound(format!("{market_id} ({e})")))?;

        if let Some(m) = page.data.into_iter().find(|m| m.matches(&needle)) {
            tracing::debug!(
                market_id = %market_id,
                condition_id = %m.condition_id,
                "matched in listing scan"
            );
            return Ok(m);
        }

        if page.next_cursor.is_empty() || page.next_cursor == END_CURSOR {
            break;
        }
        cursor = page.next_cursor;
    }

    Err(ExecutorError::NotFound(market_id.to_string()))
}

/// Pick the outcome token at `outcome_index`, returning its id and the full
/// ordered label list for the caller's audit trail.
pub fn select_outcome(
    market: &Market,
    outcome_index: usize,
) -> ExecutorResult<(String, Vec<String>)> {
    if market.tokens.is_empty() {
        return Err(ExecutorError::Validation(format!(
            "market {} has no outcome tokens",
            market.condition_id
        )));
    }
    let token = market.tokens.get(outcome_index).ok_or_else(|| {
        ExecutorError::Validation(format!(
            "outcome index {} out of range (len {})",
            outcome_index,
            market.tokens.len()
        ))
    })?;
    if token.token_id.is_empty() {
        return Err(ExecutorError::Validation(format!(
            "missing token id for outcome index {outcome_index}"
        )));
    }
    let labels = market.tokens.iter().map(|t| t.outcome.clone()).collect();
    Ok((token.token_id.clone(), labels))
}
