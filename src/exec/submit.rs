use serde_json::json;

use crate::clob::ClobApi;
use crate::error::{ApiError, ExecutorError, ExecutorResult};
use crate::types::SignedOrder;

/// Post the signed order to the venue, or echo it back tagged as simulated
/// without touching the network in dry-run mode.
pub async fn submit_order(
    api: &dyn ClobApi,
    order: &SignedOrder,
    dry_run: bool,
) -> ExecutorResult<serde_json::Value> {
    if dry_run {
        tracing::info!("dry run: order not submitted");
        return Ok(json!({ "dryRun": true, "payload": order }));
    }

    api.submit_order(order).await.map_err(|e| match e {
        ApiError::Status { status, body, .. } => ExecutorError::Submission { status, body },
        // status 0 marks "venue unreachable" as opposed to an HTTP rejection
        ApiError::Transport { message, .. } => ExecutorError::Submission {
            status: 0,
            body: message,
        },
    })
}
