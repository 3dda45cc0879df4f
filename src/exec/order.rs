use alloy::primitives::Address;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::types::{OrderBody, Side};

/// Scale a decimal amount to the venue's 10^6 fixed point, rounded half-up,
/// serialized as an integer string.
pub fn to_base_units(amount: Decimal) -> String {
    (amount * dec!(1_000_000))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Assemble the canonical wire payload. Pure except for the clock and the
/// salt: the salt is 128 fresh random bits per call, never derived from the
/// order content, so otherwise-identical orders never share a signature.
pub fn build_order_body(
    maker: Address,
    token_id: &str,
    side: Side,
    price: Decimal,
    size: Decimal,
    ttl_seconds: i64,
    chain_id: u64,
) -> OrderBody {
    let expiration = chrono::Utc::now().timestamp() + ttl_seconds;
    OrderBody {
        token_id: token_id.to_string(),
        side: side.as_wire(),
        price: to_base_units(price),
        size: to_base_units(size),
        expiration,
        salt: Uuid::new_v4().simple().to_string(),
        fee_rate_bps: 0,
        maker: maker.to_string(),
        chain_id,
    }
}
