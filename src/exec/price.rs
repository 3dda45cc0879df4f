use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ExecutorError, ExecutorResult};
use crate::types::{OrderBookSnapshot, Side};

fn bps(bps: i64) -> Decimal {
    Decimal::from(bps) / dec!(10000)
}

/// Derive the execution price for an order, bounded by the slippage guard.
///
/// The reference is the top ask when buying, the top bid when selling. When
/// the relevant side has no price at all the guard is skipped and the
/// requested limit is used unchanged: availability over protection on an
/// empty or one-sided book.
pub fn pick_price(
    side: Side,
    limit_price: Decimal,
    book: &OrderBookSnapshot,
    max_slippage_bps: i64,
) -> ExecutorResult<Decimal> {
    let best = match side {
        Side::Buy => book.best_ask(),
        Side::Sell => book.best_bid(),
    };
    let Some(best) = best else {
        tracing::warn!(
            side = %side,
            limit = %limit_price,
            "no reference price in book; slippage guard skipped"
        );
        return Ok(limit_price);
    };

    let allowed = match side {
        Side::Buy => best * (dec!(1) + bps(max_slippage_bps)),
        Side::Sell => best * (dec!(1) - bps(max_slippage_bps)),
    };
    let breached = match side {
        Side::Buy => limit_price > allowed,
        Side::Sell => limit_price < allowed,
    };
    if breached {
        return Err(ExecutorError::SlippageExceeded {
            side,
            limit_price,
            allowed,
        });
    }
    Ok(limit_price)
}
