use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Rupees carry two decimal places (paise).
pub const DECIMAL_PLACES: u32 = 2;

/// Largest amount a single wire field may carry: one lakh crore rupees.
///
/// Eight earnings components at this cap still sum to an exact paise figure in
/// both `Decimal` and `f64`, so no total can overflow.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Rounds half-up to paise. Banker's rounding is never used for payroll.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a wire amount into a non-negative, paise-rounded `Decimal`.
///
/// NaN, infinities and negative figures all become zero. Anything above
/// [`MAX_AMOUNT`] is clamped to it.
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() || value <= 0.0 {
        return Decimal::ZERO;
    }
    if value > MAX_AMOUNT_F64 {
        tracing::warn!(value, max = %MAX_AMOUNT, "Amount above the maximum, clamping");
        return MAX_AMOUNT;
    }
    Decimal::from_f64(value)
        .map(round_money)
        .unwrap_or_else(|| {
            tracing::warn!(value, "Amount out of decimal range, defaulting to zero");
            Decimal::ZERO
        })
}

const MAX_AMOUNT_F64: f64 = 1e12;

/// Converts a rounded amount back to `f64` for the JSON response.
#[inline]
pub fn amount_to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}
