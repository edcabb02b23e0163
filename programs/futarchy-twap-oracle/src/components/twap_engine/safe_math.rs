use crate::error::OracleError;
use anchor_lang::prelude::*;
use ethnum::U256;

/// Price in fixed-point quote units (see `PRICE_SCALE`).
pub type Price = u128;

/// Oracle clock value in milliseconds.
pub type Timestamp = u64;

/// Double-width accumulator for price × time integrals.
///
/// # Width Rationale
///
/// Prices occupy up to 128 bits and durations up to 64 bits, so a single
/// price-time product needs at most 192 bits. The remaining headroom lets the
/// closed-form ramp multiply window counts in the billions by the window size
/// without leaving 256-bit space. Every operation is still checked: an
/// out-of-range result is a hard `ArithmeticOverflow`, never a wrap.
pub type WideInt = U256;

#[inline(always)]
pub fn wide(value: u128) -> WideInt {
    U256::from(value)
}

#[inline]
pub fn wide_add(a: WideInt, b: WideInt) -> Result<WideInt> {
    a.checked_add(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

#[inline]
pub fn wide_sub(a: WideInt, b: WideInt) -> Result<WideInt> {
    a.checked_sub(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

#[inline]
pub fn wide_mul(a: WideInt, b: WideInt) -> Result<WideInt> {
    a.checked_mul(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

/// Floor division; a zero divisor is reported as an arithmetic failure.
#[inline]
pub fn wide_div(a: WideInt, b: WideInt) -> Result<WideInt> {
    a.checked_div(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

/// `price * duration` in 256-bit space.
#[inline]
pub fn price_time_product(price: Price, duration: Timestamp) -> Result<WideInt> {
    wide_mul(wide(price), wide(duration as u128))
}

/// Narrows a wide value back into price space.
#[inline]
pub fn narrow_to_price(value: WideInt) -> Result<Price> {
    let (hi, lo) = value.into_words();
    require!(hi == 0, OracleError::ArithmeticOverflow);
    Ok(lo)
}

/// Like `narrow_to_price` but clamps at `u128::MAX` instead of failing.
#[inline]
pub fn saturating_narrow(value: WideInt) -> Price {
    let (hi, lo) = value.into_words();
    if hi == 0 {
        lo
    } else {
        Price::MAX
    }
}

/// `floor(numerator / denominator)` narrowed into price space.
///
/// This is the only division used when deriving averages. It deliberately
/// truncates, so averages are biased down by strictly less than one unit.
#[inline]
pub fn floor_div_to_price(numerator: WideInt, denominator: u64) -> Result<Price> {
    let quotient = wide_div(numerator, wide(denominator as u128))?;
    narrow_to_price(quotient)
}

#[inline]
pub fn checked_time_add(a: Timestamp, b: Timestamp) -> Result<Timestamp> {
    a.checked_add(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}

#[inline]
pub fn checked_time_mul(a: Timestamp, b: Timestamp) -> Result<Timestamp> {
    a.checked_mul(b)
        .ok_or_else(|| error!(OracleError::ArithmeticOverflow))
}
