use rust_decimal::Decimal;

use crate::decimal::{round_half_up, Money, Rate};
use crate::errors::{CalculatorError, Result};

/// level (annuity) payment that amortizes `balance` over `periods`
///
/// `payment = B * [r / (1 - (1+r)^-n)]`, the same factor as `r(1+r)^n / ((1+r)^n - 1)`
/// but with a discount term that shrinks towards zero instead of growing. The
/// factor is rounded half-up to `scale` places and the payment to cents. A zero
/// rate spreads the balance evenly.
pub fn level_payment(balance: Money, period_rate: Rate, periods: u32, scale: u32) -> Result<Money> {
    if periods == 0 {
        return Ok(balance);
    }

    let r = period_rate.as_decimal();
    if r.is_zero() {
        return Ok(Money::from_decimal(balance.as_decimal() / Decimal::from(periods)));
    }

    let discount = discount_factor(r, periods)?;
    let factor = r
        .checked_div(Decimal::ONE - discount)
        .ok_or_else(|| overflow(periods))?;

    let payment = balance
        .as_decimal()
        .checked_mul(round_half_up(factor, scale))
        .ok_or_else(|| overflow(periods))?;

    Ok(Money::from_decimal(payment))
}

/// (1 + r)^-n by repeated division
fn discount_factor(r: Decimal, periods: u32) -> Result<Decimal> {
    let base = Decimal::ONE + r;
    let mut discount = Decimal::ONE;
    for _ in 0..periods {
        discount = discount.checked_div(base).ok_or_else(|| overflow(periods))?;
    }
    Ok(discount)
}

fn overflow(periods: u32) -> CalculatorError {
    CalculatorError::CalculationError {
        message: format!("annuity factor over {} periods is not representable", periods),
    }
}
