pub mod accrual;
pub mod annuity;

use chrono::NaiveDate;
use log::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::validation::LoanTerms;

pub use accrual::{day_count_interest, days_in_month, days_in_year, flat_interest, is_leap_year};
pub use annuity::level_payment;

/// how interest accrues for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestAccrualPolicy {
    /// balance times the per-period rate
    FlatMonthly,
    /// actual days of the month before each payment date, over actual days in that year
    DayCount { annual_rate: Rate, scale: u32 },
}

impl InterestAccrualPolicy {
    /// pick the policy for a loan
    ///
    /// Dated loans with a fixed annual rate count days. A custom rate provider
    /// always accrues at its own per-period rate.
    pub fn for_terms(terms: &LoanTerms, scale: u32) -> Self {
        let policy = match (terms.first_payment_date, terms.rate, &terms.rate_provider) {
            (Some(_), Some(annual_rate), None) => InterestAccrualPolicy::DayCount { annual_rate, scale },
            _ => InterestAccrualPolicy::FlatMonthly,
        };
        debug!("interest accrual policy: {:?}", policy);
        policy
    }

    /// interest owed for one period
    ///
    /// `period_rate` is used by the flat policy; the day-count policy needs the
    /// payment date and falls back to the flat rate without one.
    pub fn interest(&self, balance: Money, period_rate: Rate, payment_date: Option<NaiveDate>) -> Result<Money> {
        let interest = match (self, payment_date) {
            (InterestAccrualPolicy::DayCount { annual_rate, scale }, Some(date)) => {
                day_count_interest(balance, *annual_rate, date, *scale)
            }
            _ => flat_interest(balance, period_rate),
        };

        interest.ok_or_else(|| CalculatorError::CalculationError {
            message: format!("interest on balance {} overflows", balance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorConfig;
    use crate::decimal::RATE_SCALE;
    use crate::loan::LoanSpec;
    use crate::validation::validate;
    use rust_decimal_macros::dec;

    fn terms(loan: &LoanSpec) -> LoanTerms {
        validate(Some(loan), &CalculatorConfig::default()).unwrap()
    }

    fn first_payment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 7, 31).unwrap()
    }

    #[test]
    fn test_policy_selection() {
        let undated = LoanSpec::new(Money::from_major(1_000), Rate::from_percentage(dec!(5)), 12);
        assert_eq!(
            InterestAccrualPolicy::for_terms(&terms(&undated), RATE_SCALE),
            InterestAccrualPolicy::FlatMonthly
        );

        let dated = undated.clone().with_first_payment_date(first_payment());
        assert!(matches!(
            InterestAccrualPolicy::for_terms(&terms(&dated), RATE_SCALE),
            InterestAccrualPolicy::DayCount { .. }
        ));

        let custom = dated.with_rate_provider(|_: u32| Rate::from_decimal(dec!(0.004)));
        assert_eq!(
            InterestAccrualPolicy::for_terms(&terms(&custom), RATE_SCALE),
            InterestAccrualPolicy::FlatMonthly
        );
    }

    #[test]
    fn test_day_count_without_date_falls_back() {
        let policy = InterestAccrualPolicy::DayCount {
            annual_rate: Rate::from_percentage(dec!(5.32)),
            scale: RATE_SCALE,
        };
        let balance = Money::from_major(1_000);
        let rate = Rate::from_decimal(dec!(0.01));

        assert_eq!(policy.interest(balance, rate, None), Ok(Money::from_major(10)));
        assert_ne!(policy.interest(balance, rate, Some(first_payment())), Ok(Money::from_major(10)));
    }

    #[test]
    fn test_interest_overflow_is_an_error() {
        let huge = Money::from_decimal(rust_decimal::Decimal::MAX);
        let result = InterestAccrualPolicy::FlatMonthly.interest(huge, Rate::from_decimal(dec!(3)), None);
        assert!(matches!(result, Err(CalculatorError::CalculationError { .. })));
    }
}
