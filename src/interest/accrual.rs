use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::{round_half_up, Money, Rate};

/// interest for one period at a flat per-period rate, `None` on overflow
pub fn flat_interest(balance: Money, period_rate: Rate) -> Option<Money> {
    balance.interest_at(period_rate)
}

/// interest for the period ending on `payment_date`, counted in actual days
///
/// The accrual window is the calendar month before the payment date:
/// `balance * annual% * days_in_that_month / (100 * days_in_that_year)`, with
/// the factor rounded to `scale` places before it is applied. The annual rate
/// is used as given, without the rounding applied to monthly rates.
pub fn day_count_interest(balance: Money, annual_rate: Rate, payment_date: NaiveDate, scale: u32) -> Option<Money> {
    let (year, month) = previous_month(payment_date);
    let days = Decimal::from(days_in_month(year, month));
    let year_days = Decimal::from(days_in_year(year));

    // annual% / 100 is the stored fraction
    let factor = round_half_up(
        annual_rate.as_decimal().checked_mul(days)?.checked_div(year_days)?,
        scale,
    );

    balance.as_decimal().checked_mul(factor).map(Money::from_decimal)
}

/// year and month of the calendar month preceding `date`
pub fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// check if year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::RATE_SCALE;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(date(2015, 1, 31)), (2014, 12));
        assert_eq!(previous_month(date(2014, 7, 2)), (2014, 6));
    }

    #[test]
    fn test_day_count_interest_uses_prior_month() {
        let balance = Money::from_major(1_500_000);
        let rate = Rate::from_percentage(dec!(5.32));

        // july payment accrues over june: 30 days of 365
        let interest = day_count_interest(balance, rate, date(2014, 7, 31), RATE_SCALE);
        assert_eq!(interest, Some(Money::from_str_exact("6558.90").unwrap()));

        // march payment accrues over a leap february
        let leap = day_count_interest(balance, rate, date(2024, 3, 1), RATE_SCALE);
        let plain = day_count_interest(balance, rate, date(2023, 3, 1), RATE_SCALE);
        assert!(leap > plain);
    }

    #[test]
    fn test_flat_interest_rounds_half_up() {
        // 0.005 is a tie and rounds away from zero
        let interest = flat_interest(Money::from_major(1), Rate::from_decimal(dec!(0.005)));
        assert_eq!(interest, Some(Money::from_str_exact("0.01").unwrap()));
    }

    #[test]
    fn test_day_count_uses_full_precision_annual_rate() {
        let balance = Money::from_major(10_000_000_000_000);
        let july = date(2014, 8, 1);

        // 31 days of 365; rounding the fraction to 15 places first would tip the factor up
        let precise = Rate::from_percentage(dec!(3.65000000000055));
        assert_eq!(
            day_count_interest(balance, precise, july, RATE_SCALE),
            Some(Money::from_major(31_000_000_000))
        );

        let rounded = Rate::from_decimal(dec!(0.036500000000006));
        assert_eq!(
            day_count_interest(balance, rounded, july, RATE_SCALE),
            Some(Money::from_str_exact("31000000000.01").unwrap())
        );
    }

    #[test]
    fn test_day_count_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);
        // 5000% a year makes the 31-day factor larger than one
        let rate = Rate::from_percentage(dec!(5000));
        assert_eq!(day_count_interest(huge, rate, date(2014, 8, 1), RATE_SCALE), None);
    }
}
