pub mod amortization;
pub mod repeating;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::loan::EarlyPayment;

pub use amortization::{next_payment_date, AmortizationEngine};
pub use repeating::{expand_early_payments, repeated};

/// one row of the amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// 0-based period index
    pub payment_number: u32,
    /// balance before this period's principal is deducted
    pub loan_balance: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// principal plus interest
    pub payment_amount: Money,
    /// early payment applied in this period, zero when none
    pub additional_payment: Money,
    pub payment_date: Option<NaiveDate>,
}

impl MonthlyPayment {
    /// balance left after this payment
    pub fn ending_balance(&self) -> Money {
        self.loan_balance - self.principal_portion
    }

    /// turn this row into the one that pays the loan off exactly, dated on
    /// the period that was cut off
    pub(crate) fn close_out(&mut self, payment_date: Option<NaiveDate>) {
        self.principal_portion = self.loan_balance;
        self.payment_amount = self.loan_balance + self.interest_portion;
        self.payment_date = payment_date;
    }
}

/// calculated amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAmortization {
    /// level payment computed at the start of the loan
    pub monthly_payment_amount: Money,
    /// total interest paid over the schedule
    pub overpayment_amount: Money,
    pub monthly_payments: Vec<MonthlyPayment>,
    /// early payments after repeating strategies were resolved
    pub early_payments: BTreeMap<u32, EarlyPayment>,
}

impl LoanAmortization {
    /// get payment for a 0-based payment number
    pub fn payment(&self, payment_number: u32) -> Option<&MonthlyPayment> {
        self.monthly_payments.get(payment_number as usize)
    }

    /// number of months actually needed to repay the loan
    pub fn term_months(&self) -> u32 {
        self.monthly_payments.len() as u32
    }

    pub fn total_principal(&self) -> Money {
        self.monthly_payments.iter().map(|p| p.principal_portion).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.monthly_payments.iter().map(|p| p.payment_amount).sum()
    }

    /// remaining balance after the given payment, `None` past the end of the schedule
    pub fn balance_after_payment(&self, payment_number: u32) -> Option<Money> {
        self.payment(payment_number).map(|p| p.ending_balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: u32, balance: i64, principal: i64, interest: i64) -> MonthlyPayment {
        MonthlyPayment {
            payment_number: number,
            loan_balance: Money::from_minor(balance),
            principal_portion: Money::from_minor(principal),
            interest_portion: Money::from_minor(interest),
            payment_amount: Money::from_minor(principal + interest),
            additional_payment: Money::ZERO,
            payment_date: None,
        }
    }

    #[test]
    fn test_close_out_pays_exact_balance() {
        let mut payment = row(3, 1_000_00, 1_200_00, 5_00);
        assert!(payment.ending_balance().is_negative());

        let cut_off = NaiveDate::from_ymd_opt(2024, 5, 31);
        payment.close_out(cut_off);
        assert_eq!(payment.principal_portion, Money::from_minor(1_000_00));
        assert_eq!(payment.payment_amount, Money::from_minor(1_005_00));
        assert_eq!(payment.payment_date, cut_off);
        assert!(payment.ending_balance().is_zero());
    }

    #[test]
    fn test_schedule_totals() {
        let schedule = LoanAmortization {
            monthly_payment_amount: Money::from_minor(505_00),
            overpayment_amount: Money::from_minor(15_00),
            monthly_payments: vec![row(0, 1_000_00, 495_00, 10_00), row(1, 505_00, 505_00, 5_00)],
            early_payments: BTreeMap::new(),
        };

        assert_eq!(schedule.term_months(), 2);
        assert_eq!(schedule.total_principal(), Money::from_minor(1_000_00));
        assert_eq!(schedule.total_paid(), Money::from_minor(1_015_00));
        assert_eq!(schedule.balance_after_payment(0), Some(Money::from_minor(505_00)));
        assert_eq!(schedule.balance_after_payment(1), Some(Money::ZERO));
        assert!(schedule.payment(2).is_none());
    }
}
