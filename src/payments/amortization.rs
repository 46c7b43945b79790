use chrono::{Datelike, NaiveDate};
use log::{debug, trace, warn};
use std::collections::BTreeMap;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{days_in_month, level_payment, InterestAccrualPolicy};
use crate::loan::EarlyPayment;
use crate::payments::{LoanAmortization, MonthlyPayment};
use crate::types::EarlyPaymentStrategy;
use crate::validation::LoanTerms;

/// builds the month-by-month schedule for verified loan terms
pub struct AmortizationEngine<'a> {
    terms: &'a LoanTerms,
    early_payments: BTreeMap<u32, EarlyPayment>,
    policy: InterestAccrualPolicy,
    rate_scale: u32,
}

impl<'a> AmortizationEngine<'a> {
    /// `early_payments` must already be resolved (see `expand_early_payments`)
    pub fn new(terms: &'a LoanTerms, early_payments: BTreeMap<u32, EarlyPayment>, rate_scale: u32) -> Self {
        Self {
            terms,
            early_payments,
            policy: InterestAccrualPolicy::for_terms(terms, rate_scale),
            rate_scale,
        }
    }

    /// calculate full amortization schedule
    pub fn calculate(self) -> Result<LoanAmortization> {
        let terms = self.terms;
        let term = terms.term;

        let monthly_rate = terms.rate.map(|rate| rate.monthly_rate(self.rate_scale));
        if let Some(rate) = monthly_rate {
            debug!("monthly interest rate: {}", rate.as_decimal());
        }

        // without a fixed rate the first period's custom rate sets the initial payment
        let initial_rate = monthly_rate.unwrap_or_else(|| self.period_rate(0, None));
        let initial_payment = level_payment(terms.amount, initial_rate, term, self.rate_scale)?;
        debug!("monthly payment amount: {} over {} months", initial_payment, term);

        let mut level_amount = initial_payment;
        let mut balance = terms.amount;
        let mut overpayment = Money::ZERO;
        let mut decrease_term_total = Money::ZERO;
        let mut payment_date = terms.first_payment_date;
        let mut payments: Vec<MonthlyPayment> = Vec::with_capacity(term as usize);

        for payment_number in 0..term {
            let period_rate = self.period_rate(payment_number, monthly_rate);
            let interest = self.policy.interest(balance, period_rate, payment_date)?;

            // an early payment overshot the balance: settle in the previous row and stop
            if interest.is_negative() || balance.is_negative() {
                if let Some(last) = payments.last_mut() {
                    warn!(
                        "balance {} went negative at payment {}, closing the loan at payment {}",
                        balance, payment_number, last.payment_number
                    );
                    last.close_out(payment_date);
                }
                break;
            }

            overpayment = checked(overpayment.checked_add(interest), payment_number)?;

            let early_payment = self.early_payments.get(&payment_number);
            let additional_payment = early_payment.map_or(Money::ZERO, |p| p.amount);

            let principal = if payment_number + 1 == term {
                balance
            } else {
                let scheduled = checked(level_amount.checked_sub(interest), payment_number)?;
                checked(scheduled.checked_add(additional_payment), payment_number)?
            };

            let payment = MonthlyPayment {
                payment_number,
                loan_balance: balance,
                principal_portion: principal,
                interest_portion: interest,
                payment_amount: checked(principal.checked_add(interest), payment_number)?,
                additional_payment,
                payment_date,
            };
            trace!("{:?}", payment);
            payments.push(payment);

            balance = checked(balance.checked_sub(principal), payment_number)?;

            match early_payment.and_then(|p| p.strategy) {
                Some(EarlyPaymentStrategy::DecreaseMonthlyPayment) => {
                    let remaining = term - 1 - payment_number;
                    if remaining > 0 {
                        // decrease-term prepayments so far are added back so they keep shortening the term
                        let base = checked(balance.checked_add(decrease_term_total), payment_number)?;
                        level_amount = level_payment(base, period_rate, remaining, self.rate_scale)?;
                        debug!(
                            "re-amortized {} over {} months after payment {}: {}",
                            base, remaining, payment_number, level_amount
                        );
                    }
                }
                Some(EarlyPaymentStrategy::DecreaseTerm) => {
                    decrease_term_total =
                        checked(decrease_term_total.checked_add(additional_payment), payment_number)?;
                }
                None => {}
            }

            if payment_number + 1 < term {
                if let (Some(first), Some(current)) = (terms.first_payment_date, payment_date) {
                    let next = next_payment_date(first.day(), current).ok_or_else(|| {
                        CalculatorError::CalculationError {
                            message: format!("no payment date after {}", current),
                        }
                    })?;
                    payment_date = Some(next);
                }
            }
        }

        let result = LoanAmortization {
            monthly_payment_amount: initial_payment,
            overpayment_amount: overpayment,
            monthly_payments: payments,
            early_payments: self.early_payments,
        };

        debug!(
            "calculated {} payments, total interest {}",
            result.monthly_payments.len(),
            result.overpayment_amount
        );

        Ok(result)
    }

    /// per-period rate: the custom provider when present, else the fixed monthly rate
    fn period_rate(&self, payment_number: u32, monthly_rate: Option<Rate>) -> Rate {
        match &self.terms.rate_provider {
            Some(provider) => {
                let rate = provider.monthly_rate(payment_number);
                debug!("custom interest rate for payment {} is {}", payment_number, rate.as_decimal());
                rate
            }
            None => monthly_rate.unwrap_or(Rate::ZERO),
        }
    }
}

fn checked(amount: Option<Money>, payment_number: u32) -> Result<Money> {
    amount.ok_or_else(|| CalculatorError::CalculationError {
        message: format!("amount overflows at payment {}", payment_number),
    })
}

/// payment date one month after `current`, on `day_of_month` or the last day
/// of that month when it is shorter
pub fn next_payment_date(day_of_month: u32, current: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if current.month() == 12 {
        (current.year() + 1, 1)
    } else {
        (current.year(), current.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, day_of_month.min(days_in_month(year, month)))
}
