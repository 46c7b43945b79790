use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, Violation};
use crate::loan::{EarlyPayment, LoanSpec, MonthlyRateProvider};

/// loan parameters that passed verification
///
/// Everything the engine needs is present and in range; payment numbers are
/// unsigned from here on.
#[derive(Clone)]
pub struct LoanTerms {
    pub amount: Money,
    pub rate: Option<Rate>,
    pub term: u32,
    pub first_payment_date: Option<NaiveDate>,
    pub early_payments: BTreeMap<u32, EarlyPayment>,
    pub rate_provider: Option<Arc<dyn MonthlyRateProvider>>,
}

/// verify a loan spec and turn it into [`LoanTerms`]
///
/// Checks run in a fixed order (missing fields, non-positive values, term
/// ceiling, then early payments by ascending number) and the first failure is
/// returned.
pub fn validate(loan: Option<&LoanSpec>, config: &CalculatorConfig) -> Result<LoanTerms> {
    let loan = loan.ok_or(Violation::MissingInput)?;
    info!("validating input: {:?}", loan);

    let amount = loan.amount.ok_or(Violation::MissingField("amount"))?;
    if loan.rate.is_none() && loan.rate_provider.is_none() {
        return Err(Violation::MissingField("rate").into());
    }
    let term = loan.term.ok_or(Violation::MissingField("term"))?;

    if !amount.is_positive() {
        return Err(Violation::NonPositive("amount").into());
    }
    if term <= 0 {
        return Err(Violation::NonPositive("term").into());
    }
    if let Some(rate) = loan.rate {
        if !rate.is_positive() {
            return Err(Violation::NonPositive("rate").into());
        }
    }

    let term_months = term as u32;
    if term_months > config.max_term_months {
        return Err(Violation::TermTooLong {
            term,
            max: config.max_term_months,
        }
        .into());
    }

    let mut early_payments = BTreeMap::new();
    if let Some(payments) = &loan.early_payments {
        for (&number, payment) in payments {
            if number < 0 {
                return Err(Violation::NegativeEarlyPaymentNumber { number }.into());
            }
            if payment.amount.is_negative() {
                return Err(Violation::NegativeEarlyPaymentAmount { number }.into());
            }
            if payment.strategy.is_none() {
                return Err(Violation::MissingEarlyPaymentStrategy { number }.into());
            }
            early_payments.insert(number as u32, payment.clone());
        }
    }

    debug!("validated loan: term {} months, {} early payments", term_months, early_payments.len());

    Ok(LoanTerms {
        amount,
        rate: loan.rate,
        term: term_months,
        first_payment_date: loan.first_payment_date,
        early_payments,
        rate_provider: loan.rate_provider.clone(),
    })
}
