use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::decimal::{Money, Rate};
use crate::types::{EarlyPaymentStrategy, RepeatingStrategy};

/// supplies the per-period (monthly) interest rate for a payment number
///
/// Implemented for any `Fn(u32) -> Rate`, so a closure can be passed straight
/// to [`LoanSpec::with_rate_provider`].
pub trait MonthlyRateProvider: Send + Sync {
    fn monthly_rate(&self, payment_number: u32) -> Rate;
}

impl<F> MonthlyRateProvider for F
where
    F: Fn(u32) -> Rate + Send + Sync,
{
    fn monthly_rate(&self, payment_number: u32) -> Rate {
        self(payment_number)
    }
}

/// an extra payment on top of the scheduled one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyPayment {
    pub amount: Money,
    pub strategy: Option<EarlyPaymentStrategy>,
    #[serde(default)]
    pub repeating_strategy: RepeatingStrategy,
}

impl EarlyPayment {
    pub fn new(amount: Money, strategy: EarlyPaymentStrategy, repeating_strategy: RepeatingStrategy) -> Self {
        Self {
            amount,
            strategy: Some(strategy),
            repeating_strategy,
        }
    }

    /// one-off early payment
    pub fn single(amount: Money, strategy: EarlyPaymentStrategy) -> Self {
        Self::new(amount, strategy, RepeatingStrategy::Single)
    }

    /// copy of this payment that applies once
    pub fn as_single(&self) -> Self {
        Self {
            amount: self.amount,
            strategy: self.strategy,
            repeating_strategy: RepeatingStrategy::Single,
        }
    }
}

/// loan parameters as supplied by the caller, before verification
///
/// Fields stay optional (and signed) so that incomplete input reaches the
/// validator instead of failing at construction.
#[derive(Clone, Default)]
pub struct LoanSpec {
    pub amount: Option<Money>,
    /// nominal annual rate
    pub rate: Option<Rate>,
    /// term in months
    pub term: Option<i32>,
    pub first_payment_date: Option<NaiveDate>,
    pub early_payments: Option<BTreeMap<i32, EarlyPayment>>,
    pub rate_provider: Option<Arc<dyn MonthlyRateProvider>>,
}

impl LoanSpec {
    pub fn new(amount: Money, rate: Rate, term: i32) -> Self {
        Self {
            amount: Some(amount),
            rate: Some(rate),
            term: Some(term),
            ..Self::default()
        }
    }

    /// loan whose per-period rate comes only from `provider`
    pub fn with_provider_only<P>(amount: Money, term: i32, provider: P) -> Self
    where
        P: MonthlyRateProvider + 'static,
    {
        Self {
            amount: Some(amount),
            term: Some(term),
            rate_provider: Some(Arc::new(provider)),
            ..Self::default()
        }
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    pub fn with_early_payment(mut self, payment_number: i32, payment: EarlyPayment) -> Self {
        self.early_payments
            .get_or_insert_with(BTreeMap::new)
            .insert(payment_number, payment);
        self
    }

    pub fn with_rate_provider<P>(mut self, provider: P) -> Self
    where
        P: MonthlyRateProvider + 'static,
    {
        self.rate_provider = Some(Arc::new(provider));
        self
    }
}

impl fmt::Debug for LoanSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanSpec")
            .field("amount", &self.amount)
            .field("rate", &self.rate)
            .field("term", &self.term)
            .field("first_payment_date", &self.first_payment_date)
            .field("early_payments", &self.early_payments)
            .field("rate_provider", &self.rate_provider.as_ref().map(|_| "<custom>"))
            .finish()
    }
}
