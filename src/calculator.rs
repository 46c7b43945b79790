use log::info;

use crate::config::CalculatorConfig;
use crate::errors::Result;
use crate::loan::LoanSpec;
use crate::payments::{expand_early_payments, AmortizationEngine, LoanAmortization};
use crate::validation::validate;

/// calculate a schedule with the default configuration
pub fn calculate(loan: &LoanSpec) -> Result<LoanAmortization> {
    LoanAmortizationCalculator::new().calculate(loan)
}

/// stateless amortization calculator
#[derive(Debug, Clone, Default)]
pub struct LoanAmortizationCalculator {
    config: CalculatorConfig,
}

impl LoanAmortizationCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// verify the loan, resolve repeating early payments and build the schedule
    pub fn calculate(&self, loan: &LoanSpec) -> Result<LoanAmortization> {
        let terms = validate(Some(loan), &self.config)?;
        let early_payments = expand_early_payments(&terms.early_payments, terms.term);

        let schedule = AmortizationEngine::new(&terms, early_payments, self.config.rate_scale).calculate()?;
        info!(
            "loan of {} over {} months repaid in {} payments, interest {}",
            terms.amount,
            terms.term,
            schedule.term_months(),
            schedule.overpayment_amount
        );

        Ok(schedule)
    }
}
