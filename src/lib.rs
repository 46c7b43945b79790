pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod loan;
pub mod payments;
pub mod serialization;
pub mod types;
pub mod validation;

// re-export key types
pub use calculator::{calculate, LoanAmortizationCalculator};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, Result, Violation};
pub use interest::InterestAccrualPolicy;
pub use loan::{EarlyPayment, LoanSpec, MonthlyRateProvider};
pub use payments::{LoanAmortization, MonthlyPayment};
pub use serialization::{calculate_json, AmortizationView, LoanRequest};
pub use types::{EarlyPaymentStrategy, RepeatingStrategy};
pub use validation::LoanTerms;

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
