use thiserror::Error;

/// reason an input failed verification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("input data can't be null")]
    MissingInput,

    #[error("input data can't be null: {0} is missing")]
    MissingField(&'static str),

    #[error("input can't be negative or zero: {0}")]
    NonPositive(&'static str),

    #[error("early payment number can't be negative: {number}")]
    NegativeEarlyPaymentNumber {
        number: i32,
    },

    #[error("early payment amount can't be negative (payment number {number})")]
    NegativeEarlyPaymentAmount {
        number: i32,
    },

    #[error("early payment strategy can't be null (payment number {number})")]
    MissingEarlyPaymentStrategy {
        number: i32,
    },

    #[error("term of {term} months exceeds maximum of {max}")]
    TermTooLong {
        term: i32,
        max: u32,
    },

    #[error("repeat_to_month_number is missing or not a month number (payment number {number})")]
    MissingRepeatToMonth {
        number: i32,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("input verification failed: {reason}")]
    InputVerification {
        reason: Violation,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid json: {message}")]
    InvalidJson {
        message: String,
    },
}

impl From<Violation> for CalculatorError {
    fn from(reason: Violation) -> Self {
        CalculatorError::InputVerification { reason }
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let err: CalculatorError = Violation::NonPositive("term").into();
        assert_eq!(
            err.to_string(),
            "input verification failed: input can't be negative or zero: term"
        );

        let err: CalculatorError = Violation::NegativeEarlyPaymentNumber { number: -3 }.into();
        assert_eq!(
            err.to_string(),
            "input verification failed: early payment number can't be negative: -3"
        );
    }
}
