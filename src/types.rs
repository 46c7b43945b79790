use serde::{Deserialize, Serialize};

/// how an early payment is applied to the rest of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarlyPaymentStrategy {
    /// keep the level payment, finish the loan sooner
    DecreaseTerm,
    /// keep the term, re-amortize into a lower level payment
    DecreaseMonthlyPayment,
}

/// whether an early payment declaration applies once or repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepeatingStrategy {
    /// applies once, at its own payment number
    #[default]
    Single,
    /// repeats at every payment number up to the end of the term
    ToEnd,
    /// repeats at every payment number before `repeat_to_month` (exclusive)
    ToCertainMonth { repeat_to_month: u32 },
}

impl RepeatingStrategy {
    pub fn is_single(&self) -> bool {
        matches!(self, RepeatingStrategy::Single)
    }
}
