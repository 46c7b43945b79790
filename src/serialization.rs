//! json request and response shapes for the calculator
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculator::calculate;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result, Violation};
use crate::loan::{EarlyPayment, LoanSpec};
use crate::payments::{LoanAmortization, MonthlyPayment};
use crate::types::{EarlyPaymentStrategy, RepeatingStrategy};

/// loan as it arrives over the wire, `rate` is an annual percentage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub term: Option<i32>,
    pub first_payment_date: Option<NaiveDate>,
    pub early_payments: Option<BTreeMap<i32, EarlyPaymentRequest>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPaymentRequest {
    pub amount: Decimal,
    pub strategy: Option<EarlyPaymentStrategy>,
    #[serde(default)]
    pub repeating_strategy: RepeatingKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_parameters: BTreeMap<AdditionalParameter, String>,
}

/// repeating strategy tag, its bound travels in `additionalParameters`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatingKind {
    #[default]
    Single,
    ToEnd,
    ToCertainMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditionalParameter {
    RepeatToMonthNumber,
}

impl LoanRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Option<Self> = serde_json::from_str(json).map_err(invalid_json)?;
        request.ok_or_else(|| Violation::MissingInput.into())
    }

    /// convert into a [`LoanSpec`] for the calculator
    pub fn into_loan(self) -> Result<LoanSpec> {
        let early_payments = match self.early_payments {
            Some(requests) => {
                let mut payments = BTreeMap::new();
                for (number, request) in requests {
                    payments.insert(number, request.into_early_payment(number)?);
                }
                Some(payments)
            }
            None => None,
        };

        Ok(LoanSpec {
            amount: self.amount.map(Money::from_decimal),
            rate: self.rate.map(Rate::from_percentage),
            term: self.term,
            first_payment_date: self.first_payment_date,
            early_payments,
            rate_provider: None,
        })
    }
}

impl EarlyPaymentRequest {
    fn into_early_payment(self, number: i32) -> Result<EarlyPayment> {
        let repeating_strategy = match self.repeating_strategy {
            RepeatingKind::Single => RepeatingStrategy::Single,
            RepeatingKind::ToEnd => RepeatingStrategy::ToEnd,
            RepeatingKind::ToCertainMonth => {
                let repeat_to_month = self
                    .additional_parameters
                    .get(&AdditionalParameter::RepeatToMonthNumber)
                    .and_then(|value| value.trim().parse::<u32>().ok())
                    .ok_or(Violation::MissingRepeatToMonth { number })?;
                RepeatingStrategy::ToCertainMonth { repeat_to_month }
            }
        };

        Ok(EarlyPayment {
            amount: Money::from_decimal(self.amount),
            strategy: self.strategy,
            repeating_strategy,
        })
    }
}

impl From<&EarlyPayment> for EarlyPaymentRequest {
    fn from(payment: &EarlyPayment) -> Self {
        let (repeating_strategy, additional_parameters) = match payment.repeating_strategy {
            RepeatingStrategy::Single => (RepeatingKind::Single, BTreeMap::new()),
            RepeatingStrategy::ToEnd => (RepeatingKind::ToEnd, BTreeMap::new()),
            RepeatingStrategy::ToCertainMonth { repeat_to_month } => (
                RepeatingKind::ToCertainMonth,
                BTreeMap::from([(AdditionalParameter::RepeatToMonthNumber, repeat_to_month.to_string())]),
            ),
        };

        EarlyPaymentRequest {
            amount: payment.amount.as_decimal(),
            strategy: payment.strategy,
            repeating_strategy,
            additional_parameters,
        }
    }
}

/// serializable view of a calculated schedule
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationView {
    pub monthly_payment_amount: Money,
    #[serde(rename = "overPaymentAmount")]
    pub overpayment_amount: Money,
    pub monthly_payments: Vec<MonthlyPaymentView>,
    pub early_payments: BTreeMap<u32, EarlyPaymentRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentView {
    pub month_number: u32,
    pub loan_balance_amount: Money,
    pub debt_payment_amount: Money,
    pub interest_payment_amount: Money,
    pub payment_amount: Money,
    pub additional_payment_amount: Money,
    pub payment_date: Option<NaiveDate>,
}

impl From<&MonthlyPayment> for MonthlyPaymentView {
    fn from(payment: &MonthlyPayment) -> Self {
        MonthlyPaymentView {
            month_number: payment.payment_number,
            loan_balance_amount: payment.loan_balance,
            debt_payment_amount: payment.principal_portion,
            interest_payment_amount: payment.interest_portion,
            payment_amount: payment.payment_amount,
            additional_payment_amount: payment.additional_payment,
            payment_date: payment.payment_date,
        }
    }
}

impl AmortizationView {
    pub fn from_amortization(schedule: &LoanAmortization) -> Self {
        AmortizationView {
            monthly_payment_amount: schedule.monthly_payment_amount,
            overpayment_amount: schedule.overpayment_amount,
            monthly_payments: schedule.monthly_payments.iter().map(MonthlyPaymentView::from).collect(),
            early_payments: schedule
                .early_payments
                .iter()
                .map(|(&number, payment)| (number, EarlyPaymentRequest::from(payment)))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(invalid_json)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(invalid_json)
    }
}

/// calculate a schedule from a json loan request, returning the json view
pub fn calculate_json(json: &str) -> Result<String> {
    let loan = LoanRequest::from_json(json)?.into_loan()?;
    debug!("loan request decoded: {:?}", loan);

    let schedule = calculate(&loan)?;
    AmortizationView::from_amortization(&schedule).to_json()
}

fn invalid_json(e: serde_json::Error) -> CalculatorError {
    CalculatorError::InvalidJson { message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use test_log::test;

    fn money(value: &Value) -> Money {
        Money::from_str_exact(value.as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_calculate_json_reference_loan() {
        let json = r#"{
            "amount": "500000.32",
            "rate": "4.56",
            "term": 32,
            "earlyPayments": {
                "5": { "amount": "50000", "strategy": "decrease_term" }
            }
        }"#;

        let output: Value = serde_json::from_str(&calculate_json(json).unwrap()).unwrap();

        assert_eq!(money(&output["monthlyPaymentAmount"]), Money::from_str_exact("16623.89").unwrap());
        assert_eq!(money(&output["overPaymentAmount"]), Money::from_str_exact("27029.95").unwrap());

        let payments = output["monthlyPayments"].as_array().unwrap();
        assert_eq!(payments.len(), 29);
        assert_eq!(payments[5]["monthNumber"], 5);
        assert_eq!(money(&payments[5]["additionalPaymentAmount"]), Money::from_major(50_000));
        assert_eq!(payments[0]["paymentDate"], Value::Null);

        let last = &payments[28];
        assert_eq!(money(&last["debtPaymentAmount"]), Money::from_str_exact("11517.58").unwrap());
        assert_eq!(money(&last["paymentAmount"]), Money::from_str_exact("11561.35").unwrap());

        assert_eq!(output["earlyPayments"]["5"]["strategy"], "decrease_term");
        assert_eq!(output["earlyPayments"]["5"]["repeatingStrategy"], "single");
    }

    #[test]
    fn test_to_certain_month_request() {
        let json = r#"{
            "amount": "500000.32",
            "rate": "4.56",
            "term": 32,
            "firstPaymentDate": "2020-01-31",
            "earlyPayments": {
                "5": {
                    "amount": "50000",
                    "strategy": "decrease_term",
                    "repeatingStrategy": "to_certain_month",
                    "additionalParameters": { "repeat_to_month_number": "10" }
                }
            }
        }"#;

        let loan = LoanRequest::from_json(json).unwrap().into_loan().unwrap();
        assert_eq!(
            loan.early_payments.as_ref().unwrap()[&5].repeating_strategy,
            RepeatingStrategy::ToCertainMonth { repeat_to_month: 10 }
        );

        let output: Value = serde_json::from_str(&calculate_json(json).unwrap()).unwrap();
        let early: Vec<&String> = output["earlyPayments"].as_object().unwrap().keys().collect();
        assert_eq!(early, vec!["5", "6", "7", "8", "9"]);
        assert_eq!(output["monthlyPayments"][1]["paymentDate"], "2020-02-29");
    }

    #[test]
    fn test_missing_repeat_bound() {
        let json = r#"{
            "amount": "1000", "rate": "5", "term": 12,
            "earlyPayments": { "2": { "amount": "10", "strategy": "decrease_term", "repeatingStrategy": "to_certain_month" } }
        }"#;

        assert_eq!(
            calculate_json(json),
            Err(CalculatorError::InputVerification {
                reason: Violation::MissingRepeatToMonth { number: 2 }
            })
        );
    }

    #[test]
    fn test_null_request_is_missing_input() {
        assert_eq!(
            calculate_json("null"),
            Err(CalculatorError::InputVerification {
                reason: Violation::MissingInput
            })
        );
    }

    #[test]
    fn test_missing_fields_reach_validation() {
        assert_eq!(
            calculate_json(r#"{ "rate": "5", "term": 12 }"#),
            Err(CalculatorError::InputVerification {
                reason: Violation::MissingField("amount")
            })
        );
        assert_eq!(
            calculate_json(r#"{ "amount": "1000", "rate": "5", "term": -1 }"#),
            Err(CalculatorError::InputVerification {
                reason: Violation::NonPositive("term")
            })
        );
        assert_eq!(
            calculate_json(r#"{ "amount": "1000", "rate": "5", "term": 12, "earlyPayments": { "1": { "amount": "10" } } }"#),
            Err(CalculatorError::InputVerification {
                reason: Violation::MissingEarlyPaymentStrategy { number: 1 }
            })
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(calculate_json("{ amount: "), Err(CalculatorError::InvalidJson { .. })));
        assert!(matches!(
            calculate_json(r#"{ "amount": "1000", "rate": "5", "term": 12, "earlyPayments": { "1": { "amount": "10", "strategy": "skip" } } }"#),
            Err(CalculatorError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_early_payment_view_keeps_repeat_bound() {
        let payment = EarlyPayment::new(
            Money::from_major(100),
            EarlyPaymentStrategy::DecreaseMonthlyPayment,
            RepeatingStrategy::ToCertainMonth { repeat_to_month: 7 },
        );

        let view = EarlyPaymentRequest::from(&payment);
        assert_eq!(view.repeating_strategy, RepeatingKind::ToCertainMonth);
        assert_eq!(
            view.additional_parameters.get(&AdditionalParameter::RepeatToMonthNumber),
            Some(&"7".to_string())
        );
        assert_eq!(view.into_early_payment(3).unwrap(), payment);
    }
}
