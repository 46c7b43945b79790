use serde::{Deserialize, Serialize};

use crate::decimal::RATE_SCALE;
use crate::errors::{CalculatorError, Result};

/// longest accepted term, in months (100 years)
pub const DEFAULT_MAX_TERM_MONTHS: u32 = 1200;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// decimal places kept when deriving monthly rates and annuity factors
    pub rate_scale: u32,
    /// terms above this are rejected during verification
    pub max_term_months: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            rate_scale: RATE_SCALE,
            max_term_months: DEFAULT_MAX_TERM_MONTHS,
        }
    }
}

impl CalculatorConfig {
    /// parse configuration from json, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // rust_decimal holds at most 28 fractional digits
        if self.rate_scale == 0 || self.rate_scale > 28 {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("rate_scale must be within 1..=28, got {}", self.rate_scale),
            });
        }

        if self.max_term_months == 0 {
            return Err(CalculatorError::InvalidConfiguration {
                message: "max_term_months must be positive".to_string(),
            });
        }

        Ok(())
    }
}
