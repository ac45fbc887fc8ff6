//! Debt profile input types

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvestigationError;

/// Consumer debt categories the investigator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    Mortgage,
    #[serde(rename = "auto")]
    AutoLoan,
    CreditCard,
    StudentLoan,
    PersonalLoan,
}

impl DebtCategory {
    /// Stable wire key for this category
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Mortgage => "mortgage",
            Self::AutoLoan => "auto",
            Self::CreditCard => "credit_card",
            Self::StudentLoan => "student_loan",
            Self::PersonalLoan => "personal_loan",
        }
    }

    pub fn all() -> &'static [DebtCategory] {
        &[
            Self::Mortgage,
            Self::AutoLoan,
            Self::CreditCard,
            Self::StudentLoan,
            Self::PersonalLoan,
        ]
    }
}

impl fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl FromStr for DebtCategory {
    type Err = InvestigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mortgage" => Ok(Self::Mortgage),
            "auto" | "auto_loan" => Ok(Self::AutoLoan),
            "credit_card" => Ok(Self::CreditCard),
            "student_loan" => Ok(Self::StudentLoan),
            "personal_loan" => Ok(Self::PersonalLoan),
            other => Err(InvestigationError::UnknownDebtType {
                key: other.to_string(),
            }),
        }
    }
}

/// Immutable input to one investigation run
///
/// Everything except the debt category is optional; the more fields are
/// present, the better the query derivation and offline matching work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtProfile {
    pub debt_type: DebtCategory,
    pub servicer_name: Option<String>,
    pub original_creditor: Option<String>,
    pub account_number: Option<String>,
    /// Two-letter US state code
    pub state: Option<String>,
    pub approximate_balance: Option<Decimal>,
}

impl DebtProfile {
    pub fn new(debt_type: DebtCategory) -> Self {
        Self {
            debt_type,
            servicer_name: None,
            original_creditor: None,
            account_number: None,
            state: None,
            approximate_balance: None,
        }
    }

    pub fn with_servicer(mut self, servicer: impl Into<String>) -> Self {
        self.servicer_name = Some(servicer.into());
        self
    }

    pub fn with_creditor(mut self, creditor: impl Into<String>) -> Self {
        self.original_creditor = Some(creditor.into());
        self
    }

    pub fn with_account_number(mut self, account: impl Into<String>) -> Self {
        self.account_number = Some(account.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.approximate_balance = Some(balance);
        self
    }

    /// Validate optional fields that have a fixed shape
    pub fn validate(&self) -> Result<(), InvestigationError> {
        if let Some(ref state) = self.state {
            if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(InvestigationError::invalid_profile(format!(
                    "state must be a two-letter code, got '{}'",
                    state
                )));
            }
        }
        if let Some(balance) = self.approximate_balance {
            if balance < Decimal::ZERO {
                return Err(InvestigationError::invalid_profile(
                    "approximate balance cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_round_trip() {
        for category in DebtCategory::all() {
            let parsed: DebtCategory = category.as_key().parse().unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "payday".parse::<DebtCategory>().unwrap_err();
        assert!(matches!(
            err,
            InvestigationError::UnknownDebtType { key } if key == "payday"
        ));
    }

    #[test]
    fn test_profile_builder() {
        let profile = DebtProfile::new(DebtCategory::AutoLoan)
            .with_servicer("Santander Consumer USA")
            .with_state("TX")
            .with_balance(dec!(18500));

        assert_eq!(profile.debt_type, DebtCategory::AutoLoan);
        assert_eq!(
            profile.servicer_name.as_deref(),
            Some("Santander Consumer USA")
        );
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_state() {
        let profile = DebtProfile::new(DebtCategory::Mortgage).with_state("Texas");
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_balance() {
        let profile = DebtProfile::new(DebtCategory::CreditCard).with_balance(dec!(-1));
        assert!(profile.validate().is_err());
    }
}
