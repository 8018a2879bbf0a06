use crate::id::DbId;

#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
        };
        write!(f, "{display_text}")
    }
}

#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display_text = match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        };
        write!(f, "{display_text}")
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Payment {
    pub id: DbId,
    pub booking: DbId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub status: PaymentStatus,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PaymentDraft {
    pub booking: DbId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub status: PaymentStatus,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaymentValidationError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Transaction reference is required")]
    EmptyTransactionId,
}

impl PaymentDraft {
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        // Also catches NaN
        if !(self.amount > 0.0) {
            return Err(PaymentValidationError::NonPositiveAmount);
        }
        if self.transaction_id.trim().is_empty() {
            return Err(PaymentValidationError::EmptyTransactionId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn draft() -> PaymentDraft {
        PaymentDraft {
            booking: 8.into(),
            amount: 399.98,
            payment_method: PaymentMethod::Card,
            transaction_id: "TXN123".to_string(),
            status: PaymentStatus::Completed,
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-5.0)]
    #[case::nan(f64::NAN)]
    fn bad_amount_rejected(#[case] amount: f64) {
        let mut input = draft();
        input.amount = amount;
        assert_eq!(
            input.validate().unwrap_err(),
            PaymentValidationError::NonPositiveAmount
        );
    }

    #[test]
    fn empty_transaction_rejected() {
        let mut input = draft();
        input.transaction_id = "  ".to_string();
        assert_eq!(
            input.validate().unwrap_err(),
            PaymentValidationError::EmptyTransactionId
        );
    }
}
