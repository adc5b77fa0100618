use thiserror::Error;

use crate::core::record::{Amount, RecordId};

/// Rejection of user input (or of a stored record that would not have
/// passed the same checks). Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Description is empty once surrounding whitespace is removed
    #[error("description must not be empty")]
    EmptyDescription,
    /// Stored description with whitespace that entry would have trimmed
    #[error("description has surrounding whitespace: {0:?}")]
    UntrimmedDescription(String),
    /// Amount text could not be read as a number
    #[error("amount is not a number: {0:?}")]
    NotANumber(String),
    /// Amount is zero, negative, infinite or NaN
    #[error("amount must be a finite number greater than zero, got {0}")]
    NonPositiveAmount(Amount),
    /// Amount above the largest one a ledger accepts
    #[error("amount must not exceed {max}, got {amount}")]
    AmountTooLarge {
        amount: Amount,
        max: Amount
    },
    /// Transaction type other than income or expense
    #[error("unknown transaction type: {0:?}")]
    UnknownType(String),
    /// Filter other than all, income or expense
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),
    /// Id text that is not an integer
    #[error("invalid transaction id: {0:?}")]
    InvalidId(String),
    /// No id left above the largest one in use
    #[error("no transaction id left after {0}")]
    IdsExhausted(RecordId),
    /// Two records sharing one id
    #[error("duplicate transaction id: {0}")]
    DuplicateId(RecordId),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
