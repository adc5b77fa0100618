use std::{fmt, str::FromStr};

use serde::{Serialize, Deserialize};

use crate::core::error::{ValidationError, ValidationResult};

pub type Amount = f64;

/// Largest amount a single record may carry. Far below `f64::MAX`, so
/// totals over any realistic number of records stay finite.
pub const MAX_AMOUNT: Amount = 1e15;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>()
            .map(RecordId)
            .map_err(|_| ValidationError::InvalidId(s.to_owned()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense"
        }
    }

    fn sign(&self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-'
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ValidationError::UnknownType(s.to_owned()))
        }
    }
}

/// Reads an amount typed by the user. Only finite values above zero pass.
pub fn parse_amount(text: &str) -> ValidationResult<Amount> {
    let amount = text.trim().parse::<Amount>()
        .map_err(|_| ValidationError::NotANumber(text.to_owned()))?;
    check_amount(amount)
}

pub(crate) fn check_amount(amount: Amount) -> ValidationResult<Amount> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge { amount, max: MAX_AMOUNT });
    }
    return Ok(amount);
}

pub(crate) fn check_description(description: &str) -> ValidationResult<&str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    return Ok(trimmed);
}

/// A single income or expense entry. Records are never edited once created.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub description: String,
    pub amount: Amount
}

impl Record {
    pub(crate) fn new(id: RecordId, kind: RecordType, description: &str, amount: Amount) -> ValidationResult<Record> {
        let description = check_description(description)?;
        let amount = check_amount(amount)?;
        Ok(Record { id, kind, description: description.to_owned(), amount })
    }

    /// Re-applies the entry checks to a record that came from elsewhere.
    /// The description must already be in the trimmed form `new` stores.
    pub(crate) fn validate(&self) -> ValidationResult<()> {
        if check_description(&self.description)? != self.description {
            return Err(ValidationError::UntrimmedDescription(self.description.clone()));
        }
        check_amount(self.amount)?;
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.kind == RecordType::Income
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}${:.2} {}", self.kind.sign(), self.amount, self.description)
    }
}
