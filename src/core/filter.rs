use std::{fmt, str::FromStr};

use serde::{Serialize, Deserialize};

use crate::core::error::ValidationError;
use crate::core::record::{Record, RecordType};

/// View selector applied when reading the ledger.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Income => record.kind == RecordType::Income,
            Self::Expense => record.kind == RecordType::Expense
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense"
        };
        write!(f, "{}", disp)
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ValidationError::UnknownFilter(s.to_owned()))
        }
    }
}
