use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::backend::cookie::Cookie;
use crate::core::{Ledger, ValidationError};

#[derive(Debug, Error)]
pub enum BackendError {
    /// Stored blob is not a JSON sequence of well-formed records
    #[error("stored transactions are unreadable: {0}")]
    Parse(#[from] serde_json::Error),
    /// Stored records decode but break a ledger invariant
    #[error("stored transactions are invalid: {0}")]
    Invalid(#[from] ValidationError),
    /// Write refused by the storage slot's size limit
    #[error("cookie {name} is {size} bytes, over the {limit} byte limit")]
    TooLarge {
        name: String,
        size: usize,
        limit: usize
    },
    /// Cookie lifetime that does not fit in a timestamp
    #[error("cookie expiry of {0} days is out of range")]
    ExpiryOutOfRange(i64),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error)
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Size- and lifetime-bounded key/value storage, the way a browser cookie
/// jar behaves towards a page script.
pub trait StorageSlot {
    /// Value of a live cookie, `None` if absent or expired.
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, cookie: Cookie) -> Result<()>;

    /// Current time as the slot sees it; expiry is measured against this.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub trait LedgerStore {
    /// Never fails: a missing or unreadable ledger comes back empty.
    fn read(&self) -> Ledger;
    fn save(&mut self, ledger: &Ledger) -> Result<()>;
}
