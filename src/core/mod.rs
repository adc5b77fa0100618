pub mod error;
pub mod record;
pub mod filter;
pub mod summary;
pub mod ledger;

pub use error::{ValidationError, ValidationResult};
pub use record::{Amount, Record, RecordId, RecordType, parse_amount};
pub use filter::Filter;
pub use summary::{Summary, Standing};
pub use ledger::Ledger;
