mod core;
pub mod backend;
pub mod config;
pub mod tracker;

pub use crate::core::{Ledger, Record, RecordId, RecordType, Filter, Summary, Standing, Amount};
pub use crate::core::{ledger, record, filter, summary, error};
pub use crate::core::{ValidationError, parse_amount};
pub use crate::tracker::{Tracker, View, Snapshot};
pub use crate::config::TrackerConfig;
