//! JSON encoding of a ledger: an array of `{id, type, description, amount}`
//! objects in ledger order.

use crate::backend::interface::Result;
use crate::core::{Ledger, Record};

pub fn encode(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Strict decode: bad syntax, a shape other than an array of records
/// (missing, extra or mistyped fields included) and records that break a
/// ledger invariant are all errors.
pub fn decode(text: &str) -> Result<Ledger> {
    let records: Vec<Record> = serde_json::from_str(text)?;
    Ok(Ledger::from_records(records)?)
}
