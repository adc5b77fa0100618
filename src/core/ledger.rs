use std::collections::HashSet;

use chrono::Utc;

use crate::core::error::{ValidationError, ValidationResult};
use crate::core::filter::Filter;
use crate::core::record::{Amount, Record, RecordId, RecordType};
use crate::core::summary::Summary;

/// Hands out timestamp-like ids (milliseconds since epoch) that never repeat:
/// if the clock has not moved past the last id, the last id plus one is used.
/// Once the last id is `i64::MAX` no further ids are handed out.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: Option<i64>
}

impl IdGenerator {
    pub fn next(&mut self) -> ValidationResult<RecordId> {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_ms: i64) -> ValidationResult<RecordId> {
        let id = match self.last {
            Some(last) if last >= now_ms => last.checked_add(1)
                .ok_or(ValidationError::IdsExhausted(RecordId(last)))?,
            _ => now_ms
        };
        self.last = Some(id);
        return Ok(RecordId(id));
    }

    fn observe(&mut self, id: RecordId) {
        if self.last.map_or(true, |last| id.0 > last) {
            self.last = Some(id.0);
        }
    }
}

/// Ordered collection of records, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: Vec<Record>,
    ids: IdGenerator
}

impl Ledger {
    pub fn new() -> Ledger {
        return Ledger { records: Vec::new(), ids: IdGenerator::default() };
    }

    /// Builds a ledger from records obtained elsewhere (e.g. storage),
    /// checking each one the way `add` would and rejecting repeated ids.
    pub fn from_records(records: Vec<Record>) -> ValidationResult<Ledger> {
        let mut seen = HashSet::new();
        let mut ids = IdGenerator::default();

        for record in &records {
            record.validate()?;
            if !seen.insert(record.id) {
                return Err(ValidationError::DuplicateId(record.id));
            }
            ids.observe(record.id);
        }

        return Ok(Ledger { records, ids });
    }

    pub fn add(&mut self, kind: RecordType, description: &str, amount: Amount) -> ValidationResult<Record> {
        let record = Record::new(self.ids.next()?, kind, description, amount)?;
        self.records.push(record.clone());
        return Ok(record);
    }

    /// Drops every record with the given id, returning how many went.
    /// An unknown id is not an error.
    pub fn remove(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        return before - self.records.len();
    }

    /// Records passing `filter`, in insertion order. The iterator can be
    /// cloned to walk the same view again.
    pub fn list(&self, filter: Filter) -> impl Iterator<Item = &Record> + Clone + '_ {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    pub fn summarize(&self) -> Summary {
        Summary::of(&self.records)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PartialEq for Ledger {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}
