use log::warn;

use crate::backend::{BackendError, LedgerStore};
use crate::core::{
    Amount, Filter, Ledger, Record, RecordId, RecordType, Summary,
    ValidationError, ValidationResult, parse_amount};

/// Everything a view needs to redraw itself from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<'a> {
    pub filter: Filter,
    pub records: Vec<&'a Record>,
    pub summary: Summary
}

impl<'a> Snapshot<'a> {
    pub fn of(ledger: &'a Ledger, filter: Filter) -> Self {
        Snapshot { filter, records: ledger.list(filter).collect(), summary: ledger.summarize() }
    }
}

/// The presentation side of a tracker.
pub trait View {
    fn render(&mut self, snapshot: &Snapshot);
    /// Input was rejected; nothing changed.
    fn alert(&mut self, error: &ValidationError);
    /// The ledger changed but could not be stored. The change still stands
    /// for this session.
    fn warn(&mut self, _error: &BackendError) {}
}

/// Owns the ledger for one session, keeps the store in step with it and
/// redraws the view after every change.
pub struct Tracker<S: LedgerStore, V: View> {
    ledger: Ledger,
    store: S,
    view: V,
    filter: Filter
}

impl<S: LedgerStore, V: View> Tracker<S, V> {
    /// Loads the ledger from `store`. Nothing is drawn until the first
    /// operation or `refresh`.
    pub fn open(store: S, view: V) -> Self {
        let ledger = store.read();
        Tracker { ledger, store, view, filter: Filter::All }
    }

    /// Handles a new-transaction form: all three fields as typed by the user.
    pub fn submit(&mut self, kind: &str, description: &str, amount: &str) -> ValidationResult<Record> {
        let result = Self::parse_entry(kind, amount)
            .and_then(|(kind, amount)| self.ledger.add(kind, description, amount));

        match result {
            Ok(record) => {
                self.persist();
                self.refresh();
                Ok(record)
            },
            Err(err) => {
                self.view.alert(&err);
                Err(err)
            }
        }
    }

    fn parse_entry(kind: &str, amount: &str) -> ValidationResult<(RecordType, Amount)> {
        Ok((kind.parse()?, parse_amount(amount)?))
    }

    /// Removes the transaction(s) with `id`; returns how many were removed.
    pub fn delete(&mut self, id: RecordId) -> usize {
        let removed = self.ledger.remove(id);
        self.persist();
        self.refresh();
        return removed;
    }

    pub fn filter_changed(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.ledger, self.filter)
    }

    /// Pushes the current view of the ledger to the view.
    pub fn refresh(&mut self) {
        let snapshot = Snapshot::of(&self.ledger, self.filter);
        self.view.render(&snapshot);
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.ledger) {
            warn!("transactions kept in memory only: {}", err);
            self.view.warn(&err);
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Cookie, CookieJar, CookieStore, SameSite, StorageSlot};
    use crate::config::CookieConfig;
    use crate::core::{Standing, ValidationError};

    use rstest::{fixture, rstest};

    /// Records what the tracker pushed to it.
    #[derive(Default)]
    struct RecordingView {
        frames: Vec<(Filter, Vec<String>, Summary)>,
        alerts: Vec<ValidationError>,
        warnings: usize
    }

    impl View for RecordingView {
        fn render(&mut self, snapshot: &Snapshot) {
            let descriptions = snapshot.records.iter().map(|r| r.description.clone()).collect();
            self.frames.push((snapshot.filter, descriptions, snapshot.summary));
        }

        fn alert(&mut self, error: &ValidationError) {
            self.alerts.push(error.clone());
        }

        fn warn(&mut self, _error: &BackendError) {
            self.warnings += 1;
        }
    }

    type TestTracker = Tracker<CookieStore<CookieJar>, RecordingView>;

    #[fixture]
    fn tracker() -> TestTracker {
        let store = CookieStore::new(CookieJar::default(), CookieConfig::default());
        Tracker::open(store, RecordingView::default())
    }

    #[rstest]
    fn salary_and_rent(mut tracker: TestTracker) {
        tracker.submit("income", "Salary", "1000.00").unwrap();
        tracker.submit("expense", "Rent", "400.00").unwrap();

        let summary = tracker.ledger().summarize();
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expenses, 400.0);
        assert_eq!(summary.balance, 600.0);
        assert_eq!(summary.standing(), Standing::Surplus);

        tracker.filter_changed(Filter::Expense);
        assert_eq!(tracker.filter(), Filter::Expense);
        let (filter, descriptions, _) = tracker.view().frames.last().unwrap();
        assert_eq!(*filter, Filter::Expense);
        assert_eq!(descriptions, &vec!["Rent".to_owned()]);
    }

    #[rstest]
    #[case("expense", "", "10.00")]
    #[case("expense", "Rent", "abc")]
    #[case("expense", "Rent", "0")]
    #[case("expense", "Rent", "-1")]
    #[case("gift", "Rent", "10")]
    fn rejected_submission(mut tracker: TestTracker, #[case] kind: &str, #[case] description: &str, #[case] amount: &str) {
        let res = tracker.submit(kind, description, amount);

        assert!(res.is_err());
        assert!(tracker.ledger().is_empty());
        assert_eq!(tracker.view().alerts.len(), 1);
        assert!(tracker.view().frames.is_empty());
        assert!(tracker.store().load().unwrap().is_none());
    }

    #[rstest]
    fn every_mutation_is_saved(mut tracker: TestTracker) {
        let salary = tracker.submit("income", "Salary", "1000").unwrap();
        tracker.submit("expense", "Rent", "400").unwrap();
        assert_eq!(tracker.store().read(), *tracker.ledger());

        assert_eq!(tracker.delete(salary.id), 1);
        assert_eq!(tracker.store().read(), *tracker.ledger());
        assert_eq!(tracker.store().read().len(), 1);
    }

    #[rstest]
    fn delete_unknown_id(mut tracker: TestTracker) {
        tracker.submit("income", "Salary", "1000").unwrap();

        assert_eq!(tracker.delete(RecordId(42)), 0);
        assert_eq!(tracker.ledger().len(), 1);
    }

    #[rstest]
    fn renders_after_each_change(mut tracker: TestTracker) {
        tracker.submit("income", "Salary", "1000").unwrap();
        let rent = tracker.submit("expense", "Rent", "400").unwrap();
        tracker.filter_changed(Filter::Income);
        tracker.delete(rent.id);

        let frames = &tracker.view().frames;
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1].1, vec!["Salary".to_owned(), "Rent".to_owned()]);
        assert_eq!(frames[3].0, Filter::Income);
        assert_eq!(frames[3].2.balance, 1000.0);
    }

    #[test]
    fn reopen_restores_ledger() {
        let store = CookieStore::new(CookieJar::default(), CookieConfig::default());
        let mut tracker = Tracker::open(store, RecordingView::default());
        tracker.submit("income", "Salary", "1000").unwrap();
        let saved = tracker.ledger().clone();

        let reopened = Tracker::open(tracker.into_store(), RecordingView::default());

        assert_eq!(reopened.ledger(), &saved);
        assert_eq!(reopened.snapshot().records.len(), 1);
    }

    #[test]
    fn write_failure_keeps_memory() {
        let store = CookieStore::new(CookieJar::new(64), CookieConfig::default());
        let mut tracker = Tracker::open(store, RecordingView::default());

        tracker.submit("income", "A description long enough to blow the cookie limit", "5").unwrap();

        assert_eq!(tracker.ledger().len(), 1);
        assert_eq!(tracker.view().warnings, 1);
        assert_eq!(tracker.view().frames.len(), 1);
        assert!(tracker.store().slot().get("transactions").is_none());
    }

    #[test]
    fn submit_after_largest_stored_id() {
        let mut jar = CookieJar::default();
        jar.set(Cookie {
            name: "transactions".to_owned(),
            value: r#"[{"id": 9223372036854775807, "type": "income", "description": "a", "amount": 1}]"#.to_owned(),
            expires: chrono::Utc::now() + chrono::Duration::days(1),
            path: "/".to_owned(),
            same_site: SameSite::Lax
        }).unwrap();
        let store = CookieStore::new(jar, CookieConfig::default());
        let mut tracker = Tracker::open(store, RecordingView::default());
        assert_eq!(tracker.ledger().len(), 1);

        let res = tracker.submit("income", "b", "2");

        assert_eq!(res, Err(ValidationError::IdsExhausted(RecordId(i64::MAX))));
        assert_eq!(tracker.ledger().len(), 1);
        assert_eq!(tracker.view().alerts.len(), 1);
    }

    #[test]
    fn unrepresentable_expiry_is_a_warning() {
        let config = CookieConfig { expiry_days: 1_000_000_000_000, ..CookieConfig::default() };
        let store = CookieStore::new(CookieJar::default(), config);
        let mut tracker = Tracker::open(store, RecordingView::default());

        tracker.submit("income", "Salary", "1000").unwrap();

        assert_eq!(tracker.ledger().len(), 1);
        assert_eq!(tracker.view().warnings, 1);
        assert!(tracker.store().slot().get("transactions").is_none());
    }
}
