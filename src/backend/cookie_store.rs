use chrono::{DateTime, Duration, Utc};
use log::{error, info};

use crate::backend::cookie::Cookie;
use crate::backend::interface::{BackendError, LedgerStore, Result, StorageSlot};
use crate::backend::json_store;
use crate::config::CookieConfig;
use crate::core::Ledger;

/// Keeps the whole ledger in a single cookie of a storage slot.
pub struct CookieStore<S: StorageSlot> {
    slot: S,
    config: CookieConfig
}

impl<S: StorageSlot> CookieStore<S> {
    pub fn new(slot: S, config: CookieConfig) -> Self {
        CookieStore { slot, config }
    }

    /// Strict load: `Ok(None)` when no cookie is stored, an error when the
    /// stored one cannot be turned into a ledger.
    pub fn load(&self) -> Result<Option<Ledger>> {
        match self.slot.get(&self.config.name) {
            Some(blob) => json_store::decode(&blob).map(Some),
            None => Ok(None)
        }
    }

    fn expires(&self) -> Result<DateTime<Utc>> {
        let days = self.config.expiry_days;
        Duration::try_days(days)
            .and_then(|lifetime| self.slot.now().checked_add_signed(lifetime))
            .ok_or(BackendError::ExpiryOutOfRange(days))
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}

impl<S: StorageSlot> LedgerStore for CookieStore<S> {
    fn read(&self) -> Ledger {
        match self.load() {
            Ok(Some(ledger)) => {
                info!("loaded {} transactions from cookie {}", ledger.len(), self.config.name);
                ledger
            },
            Ok(None) => {
                info!("no transactions found in cookie {}", self.config.name);
                Ledger::new()
            },
            Err(err) => {
                error!("error parsing transactions from cookie {}: {}", self.config.name, err);
                Ledger::new()
            }
        }
    }

    fn save(&mut self, ledger: &Ledger) -> Result<()> {
        let cookie = Cookie {
            name: self.config.name.clone(),
            value: json_store::encode(ledger.records())?,
            expires: self.expires()?,
            path: self.config.path.clone(),
            same_site: self.config.same_site
        };
        self.slot.set(cookie)?;
        info!("saved {} transactions to cookie {}", ledger.len(), self.config.name);
        return Ok(());
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::cookie::{CookieJar, SameSite};
    use crate::backend::cookie::tests::{ManualClock, start};
    use crate::core::RecordType;

    use rstest::rstest;

    fn store(clock: &ManualClock) -> CookieStore<CookieJar<ManualClock>> {
        CookieStore::new(CookieJar::with_clock(4096, clock.clone()), CookieConfig::default())
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(RecordType::Income, "Salary", 1000.0).unwrap();
        ledger.add(RecordType::Expense, "Rent", 400.0).unwrap();
        return ledger;
    }

    #[rstest]
    fn nothing_stored(start: DateTime<Utc>) {
        let store = store(&ManualClock::at(start));
        assert!(store.load().unwrap().is_none());
        assert!(store.read().is_empty());
    }

    #[rstest]
    fn save_then_read(start: DateTime<Utc>) {
        let mut store = store(&ManualClock::at(start));
        let ledger = sample();

        store.save(&ledger).unwrap();

        assert_eq!(store.read(), ledger);
    }

    #[rstest]
    fn cookie_attributes(start: DateTime<Utc>) {
        let clock = ManualClock::at(start);
        let mut store = store(&clock);
        store.save(&sample()).unwrap();

        let cookie = store.slot().cookies().next().unwrap().clone();
        assert_eq!(cookie.name, "transactions");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert_eq!(cookie.expires, start + Duration::days(30));
    }

    #[rstest]
    fn expiry_rolls_on_every_write(start: DateTime<Utc>) {
        let clock = ManualClock::at(start);
        let mut store = store(&clock);
        store.save(&sample()).unwrap();

        clock.advance(Duration::days(20));
        store.save(&sample()).unwrap();
        clock.advance(Duration::days(20));

        assert_eq!(store.read().len(), 2);

        clock.advance(Duration::days(10));
        assert!(store.read().is_empty());
    }

    #[rstest]
    #[case(1_000_000_000_000)]
    #[case(i64::MAX)]
    #[case(-1_000_000_000_000)]
    fn expiry_out_of_range(start: DateTime<Utc>, #[case] expiry_days: i64) {
        let config = CookieConfig { expiry_days, ..CookieConfig::default() };
        let mut store = CookieStore::new(CookieJar::with_clock(4096, ManualClock::at(start)), config);

        let res = store.save(&sample());

        assert!(matches!(res, Err(BackendError::ExpiryOutOfRange(days)) if days == expiry_days));
        assert!(store.load().unwrap().is_none());
    }

    #[rstest]
    fn corrupt_cookie_reads_empty(start: DateTime<Utc>) {
        let mut jar = CookieJar::with_clock(4096, ManualClock::at(start));
        jar.set(Cookie {
            name: "transactions".to_owned(),
            value: "[{\"id\": 1, \"type\": \"inc".to_owned(),
            expires: start + Duration::days(1),
            path: "/".to_owned(),
            same_site: SameSite::Lax
        }).unwrap();
        let store = CookieStore::new(jar, CookieConfig::default());

        assert!(matches!(store.load(), Err(BackendError::Parse(..))));
        assert!(store.read().is_empty());
    }

    #[rstest]
    fn oversized_ledger_is_not_written(start: DateTime<Utc>) {
        let jar = CookieJar::with_clock(256, ManualClock::at(start));
        let mut store = CookieStore::new(jar, CookieConfig::default());
        let mut ledger = sample();
        store.save(&ledger).unwrap();

        for _ in 0..10 {
            ledger.add(RecordType::Expense, "Groceries", 12.34).unwrap();
        }
        let res = store.save(&ledger);

        assert!(matches!(res, Err(BackendError::TooLarge { .. })));
        assert_eq!(store.read(), sample_like(&ledger));
    }

    /// The first two records of `ledger`, the ones written before the limit was hit.
    fn sample_like(ledger: &Ledger) -> Ledger {
        Ledger::from_records(ledger.records()[..2].to_vec()).unwrap()
    }
}
