use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::backend::interface::{BackendError, Result, StorageSlot};

/// Browsers commonly cap a single cookie at this many bytes.
pub const DEFAULT_MAX_COOKIE_SIZE: usize = 4096;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None"
        };
        write!(f, "{}", disp)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
    pub same_site: SameSite
}

impl Cookie {
    pub fn size(&self) -> usize {
        self.name.len() + self.value.len()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; expires={}; path={}; SameSite={}",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.path,
            self.same_site)
    }
}

/// In-memory cookie storage with a per-cookie size limit and expiry.
#[derive(Debug)]
pub struct CookieJar<C: Clock = SystemClock> {
    cookies: BTreeMap<String, Cookie>,
    max_size: usize,
    clock: C
}

impl CookieJar<SystemClock> {
    pub fn new(max_size: usize) -> Self {
        CookieJar::with_clock(max_size, SystemClock)
    }
}

impl Default for CookieJar<SystemClock> {
    fn default() -> Self {
        CookieJar::new(DEFAULT_MAX_COOKIE_SIZE)
    }
}

impl<C: Clock> CookieJar<C> {
    pub fn with_clock(max_size: usize, clock: C) -> Self {
        CookieJar { cookies: BTreeMap::new(), max_size, clock }
    }

    /// Fills the jar with previously stored cookies, skipping the expired ones.
    pub fn restore(&mut self, cookies: impl IntoIterator<Item = Cookie>) {
        let now = self.clock.now();
        for cookie in cookies {
            if !cookie.is_expired_at(now) {
                self.cookies.insert(cookie.name.clone(), cookie);
            }
        }
    }

    /// Live cookies, in name order.
    pub fn cookies(&self) -> impl Iterator<Item = &Cookie> + '_ {
        let now = self.clock.now();
        self.cookies.values().filter(move |cookie| !cookie.is_expired_at(now))
    }
}

impl<C: Clock> StorageSlot for CookieJar<C> {
    fn get(&self, name: &str) -> Option<String> {
        let cookie = self.cookies.get(name)?;
        if cookie.is_expired_at(self.clock.now()) {
            return None;
        }
        return Some(cookie.value.clone());
    }

    /// An already expired cookie deletes any stored one of the same name.
    fn set(&mut self, cookie: Cookie) -> Result<()> {
        let size = cookie.size();
        if size > self.max_size {
            return Err(BackendError::TooLarge {
                name: cookie.name,
                size,
                limit: self.max_size
            });
        }

        if cookie.is_expired_at(self.clock.now()) {
            self.cookies.remove(&cookie.name);
        } else {
            self.cookies.insert(cookie.name.clone(), cookie);
        }
        return Ok(());
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
