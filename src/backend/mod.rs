pub mod cookie;
mod interface;
mod jar_file;
mod cookie_store;
pub mod json_store;

pub use interface::{LedgerStore, StorageSlot, Result, BackendError};
pub use cookie::{Clock, Cookie, CookieJar, SameSite, SystemClock};
pub use jar_file::JarFile;
pub use cookie_store::CookieStore;
