use std::{fs, io, path::{Path, PathBuf}};

use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::backend::cookie::{Cookie, CookieJar};
use crate::backend::interface::{Result, StorageSlot};

/// A cookie jar kept in a JSON file, rewritten on every `set`.
pub struct JarFile {
    path: PathBuf,
    jar: CookieJar
}

impl JarFile {
    /// Opens the jar at `path`. A missing file gives an empty jar, and so
    /// does an unreadable one (after logging why).
    pub fn open(path: impl AsRef<Path>, max_size: usize) -> JarFile {
        let path = path.as_ref().to_owned();
        let mut jar = CookieJar::new(max_size);

        match Self::read_cookies(&path) {
            Ok(Some(cookies)) => jar.restore(cookies),
            Ok(None) => debug!("no cookie jar at {}", path.display()),
            Err(err) => error!("ignoring unreadable cookie jar {}: {}", path.display(), err)
        }

        return JarFile { path, jar };
    }

    fn read_cookies(path: &Path) -> io::Result<Option<Vec<Cookie>>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err)
        };
        let cookies = serde_json::from_str(&content)?;
        return Ok(Some(cookies));
    }

    fn write_cookies(&self) -> Result<()> {
        let cookies: Vec<&Cookie> = self.jar.cookies().collect();
        let content = serde_json::to_string_pretty(&cookies).map_err(io::Error::from)?;
        fs::write(&self.path, content)?;
        return Ok(());
    }
}

impl StorageSlot for JarFile {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name)
    }

    fn set(&mut self, cookie: Cookie) -> Result<()> {
        self.jar.set(cookie)?;
        self.write_cookies()
    }

    fn now(&self) -> DateTime<Utc> {
        self.jar.now()
    }
}
