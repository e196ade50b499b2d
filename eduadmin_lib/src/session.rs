//! Saved sign-in state.
//!
//! The bearer token and account are kept between runs in a small JSON
//! file: `$EDUADMIN_SESSION_FILE` when set, otherwise
//! `<config dir>/eduadmin/session.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eduadmin_api::types::AdminUser;
use serde::{Deserialize, Serialize};

use crate::error::AdminError;

/// Environment override for the session file location.
pub const SESSION_FILE_ENV: &str = "EDUADMIN_SESSION_FILE";

/// One signed-in administrator.
#[derive(Serialize, Deserialize, Clone)]
pub struct Session {
    pub token: String,
    pub user: AdminUser,
}

/// Reads and writes the session file.
pub struct SessionStore {
    path: PathBuf,
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eduadmin")
        .join("session.json")
}

fn store_error(verb: &str, path: &Path, err: std::io::Error) -> AdminError {
    AdminError::SessionStore(format!("failed to {} {}: {}", verb, path.display(), err))
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location, honoring
    /// [`SESSION_FILE_ENV`].
    pub fn from_env() -> Self {
        match std::env::var_os(SESSION_FILE_ENV) {
            Some(path) => Self::new(PathBuf::from(path)),
            None => Self::new(default_path()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved session, or `None` when nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>, AdminError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(store_error("read", &self.path, err)),
        };
        let session = serde_json::from_str(&raw).map_err(|err| {
            AdminError::SessionStore(format!(
                "corrupt session file {}: {}",
                self.path.display(),
                err
            ))
        })?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), AdminError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| store_error("create", parent, err))?;
        }
        let body = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, body).map_err(|err| store_error("write", &self.path, err))
    }

    /// Removes the session file. Already-signed-out is not an error.
    pub fn clear(&self) -> Result<(), AdminError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(store_error("remove", &self.path, err)),
        }
    }
}
