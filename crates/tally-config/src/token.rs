//! Session token storage.
//!
//! Reads/writes `<base>/auth.json` (0600 on Unix).

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_domain::AuthToken;
use tracing::{debug, warn};

use crate::manager::{tmp_path, write_atomic};
use crate::ConfigError;

const TOKEN_FILE: &str = "auth.json";

/// Token plus where and when it was obtained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: AuthToken,
    pub api_base: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join(TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token when it was issued by `api_base`.
    ///
    /// A missing or unreadable file means "signed out"; a token for another
    /// server is ignored.
    pub fn load(&self, api_base: &str) -> Option<StoredToken> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable token file");
                return None;
            }
        };
        if stored.api_base != api_base {
            debug!(stored = %stored.api_base, "token belongs to a different server");
            return None;
        }
        Some(stored)
    }

    pub fn save(&self, token: &AuthToken, api_base: &str) -> Result<StoredToken, ConfigError> {
        let stored = StoredToken {
            token: token.clone(),
            api_base: api_base.to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        Ok(stored)
    }

    pub fn clear(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}
