//! Session credential handling.
//!
//! The core never reads ambient storage for a credential: callers hand it
//! a [`SessionProvider`] and the token travels through the interface
//! boundary. [`FileSession`] is the on-disk provider used by the CLI glue;
//! [`StaticSession`] exists for tests and embedding.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Bearer credential issued by the authentication API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new<T: Into<String>>(token: T) -> Self {
        SessionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Holder of the current authentication credential.
pub trait SessionProvider {
    /// Current token, if a session is active.
    fn token(&self) -> Option<SessionToken>;

    /// Forget the current credential (logout).
    fn clear(&mut self);
}

/// Resolve the current token or fail with [`Error::MissingCredential`].
///
/// The glue layer turns this error into its redirect-to-login equivalent.
pub fn require_token(provider: &impl SessionProvider) -> Result<SessionToken> {
    provider.token().ok_or(Error::MissingCredential)
}

/// In-memory session provider.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<SessionToken>,
}

impl StaticSession {
    pub fn with_token<T: Into<String>>(token: T) -> Self {
        Self {
            token: Some(SessionToken::new(token)),
        }
    }
}

impl SessionProvider for StaticSession {
    fn token(&self) -> Option<SessionToken> {
        self.token.clone()
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

const TOKEN_FILE_NAME: &str = "token";

/// Session provider backed by a token file under the platform config
/// directory.
#[derive(Debug, Clone)]
pub struct FileSession {
    token_path: PathBuf,
}

impl FileSession {
    /// Open the default session store under the platform config directory.
    pub fn open() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "campusmap").ok_or(Error::ConfigDirsUnavailable)?;
        Ok(Self::at(dirs.config_dir()))
    }

    /// Open a session store rooted at an explicit directory.
    pub fn at(dir: &Path) -> Self {
        Self {
            token_path: dir.join(TOKEN_FILE_NAME),
        }
    }

    /// Persist a freshly issued token.
    pub fn store(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.token_path, token.as_str())?;
        debug!(path = %self.token_path.display(), "stored session token");
        Ok(())
    }
}

impl SessionProvider for FileSession {
    fn token(&self) -> Option<SessionToken> {
        let raw = fs::read_to_string(&self.token_path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(SessionToken::new(trimmed))
    }

    fn clear(&mut self) {
        if self.token_path.exists() {
            if let Err(err) = fs::remove_file(&self.token_path) {
                debug!(error = %err, "failed to remove session token file");
            }
        }
    }
}
