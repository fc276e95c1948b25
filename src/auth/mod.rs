//! Session token sources.
//!
//! The favorites manager asks its [`TokenProvider`] for a bearer token
//! before every remote call. Issuing, refreshing and expiring tokens is
//! somebody else's job.

use std::fs;
use std::path::PathBuf;

pub trait TokenProvider {
    /// Current bearer token, or `None` when the user is signed out.
    fn token(&self) -> Option<String>;
}

/// A fixed token.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token persisted in a file by whatever performed the login.
///
/// The file is read on every call so a new login is picked up without
/// restarting.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenProvider for SessionFile {
    fn token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                tracing::debug!("No session token at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
