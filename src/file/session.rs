// src/file/session.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{pretty_config, FileHandler};

/// What login/signup leaves behind. The token is only used to gate
/// navigation; it is never sent back to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Persistent session storage: loaded at startup, written at login or
/// signup, cleared at logout.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&mut self, session: &Session) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug)]
pub struct SessionFileHandler;

impl SessionFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<Session> for SessionFileHandler {
    fn load(&self, path: &Path) -> Result<Session> {
        let content = fs::read_to_string(path)?;
        ron::from_str(&content).context("Failed to parse session file")
    }

    fn save(&self, data: &Session, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_config())?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Session kept in a RON file under the user's config directory.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    handler: SessionFileHandler,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handler: SessionFileHandler::new(),
        }
    }

    /// `<config_dir>/persona-gui/session.ron`, or `./session.ron` when the
    /// platform has no config dir.
    pub fn default_location() -> Self {
        let dir = crate::config::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join("session.ron"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let session = self.handler.load(&self.path)
            .with_context(|| format!("Failed to load session: {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        self.handler.save(session, &self.path)
            .with_context(|| format!("Failed to save session: {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Session kept only for the lifetime of the process.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}
