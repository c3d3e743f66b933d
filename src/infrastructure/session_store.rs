//! Persisted copy of the signed-in session (`session.json` in the data dir)

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use tokio::fs;

use crate::domain::shop::Session;

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nothing was saved or the file no longer parses
    pub async fn load(&self) -> Result<Option<Session>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("reading {}", self.path.display()))
            }
        };
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    /// Writes to a temporary file and renames it over the target
    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path)
            .await
            .wrap_err_with(|| format!("writing {}", self.path.display()))?;
        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).wrap_err_with(|| format!("removing {}", self.path.display())),
        }
    }
}
