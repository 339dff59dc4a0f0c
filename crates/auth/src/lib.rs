//! API keys kept outside the YAML config, in a JSON map readable only by the owner.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Profile name to API key, persisted as pretty JSON with 600 permissions.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at `~/.plane/credentials`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().context("Cannot determine home directory")?;
        Ok(Self::at(home.join(".plane").join("credentials")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_secret(&self, profile: &str, api_key: &str) -> Result<()> {
        let mut creds = self.read()?;
        creds.insert(profile.to_string(), api_key.to_string());
        self.write(&creds)
    }

    pub fn get_secret(&self, profile: &str) -> Result<Option<String>> {
        Ok(self.read()?.remove(profile))
    }

    /// Returns whether a key was stored for `profile`.
    pub fn delete_secret(&self, profile: &str) -> Result<bool> {
        let mut creds = self.read()?;
        if creds.remove(profile).is_none() {
            return Ok(false);
        }
        self.write(&creds)?;
        Ok(true)
    }

    /// Profiles with a stored key, sorted.
    pub fn profiles(&self) -> Result<Vec<String>> {
        Ok(self.read()?.into_keys().collect())
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed credentials file {}", self.path.display()))
    }

    fn write(&self, creds: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Unable to write {}", self.path.display()))?;
        let json = serde_json::to_string_pretty(creds)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
