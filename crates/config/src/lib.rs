use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_API_KEY: &str = "PLANE_API_KEY";
pub const ENV_WORKSPACE: &str = "PLANE_WORKSPACE_SLUG";
pub const ENV_PROJECT: &str = "PLANE_PROJECT_ID";
pub const ENV_BASE_URL: &str = "PLANE_API_BASE_URL";
pub const ENV_DEBUG: &str = "PLANE_API_DEBUG";

/// Represents the full CLI configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Config {
    /// Load configuration from the provided path or `~/.plane/config.yaml`.
    ///
    /// A missing file is an empty configuration.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Unable to read config file at {}", path.display()))?;

        serde_yaml::from_str(&raw)
            .with_context(|| format!("Malformed YAML in config file {}", path.display()))
    }

    /// Persist the configuration to disk, creating parent directories if needed.
    pub fn save<P: AsRef<Path>>(&self, path: Option<P>) -> Result<()> {
        let path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(Config::default_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let serialized = serde_yaml::to_string(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Unable to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Returns the requested profile, else the default one, else the first available.
    pub fn resolve_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Option<(&'a str, &'a Profile)> {
        if let Some(name) = requested {
            self.profiles.get(name).map(|profile| (name, profile))
        } else if let Some(default_name) = self.default_profile.as_deref() {
            self.profiles
                .get(default_name)
                .map(|profile| (default_name, profile))
        } else {
            let mut names: Vec<&String> = self.profiles.keys().collect();
            names.sort();
            names
                .first()
                .and_then(|name| self.profiles.get(*name).map(|p| (name.as_str(), p)))
        }
    }

    /// Profile `requested` (or the default) with environment overrides applied.
    ///
    /// A profile named explicitly must exist; otherwise an empty profile is used.
    pub fn effective_profile<F>(&self, requested: Option<&str>, lookup: F) -> Result<Profile>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut profile = match self.resolve_profile(requested) {
            Some((name, profile)) => {
                debug!(profile = name, "Using profile");
                profile.clone()
            }
            None => {
                if let Some(name) = requested {
                    anyhow::bail!("Profile '{name}' not found");
                }
                Profile::default()
            }
        };

        profile.apply_env(lookup);
        Ok(profile)
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".plane");
        path.push("config.yaml");
        path
    }
}

/// Connection settings for one Plane instance. Every field is optional so a
/// profile can be partially configured and completed from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Workspace slug, e.g. `acme` in `app.plane.so/acme`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Overlay values from `PLANE_*` variables, as reported by `lookup`.
    ///
    /// Empty values are ignored. `PLANE_API_DEBUG` accepts `true` or `1`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(workspace) = get(ENV_WORKSPACE) {
            self.workspace = Some(workspace);
        }
        if let Some(project) = get(ENV_PROJECT) {
            self.project = Some(project);
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(debug) = get(ENV_DEBUG) {
            let debug = debug.trim();
            self.debug = Some(debug.eq_ignore_ascii_case("true") || debug == "1");
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }
}

/// Reads the process environment; the usual `lookup` for [`Profile::apply_env`].
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
