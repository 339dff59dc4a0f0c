use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use plane_auth::CredentialStore;
use plane_config::Config;
use plane_output::{OutputRenderer, Record};
use serde::Serialize;

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Add or update a profile and store its API key
    Login(LoginArgs),
    /// Remove the stored API key (and optionally the profile)
    Logout(LogoutArgs),
    /// List configured profiles
    List,
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Profile name to create or update.
    #[arg(long, default_value = "default")]
    pub profile: String,
    /// API base URL; the hosted service is used when omitted.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Default workspace slug for this profile.
    #[arg(long)]
    pub workspace: Option<String>,
    /// Default project ID for this profile.
    #[arg(long)]
    pub project: Option<String>,
    /// API key to store (falls back to PLANE_API_KEY or an interactive prompt).
    #[arg(long, env = "PLANE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Mark this profile as the default one.
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LogoutArgs {
    /// Profile to remove the API key for.
    #[arg(long, default_value = "default")]
    pub profile: String,
    /// Remove the profile from config entirely (not just the stored key).
    #[arg(long)]
    pub remove_profile: bool,
}

pub fn handle(
    command: AuthCommand,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
    renderer: &OutputRenderer,
) -> Result<()> {
    match command {
        AuthCommand::Login(args) => login(args, config, config_path, store),
        AuthCommand::Logout(args) => logout(args, config, config_path, store),
        AuthCommand::List => list_profiles(config, store, renderer),
    }
}

fn login(
    args: LoginArgs,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
) -> Result<()> {
    if args.profile.trim().is_empty() {
        return Err(anyhow!("Profile name cannot be empty"));
    }

    if let Some(base_url) = &args.base_url {
        plane_api::ApiClient::new(base_url)
            .with_context(|| format!("Invalid Plane API URL: {base_url}"))?;
    }

    let api_key = match args.api_key {
        Some(key) if !key.trim().is_empty() => key.trim().to_owned(),
        _ => read_key_from_stdin().context("Failed to read API key from prompt")?,
    };
    if api_key.is_empty() {
        return Err(anyhow!("API key cannot be empty"));
    }

    let entry = config.profiles.entry(args.profile.clone()).or_default();
    if args.base_url.is_some() {
        entry.base_url = args.base_url.clone();
    }
    if args.workspace.is_some() {
        entry.workspace = args.workspace.clone();
    }
    if args.project.is_some() {
        entry.project = args.project.clone();
    }
    // Keys live in the credentials file, never in the YAML.
    entry.api_key = None;

    if args.default || config.default_profile.is_none() {
        config.default_profile = Some(args.profile.clone());
    }

    store
        .set_secret(&args.profile, &api_key)
        .context("Failed to store API key")?;
    config
        .save(config_path)
        .context("Unable to persist configuration file")?;

    tracing::info!(profile = %args.profile, "Profile saved and API key stored");
    Ok(())
}

fn logout(
    args: LogoutArgs,
    config: &mut Config,
    config_path: Option<&Path>,
    store: &CredentialStore,
) -> Result<()> {
    let removed = store
        .delete_secret(&args.profile)
        .context("Failed to delete stored API key")?;

    if args.remove_profile {
        if config.profiles.remove(&args.profile).is_none() && !removed {
            return Err(anyhow!("Profile '{}' does not exist", args.profile));
        }
        if config.default_profile.as_deref() == Some(args.profile.as_str()) {
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort();
            config.default_profile = names.first().map(|name| name.to_string());
        }
        config
            .save(config_path)
            .context("Unable to persist configuration file")?;
    }

    tracing::info!(profile = %args.profile, removed, "Credentials removed");
    Ok(())
}

#[derive(Debug, Serialize)]
struct ProfileRow {
    name: String,
    base_url: String,
    workspace: String,
    project: String,
    has_key: bool,
    is_default: bool,
}

impl Record for ProfileRow {
    const COLUMNS: &'static [&'static str] =
        &["Profile", "Base URL", "Workspace", "Project", "Key", "Default"];

    fn id(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.base_url.clone(),
            self.workspace.clone(),
            self.project.clone(),
            if self.has_key { "stored" } else { "missing" }.to_string(),
            if self.is_default { "*" } else { "" }.to_string(),
        ]
    }
}

fn profile_rows(config: &Config, store: &CredentialStore) -> Result<Vec<ProfileRow>> {
    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let profile = &config.profiles[name];
            Ok(ProfileRow {
                name: name.clone(),
                base_url: profile
                    .base_url
                    .clone()
                    .unwrap_or_else(|| plane_api::DEFAULT_BASE_URL.to_string()),
                workspace: profile.workspace.clone().unwrap_or_default(),
                project: profile.project.clone().unwrap_or_default(),
                has_key: profile.api_key.is_some() || store.get_secret(name)?.is_some(),
                is_default: config.default_profile.as_deref() == Some(name.as_str()),
            })
        })
        .collect()
}

fn list_profiles(
    config: &Config,
    store: &CredentialStore,
    renderer: &OutputRenderer,
) -> Result<()> {
    let rows = profile_rows(config, store)?;
    if rows.is_empty() {
        tracing::warn!("No profiles configured yet. Use `plane auth login` to add one.");
        return Ok(());
    }
    renderer.render_list(&rows)
}

fn read_key_from_stdin() -> Result<String> {
    use std::io::{self, Write};

    print!("Enter API key: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    Ok(line.trim().to_owned())
}
