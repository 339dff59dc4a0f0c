mod commands;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use plane_api::{ApiClient, ApiError, DEFAULT_BASE_URL};
use plane_auth::CredentialStore;
use plane_config::{process_env, Config, Profile};
use plane_output::{OutputFormat, OutputRenderer};
use tracing_subscriber::{fmt, EnvFilter};

use commands::auth::{self, AuthCommand};
use commands::CommandContext;

#[derive(Parser, Debug)]
#[command(name = "plane", version, about = "Command-line client for the Plane API", long_about = None)]
struct Cli {
    /// Profile to use from config file
    #[arg(short, long)]
    profile: Option<String>,

    /// Path to config file (defaults to ~/.plane/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Workspace slug, overriding the profile and PLANE_WORKSPACE_SLUG
    #[arg(short, long, global = true)]
    workspace: Option<String>,

    /// Project ID, overriding the profile and PLANE_PROJECT_ID
    #[arg(long, global = true)]
    project: Option<String>,

    /// Output format for command results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    /// Verbose logging, including every request and response
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: PlaneCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum PlaneCommand {
    /// Manage profiles and stored API keys
    #[command(subcommand)]
    Auth(AuthCommand),
    #[command(flatten)]
    Resource(ResourceCommand),
}

#[derive(Subcommand, Debug, Clone)]
enum ResourceCommand {
    /// Projects in the workspace
    Projects(commands::projects::ProjectsArgs),
    /// Issues in a project
    Issues(commands::issues::IssuesArgs),
    /// Cycles and the issues in them
    Cycles(commands::cycles::CyclesArgs),
    /// Modules and the issues in them
    Modules(commands::modules::ModulesArgs),
    /// Issue labels
    Labels(commands::labels::LabelsArgs),
    /// Workflow states
    States(commands::states::StatesArgs),
    /// Issue comments
    Comments(commands::comments::CommentsArgs),
    /// Links attached to issues
    Links(commands::links::LinksArgs),
    /// Files attached to issues
    Attachments(commands::attachments::AttachmentsArgs),
    /// Time logged against issues
    Worklogs(commands::worklogs::WorklogsArgs),
    /// Project members
    Members(commands::members::MembersArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    if let Err(err) = run(cli).await {
        if let Some(hint) = err.downcast_ref::<ApiError>().and_then(ApiError::suggestion) {
            eprintln!("hint: {hint}");
        }
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    let mut config = Config::load(config_path.as_ref())?;
    let renderer = OutputRenderer::new(cli.output);
    let store = CredentialStore::new()?;

    let command = match cli.command {
        PlaneCommand::Auth(command) => {
            return auth::handle(command, &mut config, config_path.as_deref(), &store, &renderer);
        }
        PlaneCommand::Resource(command) => command,
    };

    let profile_name = cli
        .profile
        .clone()
        .or_else(|| {
            config
                .resolve_profile(None)
                .map(|(name, _)| name.to_string())
        })
        .unwrap_or_else(|| "default".to_string());
    let mut profile = config.effective_profile(cli.profile.as_deref(), process_env)?;
    if cli.workspace.is_some() {
        profile.workspace = cli.workspace.clone();
    }
    if cli.project.is_some() {
        profile.project = cli.project.clone();
    }

    let client = build_client(&profile, &profile_name, &store, cli.debug)?;
    let ctx = CommandContext::new(client, &renderer, profile.workspace, profile.project);

    match command {
        ResourceCommand::Projects(args) => commands::projects::execute(args, &ctx).await,
        ResourceCommand::Issues(args) => commands::issues::execute(args, &ctx).await,
        ResourceCommand::Cycles(args) => commands::cycles::execute(args, &ctx).await,
        ResourceCommand::Modules(args) => commands::modules::execute(args, &ctx).await,
        ResourceCommand::Labels(args) => commands::labels::execute(args, &ctx).await,
        ResourceCommand::States(args) => commands::states::execute(args, &ctx).await,
        ResourceCommand::Comments(args) => commands::comments::execute(args, &ctx).await,
        ResourceCommand::Links(args) => commands::links::execute(args, &ctx).await,
        ResourceCommand::Attachments(args) => commands::attachments::execute(args, &ctx).await,
        ResourceCommand::Worklogs(args) => commands::worklogs::execute(args, &ctx).await,
        ResourceCommand::Members(args) => commands::members::execute(args, &ctx).await,
    }
}

/// Wire events are always let through; the client only emits them while its
/// debug flag is on, which `PLANE_API_DEBUG` or a profile can also set.
fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug {
        "info,plane_api=debug,plane=debug"
    } else {
        "warn,plane_api::wire=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

/// API key lookup: PLANE_API_KEY (already folded into the profile), then the
/// profile itself, then the credentials file.
fn build_client(
    profile: &Profile,
    profile_name: &str,
    store: &CredentialStore,
    debug: bool,
) -> Result<ApiClient> {
    let api_key = match profile.api_key.clone().filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => store.get_secret(profile_name)?.ok_or_else(|| {
            anyhow!(
                "No API key for profile '{profile_name}'. Set PLANE_API_KEY or run `plane auth login --profile {profile_name}`"
            )
        })?,
    };

    let base_url = profile.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let mut client = ApiClient::new(base_url)
        .with_context(|| format!("Invalid base URL {base_url}"))?
        .with_api_key(api_key)
        .with_debug(debug || profile.debug_enabled());

    if let Some(secs) = profile.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }
    Ok(client)
}
