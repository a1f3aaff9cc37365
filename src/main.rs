use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use futures::future::try_join_all;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use kcadm::error::format_admin_error;
use kcadm::resource::clients::ClientQuery;
use kcadm::resource::roles::{ByName, RoleQuery};
use kcadm::resource::users::UserQuery;
use kcadm::resource::ById;
use kcadm::{Config, KeycloakAdminClient};

/// Command line client for the Keycloak admin API
#[derive(Parser, Debug)]
#[command(name = "kcadm", version, about, long_about = None)]
struct Args {
    /// Server root, e.g. http://127.0.0.1:8080/auth
    #[arg(long)]
    base_url: Option<String>,

    /// Realm to administer (also the realm the admin logs into)
    #[arg(short, long)]
    realm: Option<String>,

    /// Admin username
    #[arg(short, long)]
    username: Option<String>,

    /// Admin password
    #[arg(long)]
    password: Option<String>,

    /// Use this bearer token instead of logging in
    #[arg(long, conflicts_with_all = ["username", "password"])]
    token: Option<String>,

    /// Persist --base-url, --realm and --username to the config file
    #[arg(long)]
    save: bool,

    /// Write logs at this level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "off")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Manage realm roles
    #[command(subcommand)]
    Roles(RolesCommand),
    /// Manage clients
    #[command(subcommand)]
    Clients(ClientsCommand),
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// Search users
    List(UserFilter),
    /// Show one or more users by id
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete a user by id
    Delete { id: String },
    /// Show all role mappings of a user
    Roles { id: String },
}

#[derive(ClapArgs, Debug)]
struct UserFilter {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first: Option<u32>,
    #[arg(long)]
    max: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum RolesCommand {
    /// List realm roles
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        first: Option<u32>,
        #[arg(long)]
        max: Option<u32>,
    },
    /// Show a realm role by name
    Get { name: String },
}

#[derive(Subcommand, Debug)]
enum ClientsCommand {
    /// List clients
    List {
        /// Public client identifier
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Show a client by internal id
    Get { id: String },
}

/// Append-only file logging; `KCADM_LOG` directives refine `--log-level`
fn init_file_logging(level: LevelFilter) -> Result<Option<WorkerGuard>> {
    if level == LevelFilter::OFF {
        return Ok(None);
    }

    let log_path = Config::log_path().unwrap_or_else(|| PathBuf::from("kcadm.log"));
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("KCADM_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    tracing::debug!(path = %log_path.display(), "logging to file");
    Ok(Some(guard))
}

/// Effective configuration (CLI > env > config file > defaults)
fn effective_config(args: &Args) -> Config {
    let mut config = Config::load();
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(realm) = &args.realm {
        config.realm_name = realm.clone();
    }
    if let Some(username) = &args.username {
        config.credentials.username = Some(username.clone());
    }
    if let Some(password) = &args.password {
        config.credentials.password = Some(password.clone());
    }
    config
}

/// Log the full error, hand a readable one to the user
fn report(error: kcadm::Error) -> anyhow::Error {
    tracing::error!("{:?}", error);
    anyhow::anyhow!(format_admin_error(&error))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a lookup result; an absent entity prints `null` and fails the run
fn print_found<T: Serialize>(value: &Option<T>) -> Result<ExitCode> {
    print_json(value)?;
    Ok(if value.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_users(client: &KeycloakAdminClient, command: UsersCommand) -> Result<ExitCode> {
    match command {
        UsersCommand::List(filter) => {
            let query = UserQuery {
                search: filter.search,
                username: filter.username,
                email: filter.email,
                first: filter.first,
                max: filter.max,
                ..Default::default()
            };
            let users = client.users.find.call(&query).await.map_err(report)?;
            tracing::info!("Loaded {} users", users.len());
            print_json(&users)?;
        },
        UsersCommand::Get { ids } => {
            let inputs: Vec<ById> = ids.iter().map(|id| ById::new(id.as_str())).collect();
            let users = try_join_all(inputs.iter().map(|input| client.users.find_one.call(input)))
                .await
                .map_err(report)?;
            let missing = users.iter().filter(|user| user.is_none()).count();
            print_json(&users)?;
            if missing > 0 {
                return Ok(ExitCode::FAILURE);
            }
        },
        UsersCommand::Delete { id } => {
            client.users.del.call(&ById::new(id)).await.map_err(report)?;
        },
        UsersCommand::Roles { id } => {
            let mappings = client
                .users
                .list_role_mappings
                .call(&ById::new(id))
                .await
                .map_err(report)?;
            print_json(&mappings)?;
        },
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_roles(client: &KeycloakAdminClient, command: RolesCommand) -> Result<ExitCode> {
    match command {
        RolesCommand::List { search, first, max } => {
            let query = RoleQuery {
                search,
                first,
                max,
                ..Default::default()
            };
            let roles = client.roles.find.call(&query).await.map_err(report)?;
            print_json(&roles)?;
            Ok(ExitCode::SUCCESS)
        },
        RolesCommand::Get { name } => {
            let role = client
                .roles
                .find_one_by_name
                .call(&ByName::new(name))
                .await
                .map_err(report)?;
            print_found(&role)
        },
    }
}

async fn run_clients(client: &KeycloakAdminClient, command: ClientsCommand) -> Result<ExitCode> {
    match command {
        ClientsCommand::List { client_id } => {
            let query = ClientQuery {
                client_id,
                ..Default::default()
            };
            let clients = client.clients.find.call(&query).await.map_err(report)?;
            print_json(&clients)?;
            Ok(ExitCode::SUCCESS)
        },
        ClientsCommand::Get { id } => {
            let found = client.clients.find_one.call(&ById::new(id)).await.map_err(report)?;
            print_found(&found)
        },
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = init_file_logging(args.log_level)?;

    let config = effective_config(&args);
    if args.save {
        // Never write the password or token to disk
        let mut persisted = config.clone();
        persisted.credentials.password = None;
        persisted.save().context("Failed to save configuration")?;
    }

    tracing::info!("Using {} realm {}", config.base_url, config.realm_name);

    let client = match &args.token {
        Some(token) => KeycloakAdminClient::with_token(&config, token),
        None => KeycloakAdminClient::from_config(&config),
    }
    .map_err(report)?;

    match args.command {
        Command::Users(command) => run_users(&client, command).await,
        Command::Roles(command) => run_roles(&client, command).await,
        Command::Clients(command) => run_clients(&client, command).await,
    }
}
