use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use scout_admin::config::ConfigError;
use scout_admin::gateway::types::{AuditLogQuery, ClientFields, InviteRequest};
use scout_admin::session::FileStorage;
use scout_admin::{Gateway, GatewayConfig, GatewayError, HttpTransport, SessionError, SessionPhase, SessionStore, TransportError};
use serde::Serialize;
use serde_json::json;

const SESSION_ENDED_NOTICE: &str = "session ended, run `scout login`";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("{0}")]
    Gateway(#[from] GatewayError),
    #[error("not signed in; run `scout login`")]
    NotSignedIn,
    #[error("missing password; pass --password or set SCOUT_PASSWORD")]
    MissingPassword,
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,
    #[error("client {0} has no contact email or tenant token to invite")]
    NotInvitable(String),
    #[error("output encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Gateway(GatewayError::AuthExpired))
    }
}

#[derive(Parser, Debug)]
#[command(name = "scout", about = "AutomationScout admin CLI")]
struct Cli {
    /// Backend base URL; defaults from SCOUT_ENV.
    #[arg(long, env = "SCOUT_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "SCOUT_SESSION_FILE", default_value = ".scout-session.json")]
    session_file: PathBuf,

    /// Log session transitions to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Logout,
    Status,
    Health,
    #[command(subcommand)]
    Clients(ClientsCommand),
    #[command(subcommand)]
    Widgets(CatalogCommand),
    #[command(subcommand)]
    Workflows(CatalogCommand),
    #[command(subcommand)]
    Compliance(ComplianceCommand),
}

impl Command {
    fn requires_session(&self) -> bool {
        matches!(self, Self::Clients(_) | Self::Widgets(_) | Self::Workflows(_) | Self::Compliance(_))
    }
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "SCOUT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ClientsCommand {
    List,
    Get { id: String },
    Create(ClientFieldArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: ClientFieldArgs,
    },
    Delete { id: String },
    /// Email the client's contact a link to their installer package.
    Invite { id: String },
}

#[derive(Args, Debug, Default)]
struct ClientFieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    plan: Option<String>,
    /// Installation package tier, e.g. Standard.
    #[arg(long)]
    package: Option<String>,
    #[arg(long)]
    contact_name: Option<String>,
    #[arg(long)]
    contact_email: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<ClientFieldArgs> for ClientFields {
    fn from(args: ClientFieldArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            status: args.status,
            plan: args.plan,
            package: args.package,
            contact_name: args.contact_name,
            contact_email: args.contact_email,
            notes: args.notes,
        }
    }
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    List,
    Get { id: String },
}

#[derive(Subcommand, Debug)]
enum ComplianceCommand {
    Dashboard,
    AuditLogs(AuditLogArgs),
    Reports,
}

#[derive(Args, Debug, Default)]
struct AuditLogArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    client_id: Option<String>,
    #[arg(long)]
    action: Option<String>,
}

impl From<AuditLogArgs> for AuditLogQuery {
    fn from(args: AuditLogArgs) -> Self {
        Self { page: args.page, limit: args.limit, client_id: args.client_id, action: args.action }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }

    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::INFO } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Outcome { error, notified }) => {
            if !(notified && error.is_auth_expired()) {
                eprintln!("error: {error}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Failed run, noting whether the sign-out notice already went out.
struct Outcome {
    error: CliError,
    notified: bool,
}

impl From<CliError> for Outcome {
    fn from(error: CliError) -> Self {
        Self { error, notified: false }
    }
}

async fn run(cli: Cli) -> Result<(), Outcome> {
    let config = gateway_config(cli.base_url.as_deref()).map_err(CliError::from)?;
    let transport = Arc::new(HttpTransport::new(config).map_err(CliError::from)?);
    let storage = Arc::new(FileStorage::new(cli.session_file));
    let session = SessionStore::new(transport, storage);
    let gateway = Gateway::new(session.clone());

    match cli.command {
        Command::Login(args) => Ok(run_login(&session, args).await?),
        Command::Logout => Ok(run_logout(&session).await?),
        Command::Status => Ok(run_status(&session).await?),
        command => {
            if command.requires_session() {
                require_session(&session).await?;
            }
            let mut observer = session.observe();
            let result = execute(&gateway, command).await;
            let notified = observer.signed_out();
            if notified {
                eprintln!("{SESSION_ENDED_NOTICE}");
            }
            result.map_err(|error| Outcome { error, notified })
        }
    }
}

fn gateway_config(base_url: Option<&str>) -> Result<GatewayConfig, ConfigError> {
    let config = GatewayConfig::from_env()?;
    match base_url {
        Some(url) => Ok(GatewayConfig { base_url: GatewayConfig::new(url)?.base_url, ..config }),
        None => Ok(config),
    }
}

async fn require_session(session: &SessionStore) -> Result<(), CliError> {
    match session.initialize().await? {
        SessionPhase::Authenticated => Ok(()),
        _ => Err(CliError::NotSignedIn),
    }
}

async fn run_login(session: &SessionStore, args: LoginArgs) -> Result<(), CliError> {
    let password = args.password.ok_or(CliError::MissingPassword)?;
    // Restore first so a live persisted session is kept rather than orphaned.
    if let Err(e) = session.initialize().await {
        tracing::info!(error = %e, "no live session to keep");
    }
    let credential = session.login(&args.email, &password).await?;
    print_json(&json!({
        "phase": session.phase(),
        "user": credential.user(),
    }))
}

async fn run_logout(session: &SessionStore) -> Result<(), CliError> {
    // Restore first so the backend is told which token to revoke.
    if let Err(e) = session.initialize().await {
        tracing::info!(error = %e, "no live session to revoke");
    }
    session.logout().await;
    print_json(&json!({ "phase": session.phase() }))
}

async fn run_status(session: &SessionStore) -> Result<(), CliError> {
    let (phase, message) = match session.initialize().await {
        Ok(phase) => (phase, None),
        Err(e) => (session.phase(), Some(e.to_string())),
    };
    print_json(&json!({
        "phase": phase,
        "user": session.user(),
        "message": message,
    }))
}

async fn execute(gateway: &Gateway, command: Command) -> Result<(), CliError> {
    match command {
        Command::Health => print_json(&gateway.health().await?),
        Command::Clients(cmd) => run_clients(gateway, cmd).await,
        Command::Widgets(cmd) => match cmd {
            CatalogCommand::List => print_json(&gateway.widgets().list().await?),
            CatalogCommand::Get { id } => print_json(&gateway.widgets().get(&id).await?),
        },
        Command::Workflows(cmd) => match cmd {
            CatalogCommand::List => print_json(&gateway.workflows().list().await?),
            CatalogCommand::Get { id } => print_json(&gateway.workflows().get(&id).await?),
        },
        Command::Compliance(cmd) => match cmd {
            ComplianceCommand::Dashboard => print_json(&gateway.compliance().dashboard().await?),
            ComplianceCommand::AuditLogs(args) => {
                print_json(&gateway.compliance().audit_logs(&args.into()).await?)
            }
            ComplianceCommand::Reports => print_json(&gateway.compliance().reports().await?),
        },
        Command::Login(_) | Command::Logout | Command::Status => Ok(()),
    }
}

async fn run_clients(gateway: &Gateway, cmd: ClientsCommand) -> Result<(), CliError> {
    let clients = gateway.clients();
    match cmd {
        ClientsCommand::List => print_json(&clients.list().await?),
        ClientsCommand::Get { id } => print_json(&clients.get(&id).await?),
        ClientsCommand::Create(fields) => print_json(&clients.create(&fields.into()).await?),
        ClientsCommand::Update { id, fields } => {
            let fields = ClientFields::from(fields);
            if fields.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            print_json(&clients.update(&id, &fields).await?)
        }
        ClientsCommand::Delete { id } => {
            clients.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
        ClientsCommand::Invite { id } => {
            let client = clients.get(&id).await?;
            let invite = InviteRequest::for_client(&client).ok_or(CliError::NotInvitable(id))?;
            let receipt = gateway.invites().send_installation(&invite).await?;
            print_json(&json!({
                "clientId": invite.client_id,
                "email": invite.email,
                "downloadLink": invite.download_link,
                "receipt": receipt,
            }))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
