mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eduadmin_lib::{AdminError, Client, SessionStore};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "eduadmin")]
#[command(about = "Administer an EduAdmin teaching backend from the terminal")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store a session token
    Login(commands::auth::LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the account behind the stored session
    Whoami,
    /// Show headline record counts
    Dashboard,
    /// Show backend health and aggregate statistics
    Status,
    /// Manage classes
    Classes(commands::classes::ClassesArgs),
    /// Manage student accounts
    Students(commands::students::StudentsArgs),
    /// Manage teacher accounts
    Teachers(commands::teachers::TeachersArgs),
    /// Manage the course catalog
    Courses(commands::courses::CoursesArgs),
    /// Manage classrooms
    Classrooms(commands::classrooms::ClassroomsArgs),
    /// Teaching assignments and timetables
    Schedule(commands::schedule::ScheduleArgs),
    /// Grade review and publication
    Grades(commands::grades::GradesArgs),
    /// Operation log administration
    Logs(commands::logs::LogsArgs),
    /// Backup administration
    Backups(commands::backups::BackupsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eduadmin=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let store = SessionStore::from_env();
    let client = build_client(&store)?;

    if let Err(err) = dispatch(&cli, &client, &store, &format).await {
        if session_expired(&err) {
            // The stored token is dead; drop it so the next command does
            // not retry it either.
            let _ = store.clear();
            anyhow::bail!("session expired. Run `eduadmin login` to sign in again");
        }
        return Err(err);
    }

    Ok(())
}

/// Builds the API client from `EDUADMIN_API_URL` (falling back to the
/// compiled-in default) and attaches the stored session token when one
/// exists.
fn build_client(store: &SessionStore) -> Result<Arc<Client>> {
    let mut client = match std::env::var("EDUADMIN_API_URL") {
        Ok(url) => Client::with_base_url(&url),
        Err(_) => Client::new(),
    };
    if let Some(session) = store.load()? {
        client = client.with_token(&session.token);
    }
    Ok(Arc::new(client))
}

fn session_expired(err: &anyhow::Error) -> bool {
    if let Some(admin) = err.downcast_ref::<AdminError>() {
        return admin.is_session_expired();
    }
    matches!(
        err.downcast_ref::<eduadmin_lib::eduadmin_api::Error>(),
        Some(eduadmin_lib::eduadmin_api::Error::SessionExpired)
    )
}

async fn dispatch(
    cli: &Cli,
    client: &Arc<Client>,
    store: &SessionStore,
    format: &OutputFormat,
) -> Result<()> {
    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, client, store).await,
        Commands::Logout => commands::auth::logout(store),
        Commands::Whoami => commands::auth::whoami(client, store, format).await,
        Commands::Dashboard => commands::dashboard::run(client, format).await,
        Commands::Status => commands::status::run(client, format).await,
        Commands::Classes(args) => commands::classes::run(args, client, format).await,
        Commands::Students(args) => commands::students::run(args, client, format).await,
        Commands::Teachers(args) => commands::teachers::run(args, client, format).await,
        Commands::Courses(args) => commands::courses::run(args, client, format).await,
        Commands::Classrooms(args) => commands::classrooms::run(args, client, format).await,
        Commands::Schedule(args) => commands::schedule::run(args, client, format).await,
        Commands::Grades(args) => commands::grades::run(args, client, format).await,
        Commands::Logs(args) => commands::logs::run(args, client, format).await,
        Commands::Backups(args) => commands::backups::run(args, client, format).await,
    }
}
