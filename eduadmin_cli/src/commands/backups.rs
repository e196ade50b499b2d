//! Backup administration: list archives and start new ones.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::{BackupKind, NewBackup};
use eduadmin_lib::{validation, Client};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{
    print_backups_csv, print_backups_markdown, print_backups_table, print_json, OutputFormat,
};

#[derive(Args)]
pub struct BackupsArgs {
    #[command(subcommand)]
    pub command: BackupsCommand,
}

#[derive(Subcommand)]
pub enum BackupsCommand {
    /// List existing backups
    List,
    /// Start a new backup
    Create(CreateArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// What this backup is for
    #[arg(long)]
    pub description: String,

    /// Backup type: full or incremental
    #[arg(long, default_value = "full")]
    pub kind: String,

    /// Run an integrity check once the archive is written
    #[arg(long)]
    pub verify: bool,
}

pub async fn run(args: &BackupsArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        BackupsCommand::List => list(client, format).await,
        BackupsCommand::Create(create_args) => create(create_args, client).await,
    }
}

async fn list(client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let resp = client.get_backups().await?;
    if !resp.success {
        bail!(
            "{}",
            resp.message
                .unwrap_or_else(|| "request rejected by the server".to_string())
        );
    }
    let items = resp.data.unwrap_or_default();
    eprintln!("{} backups", items.len());
    match format {
        OutputFormat::Table => print_backups_table(&items),
        OutputFormat::Json => print_json(&items),
        OutputFormat::Csv => print_backups_csv(&items)?,
        OutputFormat::Markdown => print_backups_markdown(&items),
    }
    Ok(())
}

async fn create(args: &CreateArgs, client: &Arc<Client>) -> Result<()> {
    let kind: BackupKind = args
        .kind
        .parse()
        .map_err(|_| anyhow!("backup type must be full or incremental, got '{}'", args.kind))?;
    let payload = NewBackup {
        description: validation::sanitize_text(&args.description, 200)?,
        kind,
        verification: args.verify,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Creating backup...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = client.create_backup(&payload).await;
    spinner.finish_and_clear();
    result?;

    eprintln!("Backup started ({}).", payload.kind);
    Ok(())
}
