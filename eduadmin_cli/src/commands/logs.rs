//! Operation log administration: browse, export, prune.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use eduadmin_lib::{
    validation, Client, FilterSet, LogSource, PageRequest, PageSource, PagedCollection, Refresh,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{
    pager_line, print_json, print_logs_csv, print_logs_markdown, print_logs_table, write_logs_csv,
    OutputFormat,
};

/// The log screen pages smaller than the entity tables.
const LOG_PAGE_SIZE: i64 = 15;

/// Export pulls one oversized page instead of walking the pager.
const EXPORT_PAGE_SIZE: i64 = 1000;

#[derive(Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Subcommand)]
pub enum LogsCommand {
    /// Browse the operation log
    List(ListArgs),
    /// Export the filtered log to a CSV file
    Export(ExportArgs),
    /// Delete log entries older than a cutoff
    Clean(CleanArgs),
    /// Delete a single log entry
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by action tag, e.g. user.login
    #[arg(long)]
    pub action: Option<String>,

    /// Filter by operator account id
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Only entries on or after this date, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Filter by action tag
    #[arg(long)]
    pub action: Option<String>,

    /// Filter by operator account id
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Only entries on or after this date, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,

    /// File to write
    #[arg(long, default_value = "logs.csv")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Delete entries older than this many days
    #[arg(long)]
    pub older_than_days: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RmArgs {
    /// Log entry id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: &LogsArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        LogsCommand::List(list_args) => list(list_args, client, format).await,
        LogsCommand::Export(export_args) => export(export_args, client).await,
        LogsCommand::Clean(clean_args) => clean(clean_args, client).await,
        LogsCommand::Rm(rm_args) => rm(rm_args, client).await,
    }
}

fn log_filters(
    action: &Option<String>,
    user_id: Option<i64>,
    start_date: &Option<String>,
) -> Result<FilterSet> {
    let mut filters = FilterSet::new();
    if let Some(action) = action {
        filters.set("action", validation::validate_search(action)?);
    }
    if let Some(user_id) = user_id {
        filters.set("user_id", user_id);
    }
    if let Some(date) = start_date {
        // Normalized here so the request carries a clean YYYY-MM-DD.
        let parsed = validation::validate_date(date)?;
        filters.set("start_date", parsed.format("%Y-%m-%d").to_string());
    }
    Ok(filters)
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let filters = log_filters(&args.action, args.user_id, &args.start_date)?;

    let collection = PagedCollection::new(LogSource::new(Arc::clone(client)), LOG_PAGE_SIZE);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        eprintln!(
            "Page {}/{}",
            collection.current_page(),
            result.total_pages
        );
        match format {
            OutputFormat::Table => print_logs_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_logs_csv(&result.items)?,
            OutputFormat::Markdown => print_logs_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn export(args: &ExportArgs, client: &Arc<Client>) -> Result<()> {
    let filters = log_filters(&args.action, args.user_id, &args.start_date)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Fetching log entries...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let source = LogSource::new(Arc::clone(client));
    let fetched = source
        .fetch_page(PageRequest {
            page: 1,
            page_size: EXPORT_PAGE_SIZE,
            filters,
        })
        .await;
    spinner.finish_and_clear();
    let result = fetched?;

    let file = std::fs::File::create(&args.out)
        .with_context(|| format!("cannot create {}", args.out.display()))?;
    write_logs_csv(file, &result.items)?;
    eprintln!(
        "Exported {} log entries to {}.",
        result.items.len(),
        args.out.display()
    );
    Ok(())
}

async fn clean(args: &CleanArgs, client: &Arc<Client>) -> Result<()> {
    if args.older_than_days <= 0 {
        bail!("--older-than-days must be positive");
    }
    if !args.yes {
        bail!(
            "refusing to delete log entries older than {} days without --yes",
            args.older_than_days
        );
    }

    let cutoff = Utc::now() - chrono::Duration::days(args.older_than_days);
    let result = client.clean_logs(cutoff).await?;
    eprintln!("Deleted {} log entries.", result.deleted_count);
    Ok(())
}

async fn rm(args: &RmArgs, client: &Arc<Client>) -> Result<()> {
    if !args.yes {
        bail!("refusing to delete log entry {} without --yes", args.id);
    }
    client.delete_log(args.id).await?;
    eprintln!("Log entry {} deleted.", args.id);
    Ok(())
}
