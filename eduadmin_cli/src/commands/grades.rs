//! Grade review and publication.
//!
//! The backend returns both worklists as flat arrays; filtering and
//! pagination happen client-side, so the same pager applies as everywhere
//! else.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::{
    validation, Client, FilterSet, PagedCollection, PublishSource, Refresh, ReviewSource,
};

use crate::output::{
    pager_line, print_json, print_publish_csv, print_publish_markdown, print_publish_table,
    print_reviews_csv, print_reviews_markdown, print_reviews_table, OutputFormat,
};

#[derive(Args)]
pub struct GradesArgs {
    #[command(subcommand)]
    pub command: GradesCommand,
}

#[derive(Subcommand)]
pub enum GradesCommand {
    /// List courses awaiting review
    Review(ReviewArgs),
    /// Approve a submitted grade sheet
    Approve(ApproveArgs),
    /// Reject a submitted grade sheet with a reason
    Reject(RejectArgs),
    /// Approve several grade sheets at once
    BatchApprove(BatchApproveArgs),
    /// Reject several grade sheets at once with one reason
    BatchReject(BatchRejectArgs),
    /// List reviewed courses eligible for publication
    PublishList(PublishListArgs),
    /// Publish approved grade sheets to students
    Publish(PublishArgs),
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Search by course name or code
    #[arg(long)]
    pub search: Option<String>,

    /// Filter: has_warning or no_warning
    #[arg(long)]
    pub warning: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct ApproveArgs {
    /// Course id
    pub course_id: i64,
}

#[derive(Args)]
pub struct RejectArgs {
    /// Course id
    pub course_id: i64,

    /// Reason sent back to the submitting teacher
    #[arg(long)]
    pub reason: String,
}

#[derive(Args)]
pub struct BatchApproveArgs {
    /// Course ids, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub course_ids: Vec<i64>,
}

#[derive(Args)]
pub struct BatchRejectArgs {
    /// Course ids, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub course_ids: Vec<i64>,

    /// Reason sent back to the submitting teachers
    #[arg(long)]
    pub reason: String,
}

#[derive(Args)]
pub struct PublishListArgs {
    /// Search by course name or code
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by semester, e.g. 2025-2026-1
    #[arg(long)]
    pub semester: Option<String>,

    /// Filter by status: approved or published
    #[arg(long)]
    pub status: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct PublishArgs {
    /// Course ids, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub course_ids: Vec<i64>,
}

pub async fn run(args: &GradesArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        GradesCommand::Review(review_args) => review(review_args, client, format).await,
        GradesCommand::Approve(approve_args) => approve(approve_args, client).await,
        GradesCommand::Reject(reject_args) => reject(reject_args, client).await,
        GradesCommand::BatchApprove(batch_args) => batch_approve(batch_args, client).await,
        GradesCommand::BatchReject(batch_args) => batch_reject(batch_args, client).await,
        GradesCommand::PublishList(list_args) => publish_list(list_args, client, format).await,
        GradesCommand::Publish(publish_args) => publish(publish_args, client).await,
    }
}

async fn review(args: &ReviewArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref search) = args.search {
        filters.set("search", validation::validate_search(search)?);
    }
    if let Some(ref warning) = args.warning {
        filters.set("warning", warning.as_str());
    }

    let collection = PagedCollection::new(ReviewSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} courses awaiting review)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_reviews_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_reviews_csv(&result.items)?,
            OutputFormat::Markdown => print_reviews_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn approve(args: &ApproveArgs, client: &Arc<Client>) -> Result<()> {
    client.approve_grades(args.course_id).await?;
    eprintln!("Grades for course {} approved.", args.course_id);
    Ok(())
}

async fn reject(args: &RejectArgs, client: &Arc<Client>) -> Result<()> {
    let reason = validation::sanitize_text(&args.reason, 200)?;
    client.reject_grades(args.course_id, &reason).await?;
    eprintln!("Grades for course {} rejected.", args.course_id);
    Ok(())
}

async fn batch_approve(args: &BatchApproveArgs, client: &Arc<Client>) -> Result<()> {
    if args.course_ids.is_empty() {
        bail!("no course ids given");
    }
    client.batch_approve_grades(&args.course_ids).await?;
    eprintln!("Approved grades for {} courses.", args.course_ids.len());
    Ok(())
}

async fn batch_reject(args: &BatchRejectArgs, client: &Arc<Client>) -> Result<()> {
    if args.course_ids.is_empty() {
        bail!("no course ids given");
    }
    let reason = validation::sanitize_text(&args.reason, 200)?;
    client.batch_reject_grades(&args.course_ids, &reason).await?;
    eprintln!("Rejected grades for {} courses.", args.course_ids.len());
    Ok(())
}

async fn publish_list(
    args: &PublishListArgs,
    client: &Arc<Client>,
    format: &OutputFormat,
) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref search) = args.search {
        filters.set("search", validation::validate_search(search)?);
    }
    if let Some(ref semester) = args.semester {
        filters.set("semester", validation::validate_semester(semester)?);
    }
    if let Some(ref status) = args.status {
        filters.set("status", status.as_str());
    }

    let collection = PagedCollection::new(PublishSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} reviewed courses)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_publish_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_publish_csv(&result.items)?,
            OutputFormat::Markdown => print_publish_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn publish(args: &PublishArgs, client: &Arc<Client>) -> Result<()> {
    if args.course_ids.is_empty() {
        bail!("no course ids given");
    }
    client.publish_grades(&args.course_ids).await?;
    eprintln!("Published grades for {} courses.", args.course_ids.len());
    Ok(())
}
