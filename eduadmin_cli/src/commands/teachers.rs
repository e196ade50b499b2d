//! Teacher account management: list, create, update, delete.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::TeacherPayload;
use eduadmin_lib::{
    validation, Client, EditorFlow, FilterSet, PagedCollection, Refresh, TeacherSource,
};

use crate::output::{
    pager_line, print_json, print_teachers_csv, print_teachers_markdown, print_teachers_table,
    OutputFormat,
};

#[derive(Args)]
pub struct TeachersArgs {
    #[command(subcommand)]
    pub command: TeachersCommand,
}

#[derive(Subcommand)]
pub enum TeachersCommand {
    /// List teachers
    List(ListArgs),
    /// Create a teacher account
    Add(AddArgs),
    /// Update a teacher account
    Edit(EditArgs),
    /// Delete a teacher account
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Search by name or staff number
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by academic title, e.g. 教授
    #[arg(long)]
    pub title: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Staff number; generated by the backend when omitted
    #[arg(long)]
    pub staff_no: Option<String>,

    /// Academic title
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Teacher id
    pub id: i64,

    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New academic title
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Teacher id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: &TeachersArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        TeachersCommand::List(list_args) => list(list_args, client, format).await,
        TeachersCommand::Add(add_args) => add(add_args, client).await,
        TeachersCommand::Edit(edit_args) => edit(edit_args, client).await,
        TeachersCommand::Rm(rm_args) => rm(rm_args, client).await,
    }
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref search) = args.search {
        filters.set("search", validation::validate_search(search)?);
    }
    if let Some(ref title) = args.title {
        filters.set("title", validation::validate_search(title)?);
    }

    let collection = PagedCollection::new(TeacherSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} total teachers)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_teachers_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_teachers_csv(&result.items)?,
            OutputFormat::Markdown => print_teachers_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn add(args: &AddArgs, client: &Arc<Client>) -> Result<()> {
    let payload = TeacherPayload {
        teacher_id_number: args.staff_no.clone(),
        full_name: validation::sanitize_text(&args.name, validation::MAX_SEARCH_LENGTH)?,
        title: args.title.clone(),
        email: validation::validate_email(&args.email)?,
    };

    let mut flow = EditorFlow::new();
    flow.begin_loading()?;
    flow.open(payload.clone())?;
    flow.submit()?;
    match client.create_teacher(&payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Teacher '{}' created.", payload.full_name);
            Ok(())
        }
        Err(err) => {
            flow.fail(err.to_string())?;
            Err(err.into())
        }
    }
}

async fn edit(args: &EditArgs, client: &Arc<Client>) -> Result<()> {
    let mut flow = EditorFlow::new();
    flow.begin_loading()?;
    let existing = match client.get_teacher(args.id).await {
        Ok(found) => found,
        Err(err) => {
            flow.fail(err.to_string())?;
            return Err(err.into());
        }
    };

    // The staff number is fixed at creation time and carried through
    // unchanged.
    let payload = TeacherPayload {
        teacher_id_number: existing.teacher_id_number,
        full_name: match &args.name {
            Some(name) => validation::sanitize_text(name, validation::MAX_SEARCH_LENGTH)?,
            None => existing.full_name,
        },
        title: args.title.clone().or(existing.title),
        email: match &args.email {
            Some(email) => validation::validate_email(email)?,
            None => existing.email.unwrap_or_default(),
        },
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.update_teacher(args.id, &payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Teacher {} updated.", args.id);
            Ok(())
        }
        Err(err) => {
            flow.fail(err.to_string())?;
            Err(err.into())
        }
    }
}

async fn rm(args: &RmArgs, client: &Arc<Client>) -> Result<()> {
    if !args.yes {
        bail!("refusing to delete teacher {} without --yes", args.id);
    }
    client.delete_teacher(args.id).await?;
    eprintln!("Teacher {} deleted.", args.id);
    Ok(())
}
