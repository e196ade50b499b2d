//! Student account management: list, create, update, delete, and the
//! active/locked switch.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::StudentPayload;
use eduadmin_lib::{
    validation, Client, EditorFlow, FilterSet, OptionCatalog, PagedCollection, Refresh,
    StudentSource,
};

use crate::commands::ensure_known;
use crate::output::{
    pager_line, print_json, print_students_csv, print_students_markdown, print_students_table,
    OutputFormat,
};

#[derive(Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Subcommand)]
pub enum StudentsCommand {
    /// List students
    List(ListArgs),
    /// Create a student account
    Add(AddArgs),
    /// Update a student account
    Edit(EditArgs),
    /// Delete a student account
    Rm(RmArgs),
    /// Switch a student between active and locked
    SetStatus(SetStatusArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Search by name or username
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by class id
    #[arg(long)]
    pub class_id: Option<i64>,

    /// Filter by status: active or locked
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
pub struct AddArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Login name; generated by the backend when omitted
    #[arg(long)]
    pub username: Option<String>,

    /// Class to place the student in
    #[arg(long)]
    pub class_id: Option<i64>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Student id
    pub id: i64,

    /// New full name
    #[arg(long)]
    pub name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// Move the student to another class
    #[arg(long)]
    pub class_id: Option<i64>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Student id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SetStatusArgs {
    /// Student id
    pub id: i64,

    /// New status: active or locked
    #[arg(long)]
    pub status: String,
}

pub async fn run(args: &StudentsArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        StudentsCommand::List(list_args) => list(list_args, client, format).await,
        StudentsCommand::Add(add_args) => add(add_args, client).await,
        StudentsCommand::Edit(edit_args) => edit(edit_args, client).await,
        StudentsCommand::Rm(rm_args) => rm(rm_args, client).await,
        StudentsCommand::SetStatus(status_args) => set_status(status_args, client).await,
    }
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref search) = args.search {
        filters.set("search", validation::validate_search(search)?);
    }
    if let Some(class_id) = args.class_id {
        filters.set("class_id", class_id);
    }
    if let Some(ref status) = args.status {
        // Parsed up front so a typo fails before the request goes out.
        filters.set("status", validation::validate_status(status)?.to_string());
    }

    let collection = PagedCollection::new(StudentSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} total students)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_students_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_students_csv(&result.items)?,
            OutputFormat::Markdown => print_students_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn add(args: &AddArgs, client: &Arc<Client>) -> Result<()> {
    let mut flow = EditorFlow::new();
    flow.begin_loading()?;

    if let Some(class_id) = args.class_id {
        let catalog = OptionCatalog::new(Arc::clone(client));
        let options = match catalog.class_options().await {
            Ok(options) => options,
            Err(err) => {
                flow.fail(err.to_string())?;
                return Err(err.into());
            }
        };
        ensure_known(&options, class_id, "class")?;
    }

    let payload = StudentPayload {
        username: args.username.clone(),
        full_name: validation::sanitize_text(&args.name, validation::MAX_SEARCH_LENGTH)?,
        email: validation::validate_email(&args.email)?,
        class_id: args.class_id,
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.create_student(&payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Student '{}' created.", payload.full_name);
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

    let existing = match client.get_student(args.id).await {
        Ok(found) => found,
        Err(err) => {
            flow.fail(err.to_string())?;
            return Err(err.into());
        }
    };
    if let Some(class_id) = args.class_id {
        let catalog = OptionCatalog::new(Arc::clone(client));
        let options = match catalog.class_options().await {
            Ok(options) => options,
            Err(err) => {
                flow.fail(err.to_string())?;
                return Err(err.into());
            }
        };
        ensure_known(&options, class_id, "class")?;
    }

    // The username is fixed at creation time and carried through unchanged.
    let payload = StudentPayload {
        username: existing.username,
        full_name: match &args.name {
            Some(name) => validation::sanitize_text(name, validation::MAX_SEARCH_LENGTH)?,
            None => existing.full_name,
        },
        email: match &args.email {
            Some(email) => validation::validate_email(email)?,
            None => existing.email.unwrap_or_default(),
        },
        class_id: args.class_id.or(existing.class_id),
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.update_student(args.id, &payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Student {} updated.", args.id);
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
        bail!("refusing to delete student {} without --yes", args.id);
    }
    client.delete_student(args.id).await?;
    eprintln!("Student {} deleted.", args.id);
    Ok(())
}

async fn set_status(args: &SetStatusArgs, client: &Arc<Client>) -> Result<()> {
    let status = validation::validate_status(&args.status)?;
    client.set_student_status(args.id, status).await?;
    eprintln!("Student {} is now {}.", args.id, status);
    Ok(())
}
