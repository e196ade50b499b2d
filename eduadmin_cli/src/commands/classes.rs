//! Class management: list, create, update, delete.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::ClassPayload;
use eduadmin_lib::{
    validation, ClassSource, Client, EditorFlow, FilterSet, PagedCollection, Refresh,
};

use crate::output::{
    pager_line, print_classes_csv, print_classes_markdown, print_classes_table, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct ClassesArgs {
    #[command(subcommand)]
    pub command: ClassesCommand,
}

#[derive(Subcommand)]
pub enum ClassesCommand {
    /// List classes
    List(ListArgs),
    /// Create a class
    Add(AddArgs),
    /// Update a class
    Edit(EditArgs),
    /// Delete a class
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by class name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by department
    #[arg(long)]
    pub department: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Class display name, e.g. 软件2301
    #[arg(long)]
    pub name: String,

    /// Owning department
    #[arg(long)]
    pub department: Option<String>,

    /// Enrollment year, e.g. 2023
    #[arg(long)]
    pub year: Option<i64>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Class id
    pub id: i64,

    /// New class name
    #[arg(long)]
    pub name: Option<String>,

    /// New department
    #[arg(long)]
    pub department: Option<String>,

    /// New enrollment year
    #[arg(long)]
    pub year: Option<i64>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Class id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: &ClassesArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        ClassesCommand::List(list_args) => list(list_args, client, format).await,
        ClassesCommand::Add(add_args) => add(add_args, client).await,
        ClassesCommand::Edit(edit_args) => edit(edit_args, client).await,
        ClassesCommand::Rm(rm_args) => rm(rm_args, client).await,
    }
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref name) = args.name {
        filters.set("class_name", validation::validate_search(name)?);
    }
    if let Some(ref department) = args.department {
        filters.set("department", validation::validate_search(department)?);
    }

    let collection = PagedCollection::new(ClassSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} total classes)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_classes_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_classes_csv(&result.items)?,
            OutputFormat::Markdown => print_classes_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn add(args: &AddArgs, client: &Arc<Client>) -> Result<()> {
    let payload = ClassPayload {
        class_name: validation::sanitize_text(&args.name, validation::MAX_SEARCH_LENGTH)?,
        department: args.department.clone(),
        enrollment_year: match args.year {
            Some(year) => Some(validation::validate_enrollment_year(year)?),
            None => None,
        },
    };

    let mut flow = EditorFlow::new();
    flow.begin_loading()?;
    flow.open(payload.clone())?;
    flow.submit()?;
    match client.create_class(&payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Class '{}' created.", payload.class_name);
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
    let existing = match client.get_class(args.id).await {
        Ok(found) => found,
        Err(err) => {
            flow.fail(err.to_string())?;
            return Err(err.into());
        }
    };

    let payload = ClassPayload {
        class_name: match &args.name {
            Some(name) => validation::sanitize_text(name, validation::MAX_SEARCH_LENGTH)?,
            None => existing.class_name,
        },
        department: args.department.clone().or(existing.department),
        enrollment_year: match args.year {
            Some(year) => Some(validation::validate_enrollment_year(year)?),
            None => existing.enrollment_year,
        },
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.update_class(args.id, &payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Class {} updated.", args.id);
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
        bail!("refusing to delete class {} without --yes", args.id);
    }
    client.delete_class(args.id).await?;
    eprintln!("Class {} deleted.", args.id);
    Ok(())
}
