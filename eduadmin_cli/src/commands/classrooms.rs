//! Classroom management: list, create, update, delete.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::ClassroomPayload;
use eduadmin_lib::{
    validation, ClassroomSource, Client, EditorFlow, FilterSet, PagedCollection, Refresh,
};

use crate::output::{
    pager_line, print_classrooms_csv, print_classrooms_markdown, print_classrooms_table,
    print_json, OutputFormat,
};

#[derive(Args)]
pub struct ClassroomsArgs {
    #[command(subcommand)]
    pub command: ClassroomsCommand,
}

#[derive(Subcommand)]
pub enum ClassroomsCommand {
    /// List classrooms
    List(ListArgs),
    /// Create a classroom
    Add(AddArgs),
    /// Update a classroom
    Edit(EditArgs),
    /// Delete a classroom
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Search by room label or location
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by minimum seat count
    #[arg(long)]
    pub capacity: Option<i64>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Room label, e.g. A-301
    #[arg(long)]
    pub name: String,

    /// Building or campus location
    #[arg(long)]
    pub location: Option<String>,

    /// Seat count
    #[arg(long)]
    pub capacity: Option<i64>,

    /// Installed equipment, free-form
    #[arg(long)]
    pub equipment: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Classroom id
    pub id: i64,

    /// New room label
    #[arg(long)]
    pub name: Option<String>,

    /// New location
    #[arg(long)]
    pub location: Option<String>,

    /// New seat count
    #[arg(long)]
    pub capacity: Option<i64>,

    /// New equipment description
    #[arg(long)]
    pub equipment: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Classroom id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(
    args: &ClassroomsArgs,
    client: &Arc<Client>,
    format: &OutputFormat,
) -> Result<()> {
    match &args.command {
        ClassroomsCommand::List(list_args) => list(list_args, client, format).await,
        ClassroomsCommand::Add(add_args) => add(add_args, client).await,
        ClassroomsCommand::Edit(edit_args) => edit(edit_args, client).await,
        ClassroomsCommand::Rm(rm_args) => rm(rm_args, client).await,
    }
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref search) = args.search {
        filters.set("search", validation::validate_search(search)?);
    }
    if let Some(capacity) = args.capacity {
        filters.set("capacity", validation::validate_capacity(capacity)?);
    }

    let collection = PagedCollection::new(ClassroomSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} total classrooms)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_classrooms_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_classrooms_csv(&result.items)?,
            OutputFormat::Markdown => print_classrooms_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn add(args: &AddArgs, client: &Arc<Client>) -> Result<()> {
    let payload = ClassroomPayload {
        name: validation::sanitize_text(&args.name, validation::MAX_SEARCH_LENGTH)?,
        location: args.location.clone(),
        capacity: match args.capacity {
            Some(capacity) => Some(validation::validate_capacity(capacity)?),
            None => None,
        },
        equipment: args.equipment.clone(),
    };

    let mut flow = EditorFlow::new();
    flow.begin_loading()?;
    flow.open(payload.clone())?;
    flow.submit()?;
    match client.create_classroom(&payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Classroom '{}' created.", payload.name);
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
    let existing = match client.get_classroom(args.id).await {
        Ok(found) => found,
        Err(err) => {
            flow.fail(err.to_string())?;
            return Err(err.into());
        }
    };

    let payload = ClassroomPayload {
        name: match &args.name {
            Some(name) => validation::sanitize_text(name, validation::MAX_SEARCH_LENGTH)?,
            None => existing.name,
        },
        location: args.location.clone().or(existing.location),
        capacity: match args.capacity {
            Some(capacity) => Some(validation::validate_capacity(capacity)?),
            None => existing.capacity,
        },
        equipment: args.equipment.clone().or(existing.equipment),
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.update_classroom(args.id, &payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Classroom {} updated.", args.id);
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
        bail!("refusing to delete classroom {} without --yes", args.id);
    }
    client.delete_classroom(args.id).await?;
    eprintln!("Classroom {} deleted.", args.id);
    Ok(())
}
