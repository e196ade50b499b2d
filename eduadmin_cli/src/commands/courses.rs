//! Course catalog management: list, create, update, delete.
//!
//! Grade compositions are passed as repeated `--grade-item NAME:WEIGHT`
//! flags; the weights of a course must sum to 1.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::{CoursePayload, GradeItem};
use eduadmin_lib::{
    validation, Client, CourseSource, EditorFlow, FilterSet, PagedCollection, Refresh,
};

use crate::output::{
    pager_line, print_courses_csv, print_courses_markdown, print_courses_table, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommand,
}

#[derive(Subcommand)]
pub enum CoursesCommand {
    /// List courses
    List(ListArgs),
    /// Create a course
    Add(AddArgs),
    /// Update a course
    Edit(EditArgs),
    /// Delete a course
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by course name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by department
    #[arg(long)]
    pub department: Option<String>,

    /// Filter by exact credit value
    #[arg(long)]
    pub credits: Option<i64>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Course name
    #[arg(long)]
    pub name: String,

    /// Credit value; half credits are allowed
    #[arg(long)]
    pub credits: f64,

    /// Catalog code, e.g. CS101; generated by the backend when omitted
    #[arg(long)]
    pub code: Option<String>,

    /// Owning department
    #[arg(long)]
    pub department: Option<String>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Prerequisite courses, free-form
    #[arg(long)]
    pub prerequisites: Option<String>,

    /// Grade component as NAME:WEIGHT, e.g. 平时成绩:0.3; repeatable
    #[arg(long = "grade-item", required = true)]
    pub grade_items: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Course id
    pub id: i64,

    /// New course name
    #[arg(long)]
    pub name: Option<String>,

    /// New credit value
    #[arg(long)]
    pub credits: Option<f64>,

    /// New department
    #[arg(long)]
    pub department: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New prerequisites
    #[arg(long)]
    pub prerequisites: Option<String>,

    /// Replacement grade composition; the existing one is kept when omitted
    #[arg(long = "grade-item")]
    pub grade_items: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Course id
    pub id: i64,

    /// Skip the confirmation check
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: &CoursesArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        CoursesCommand::List(list_args) => list(list_args, client, format).await,
        CoursesCommand::Add(add_args) => add(add_args, client).await,
        CoursesCommand::Edit(edit_args) => edit(edit_args, client).await,
        CoursesCommand::Rm(rm_args) => rm(rm_args, client).await,
    }
}

fn parse_grade_item(raw: &str) -> Result<GradeItem> {
    let (name, weight) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("grade item must look like NAME:WEIGHT, got '{}'", raw))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .with_context(|| format!("invalid weight in grade item '{}'", raw))?;
    Ok(GradeItem {
        item_name: name.trim().to_string(),
        weight,
    })
}

fn parse_grade_items(raw: &[String]) -> Result<Vec<GradeItem>> {
    let items = raw
        .iter()
        .map(|item| parse_grade_item(item))
        .collect::<Result<Vec<_>>>()?;
    validation::validate_grade_items(&items)?;
    Ok(items)
}

async fn list(args: &ListArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut filters = FilterSet::new();
    if let Some(ref name) = args.name {
        filters.set("course_name", validation::validate_search(name)?);
    }
    if let Some(ref department) = args.department {
        filters.set("department", validation::validate_search(department)?);
    }
    if let Some(credits) = args.credits {
        filters.set("credits", credits);
    }

    let collection = PagedCollection::new(CourseSource::new(Arc::clone(client)), page_size);
    collection.prepare(filters, page);
    if let Refresh::Updated(result) = collection.reload().await? {
        match result.total_items {
            Some(total) => eprintln!(
                "Page {}/{} ({} total courses)",
                collection.current_page(),
                result.total_pages,
                total
            ),
            None => eprintln!("Page {}/{}", collection.current_page(), result.total_pages),
        }
        match format {
            OutputFormat::Table => print_courses_table(&result.items),
            OutputFormat::Json => print_json(&result.items),
            OutputFormat::Csv => print_courses_csv(&result.items)?,
            OutputFormat::Markdown => print_courses_markdown(&result.items),
        }
        eprintln!(
            "{}",
            pager_line(&collection.pagination_view(), collection.current_page())
        );
    }
    Ok(())
}

async fn add(args: &AddArgs, client: &Arc<Client>) -> Result<()> {
    let payload = CoursePayload {
        course_code: args.code.clone(),
        course_name: validation::sanitize_text(&args.name, validation::MAX_SEARCH_LENGTH)?,
        credits: validation::validate_credits(args.credits)?,
        department: args.department.clone(),
        description: args.description.clone(),
        prerequisites: args.prerequisites.clone(),
        grade_items: parse_grade_items(&args.grade_items)?,
    };

    let mut flow = EditorFlow::new();
    flow.begin_loading()?;
    flow.open(payload.clone())?;
    flow.submit()?;
    match client.create_course(&payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Course '{}' created.", payload.course_name);
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
    let existing = match client.get_course(args.id).await {
        Ok(found) => found,
        Err(err) => {
            flow.fail(err.to_string())?;
            return Err(err.into());
        }
    };

    // The catalog code is fixed at creation time and carried through
    // unchanged.
    let payload = CoursePayload {
        course_code: existing.course_code,
        course_name: match &args.name {
            Some(name) => validation::sanitize_text(name, validation::MAX_SEARCH_LENGTH)?,
            None => existing.course_name,
        },
        credits: match args.credits {
            Some(credits) => validation::validate_credits(credits)?,
            None => existing.credits,
        },
        department: args.department.clone().or(existing.department),
        description: args.description.clone().or(existing.description),
        prerequisites: args.prerequisites.clone().or(existing.prerequisites),
        grade_items: if args.grade_items.is_empty() {
            existing.grade_items.clone()
        } else {
            parse_grade_items(&args.grade_items)?
        },
    };

    flow.open(payload.clone())?;
    flow.submit()?;
    match client.update_course(args.id, &payload).await {
        Ok(()) => {
            flow.finish()?;
            eprintln!("Course {} updated.", args.id);
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
        bail!("refusing to delete course {} without --yes", args.id);
    }
    client.delete_course(args.id).await?;
    eprintln!("Course {} deleted.", args.id);
    Ok(())
}
