//! Scheduling: teaching assignments and the weekly timetable.
//!
//! The timetable is a fixed grid of five daily slots; entries whose start
//! time matches none of them are listed separately rather than dropped.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use eduadmin_lib::types::{NewAssignment, NewScheduleEntry};
use eduadmin_lib::{timetable, validation, Client, OptionCatalog, ScheduleQuery, TimetableGrid};

use crate::commands::ensure_known;
use crate::output::{
    print_assignments_csv, print_assignments_markdown, print_assignments_table, print_json,
    print_schedules_csv, render_timetable, render_timetable_markdown, OutputFormat,
};

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List teaching assignments for a semester
    Assignments(AssignmentsArgs),
    /// Assign a teacher to a course for a semester
    Assign(AssignArgs),
    /// Show the weekly timetable grid
    Timetable(TimetableArgs),
    /// Place a teaching assignment into a timetable slot
    Place(PlaceArgs),
}

#[derive(Args)]
pub struct AssignmentsArgs {
    /// Semester, e.g. 2025-2026-1
    #[arg(long)]
    pub semester: String,
}

#[derive(Args)]
pub struct AssignArgs {
    /// Teacher id
    #[arg(long)]
    pub teacher_id: i64,

    /// Course id
    #[arg(long)]
    pub course_id: i64,

    /// Semester, e.g. 2025-2026-1
    #[arg(long)]
    pub semester: String,
}

#[derive(Args)]
pub struct TimetableArgs {
    /// Semester, e.g. 2025-2026-1
    #[arg(long)]
    pub semester: String,

    /// Restrict to one teacher's schedule
    #[arg(long, conflicts_with_all = ["class_id", "classroom_id"])]
    pub teacher_id: Option<i64>,

    /// Restrict to one class's schedule
    #[arg(long, conflicts_with = "classroom_id")]
    pub class_id: Option<i64>,

    /// Restrict to one classroom's schedule
    #[arg(long)]
    pub classroom_id: Option<i64>,
}

#[derive(Args)]
pub struct PlaceArgs {
    /// Id of the teaching assignment to schedule
    #[arg(long)]
    pub teaching_id: i64,

    /// Classroom id
    #[arg(long)]
    pub classroom_id: i64,

    /// Day of week: Mon through Sun
    #[arg(long)]
    pub day: String,

    /// Daily slot number, 1 through 5
    #[arg(long)]
    pub slot: i64,
}

pub async fn run(args: &ScheduleArgs, client: &Arc<Client>, format: &OutputFormat) -> Result<()> {
    match &args.command {
        ScheduleCommand::Assignments(list_args) => assignments(list_args, client, format).await,
        ScheduleCommand::Assign(assign_args) => assign(assign_args, client).await,
        ScheduleCommand::Timetable(grid_args) => show_timetable(grid_args, client, format).await,
        ScheduleCommand::Place(place_args) => place(place_args, client).await,
    }
}

async fn assignments(
    args: &AssignmentsArgs,
    client: &Arc<Client>,
    format: &OutputFormat,
) -> Result<()> {
    let semester = validation::validate_semester(&args.semester)?;
    let rows = client.get_teaching_assignments(&semester).await?;
    eprintln!("{} assignments in {}", rows.len(), semester);
    match format {
        OutputFormat::Table => print_assignments_table(&rows),
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_assignments_csv(&rows)?,
        OutputFormat::Markdown => print_assignments_markdown(&rows),
    }
    Ok(())
}

async fn assign(args: &AssignArgs, client: &Arc<Client>) -> Result<()> {
    let semester = validation::validate_semester(&args.semester)?;

    let catalog = OptionCatalog::new(Arc::clone(client));
    ensure_known(&catalog.teacher_options().await?, args.teacher_id, "teacher")?;
    ensure_known(&catalog.course_options().await?, args.course_id, "course")?;

    let payload = NewAssignment {
        teacher_id: args.teacher_id,
        course_id: args.course_id,
        semester,
    };
    client.create_assignment(&payload).await?;
    eprintln!(
        "Assigned teacher {} to course {} for {}.",
        payload.teacher_id, payload.course_id, payload.semester
    );
    Ok(())
}

async fn show_timetable(
    args: &TimetableArgs,
    client: &Arc<Client>,
    format: &OutputFormat,
) -> Result<()> {
    let semester = validation::validate_semester(&args.semester)?;

    let mut query = ScheduleQuery::for_semester(&semester);
    if let Some(teacher_id) = args.teacher_id {
        query = query.with_teacher(teacher_id);
    }
    if let Some(class_id) = args.class_id {
        query = query.with_class(class_id);
    }
    if let Some(classroom_id) = args.classroom_id {
        query = query.with_classroom(classroom_id);
    }

    let entries = client.get_course_schedules(&query).await?;
    let grid = TimetableGrid::place(&entries);
    if !grid.unplaced().is_empty() {
        eprintln!(
            "{} entries start outside the five fixed slots and are not shown in the grid",
            grid.unplaced().len()
        );
    }

    match format {
        OutputFormat::Table => println!("{}", render_timetable(&grid)),
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Csv => print_schedules_csv(&entries)?,
        OutputFormat::Markdown => println!("{}", render_timetable_markdown(&grid)),
    }
    Ok(())
}

async fn place(args: &PlaceArgs, client: &Arc<Client>) -> Result<()> {
    let day = validation::validate_day(&args.day)?;
    let (start_time, end_time) = usize::try_from(args.slot - 1)
        .ok()
        .and_then(timetable::slot_times)
        .ok_or_else(|| {
            anyhow!(
                "slot must be between 1 and {}, got {}",
                timetable::SLOT_COUNT,
                args.slot
            )
        })?;

    let catalog = OptionCatalog::new(Arc::clone(client));
    ensure_known(
        &catalog.classroom_options().await?,
        args.classroom_id,
        "classroom",
    )?;

    let payload = NewScheduleEntry {
        teaching_id: args.teaching_id,
        classroom_id: args.classroom_id,
        day_of_week: day,
        start_time,
        end_time,
    };
    client.create_schedule(&payload).await?;
    eprintln!(
        "Scheduled assignment {} on {} {}.",
        args.teaching_id,
        day,
        timetable::SLOT_LABELS[(args.slot - 1) as usize]
    );
    Ok(())
}
