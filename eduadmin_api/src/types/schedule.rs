//! Teaching-assignment and course-schedule types.
//!
//! Both endpoints return flat arrays (no pagination envelope): the scheduling
//! screens always work on one semester at a time.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A teacher-course pairing for one semester, from `/teaching-assignments`.
#[derive(Serialize, Deserialize)]
pub struct TeachingAssignment {
    pub id: i64,

    #[serde(default)]
    pub course: Option<CourseRef>,

    #[serde(default)]
    pub teacher: Option<AssignedTeacherRef>,

    /// Semester identifier, e.g. "2025-2026-1".
    pub semester: String,
}

/// A placed timetable entry, from `/course-schedules`.
#[derive(Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default)]
    pub id: Option<i64>,

    pub day_of_week: DayOfWeek,

    /// Slot start, e.g. 08:00:00. Compared against the fixed daily slots.
    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    #[serde(default)]
    pub course: Option<CourseRef>,

    #[serde(default)]
    pub teacher: Option<AssignedTeacherRef>,

    #[serde(default)]
    pub classroom: Option<ClassroomRef>,
}

/// Abbreviated course reference embedded in schedule records.
#[derive(Serialize, Deserialize)]
pub struct CourseRef {
    pub course_name: String,
}

/// Abbreviated teacher reference embedded in schedule records.
#[derive(Serialize, Deserialize)]
pub struct AssignedTeacherRef {
    pub full_name: String,
}

/// Abbreviated classroom reference embedded in schedule records.
#[derive(Serialize, Deserialize)]
pub struct ClassroomRef {
    pub name: String,
}

/// Day of week as the API spells it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}
impl DayOfWeek {
    /// All days in display order, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// Zero-based column index, Monday first.
    pub fn index(&self) -> usize {
        match self {
            DayOfWeek::Mon => 0,
            DayOfWeek::Tue => 1,
            DayOfWeek::Wed => 2,
            DayOfWeek::Thu => 3,
            DayOfWeek::Fri => 4,
            DayOfWeek::Sat => 5,
            DayOfWeek::Sun => 6,
        }
    }
}
impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DayOfWeek::Mon => "Mon",
                DayOfWeek::Tue => "Tue",
                DayOfWeek::Wed => "Wed",
                DayOfWeek::Thu => "Thu",
                DayOfWeek::Fri => "Fri",
                DayOfWeek::Sat => "Sat",
                DayOfWeek::Sun => "Sun",
            }
        )
    }
}
impl std::str::FromStr for DayOfWeek {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(DayOfWeek::Mon),
            "Tue" => Ok(DayOfWeek::Tue),
            "Wed" => Ok(DayOfWeek::Wed),
            "Thu" => Ok(DayOfWeek::Thu),
            "Fri" => Ok(DayOfWeek::Fri),
            "Sat" => Ok(DayOfWeek::Sat),
            "Sun" => Ok(DayOfWeek::Sun),
            _ => Err(()),
        }
    }
}

/// Body for creating a teaching assignment.
#[derive(Serialize, Deserialize)]
pub struct NewAssignment {
    pub teacher_id: i64,
    pub course_id: i64,
    pub semester: String,
}

/// Body for placing a schedule entry into a timetable slot.
#[derive(Serialize, Deserialize)]
pub struct NewScheduleEntry {
    /// Id of the teaching assignment being scheduled.
    pub teaching_id: i64,
    pub classroom_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
