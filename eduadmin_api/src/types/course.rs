//! Course types.
//!
//! The course list is the one endpoint whose envelope names its item array
//! `courses` instead of `items`, so it gets a dedicated wrapper here instead
//! of reusing [`ListEnvelope`](crate::types::ListEnvelope).

use serde::{Deserialize, Serialize};

use super::meta::ListPagination;

/// A course record returned by the `/courses` endpoints.
#[derive(Serialize, Deserialize)]
pub struct Course {
    pub id: i64,

    /// Catalog code, e.g. "CS101"; immutable after creation.
    pub course_code: Option<String>,

    pub course_name: String,

    /// Credit value; half credits are allowed.
    pub credits: f64,

    pub department: Option<String>,

    pub description: Option<String>,

    pub prerequisites: Option<String>,

    /// Teachers currently assigned to this course.
    #[serde(default)]
    pub teachers: Vec<TeacherRef>,

    /// Weighted grade composition, e.g. homework 0.3 / final 0.7.
    #[serde(default)]
    pub grade_items: Vec<GradeItem>,
}

/// Envelope of the `/courses` list endpoint.
#[derive(Serialize, Deserialize)]
pub struct CourseList {
    pub courses: Vec<Course>,
    pub pagination: ListPagination,
}

/// Abbreviated teacher reference embedded in course records.
#[derive(Serialize, Deserialize)]
pub struct TeacherRef {
    pub full_name: String,
}

/// One component of a course's grade composition.
#[derive(Serialize, Deserialize, Clone)]
pub struct GradeItem {
    pub item_name: String,

    /// Fraction of the final grade; all items of a course must sum to 1.
    pub weight: f64,
}

/// Body for creating or updating a course.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct CoursePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    pub course_name: String,

    pub credits: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<String>,

    pub grade_items: Vec<GradeItem>,
}
