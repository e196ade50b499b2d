//! Class (administrative student group) types.

use serde::{Deserialize, Serialize};

/// A class record returned by the `/classes` endpoints.
#[derive(Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: i64,

    /// Display name, e.g. "软件2301".
    pub class_name: String,

    /// Owning department, when assigned.
    pub department: Option<String>,

    /// Year the cohort enrolled.
    pub enrollment_year: Option<i64>,

    /// Number of students currently assigned to this class.
    #[serde(default)]
    pub student_count: Option<i64>,
}

/// Body for creating or updating a class.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct ClassPayload {
    pub class_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_year: Option<i64>,
}
