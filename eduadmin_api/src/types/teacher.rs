//! Teacher account types.

use serde::{Deserialize, Serialize};

/// A teacher record returned by the `/teachers` endpoints.
#[derive(Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,

    /// Staff number; immutable after creation.
    pub teacher_id_number: Option<String>,

    pub full_name: String,

    /// Academic title, e.g. "教授" or "讲师".
    pub title: Option<String>,

    pub email: Option<String>,
}

/// Body for creating or updating a teacher.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct TeacherPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id_number: Option<String>,

    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub email: String,
}
