//! Classroom types.

use serde::{Deserialize, Serialize};

/// A classroom record returned by the `/classrooms` endpoints.
#[derive(Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,

    /// Room label, e.g. "A-301".
    pub name: String,

    pub location: Option<String>,

    /// Seat count.
    pub capacity: Option<i64>,

    pub equipment: Option<String>,
}

/// Body for creating or updating a classroom.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct ClassroomPayload {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}
