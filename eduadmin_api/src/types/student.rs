//! Student account types.

use serde::{Deserialize, Serialize};

/// A student record returned by the `/students` endpoints.
#[derive(Serialize, Deserialize)]
pub struct Student {
    pub id: i64,

    /// Login name; immutable after creation.
    pub username: Option<String>,

    pub full_name: String,

    /// Id of the class the student belongs to, when assigned.
    pub class_id: Option<i64>,

    /// Display name of the class, denormalized for list rendering.
    pub class_name: Option<String>,

    pub email: Option<String>,

    /// Account state; locked students cannot sign in.
    pub status: StudentStatus,
}

/// Account state of a student.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentStatus {
    #[serde(rename = "active")]
    Active,

    #[serde(rename = "locked")]
    Locked,
}
impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StudentStatus::Active => "active",
                StudentStatus::Locked => "locked",
            }
        )
    }
}
impl std::str::FromStr for StudentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "locked" => Ok(StudentStatus::Locked),
            _ => Err(()),
        }
    }
}

/// Body for creating or updating a student.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub full_name: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
}
