//! Operation-log types served by the system-administration wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audit record from `/logs`.
#[derive(Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,

    pub timestamp: DateTime<Utc>,

    /// Account that performed the operation; absent for system-initiated
    /// actions.
    #[serde(default)]
    pub operator: Option<Operator>,

    /// Machine-readable action tag, e.g. "user.login" or "grade.publish".
    pub action: String,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Abbreviated account reference embedded in log records.
#[derive(Serialize, Deserialize)]
pub struct Operator {
    pub username: String,
}

/// Answer of `POST /logs/clean`.
#[derive(Serialize, Deserialize)]
pub struct LogCleanResult {
    pub success: bool,

    #[serde(default)]
    pub deleted_count: i64,

    #[serde(default)]
    pub message: Option<String>,
}
