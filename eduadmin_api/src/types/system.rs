//! System health types served by the system-administration wrapper.

use serde::{Deserialize, Serialize};

/// Snapshot from `GET /system/status`.
#[derive(Serialize, Deserialize, Default)]
pub struct SystemStatus {
    /// e.g. "healthy".
    pub database_status: Option<String>,

    #[serde(default)]
    pub uptime_days: Option<i64>,

    /// e.g. "42%".
    #[serde(default)]
    pub storage_usage: Option<String>,

    /// Timestamp of the most recent completed backup, backend-formatted.
    #[serde(default)]
    pub last_backup: Option<String>,

    #[serde(default)]
    pub statistics: Option<SystemStatistics>,
}

/// Aggregate record counts embedded in the status snapshot.
#[derive(Serialize, Deserialize, Default)]
pub struct SystemStatistics {
    #[serde(default)]
    pub users: i64,

    #[serde(default)]
    pub courses: i64,

    #[serde(default)]
    pub students: i64,

    #[serde(default)]
    pub teachers: i64,

    #[serde(default)]
    pub today_logs: i64,

    #[serde(default)]
    pub published_grades: i64,
}
