//! Dashboard statistics.

use serde::{Deserialize, Serialize};

/// Headline counts from `GET /edu-admin/dashboard-stats`.
#[derive(Serialize, Deserialize, Default)]
pub struct DashboardStats {
    #[serde(default)]
    pub students: i64,

    #[serde(default)]
    pub teachers: i64,

    #[serde(default)]
    pub classes: i64,

    #[serde(default)]
    pub courses: i64,
}
