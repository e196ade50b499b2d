use serde::{Deserialize, Serialize};

/// Pagination block attached to plain list envelopes.
///
/// `total_pages` is optional because some deployments only report
/// `totalItems`; callers fall back to `ceil(totalItems / pageSize)`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPagination {
    pub total_items: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
}

/// Plain list envelope: `{items, pagination}`.
///
/// Used by `/classes`, `/students`, `/teachers` and `/classrooms`.
/// (`/courses` names its item array differently; see
/// [`CourseList`](crate::types::CourseList).)
#[derive(Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub items: Vec<T>,
    pub pagination: ListPagination,
}

/// Pagination block of the wrapped envelope. The echoed `current_page` is
/// informational; the page that was requested is authoritative.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedPagination {
    pub current_page: i64,
    pub total_pages: i64,
}

/// Wrapped envelope: `{success, data, pagination, message}`.
///
/// Used by the system-administration endpoints (`/logs`, `/system/*`).
/// A `success: false` answer carries the failure in `message` and no data.
#[derive(Serialize, Deserialize)]
pub struct WrappedEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<WrappedPagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
