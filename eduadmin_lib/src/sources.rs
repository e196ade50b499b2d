//! Per-screen [`PageSource`] adapters.
//!
//! The backend answers with three envelope shapes: plain lists with a
//! pagination block, the wrapped `{success, data}` form of the system
//! console, and flat arrays that are filtered and sliced client-side.
//! Each adapter normalizes its endpoint to [`PageResult`] so the
//! controller stays shape-agnostic.

use std::sync::Arc;

use chrono::NaiveDate;
use eduadmin_api::types::{
    ClassGroup, Classroom, Course, GradePublishRow, GradeReviewRow, ListEnvelope, LogEntry,
    PublishStatus, Student, StudentStatus, Teacher, WrappedEnvelope,
};
use eduadmin_api::{
    ClassQuery, ClassroomQuery, Client, CourseQuery, LogQuery, Query, StudentQuery, TeacherQuery,
};

use crate::collection::{FilterSet, PageRequest, PageResult, PageSource};
use crate::error::AdminError;

fn ceil_pages(total_items: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total_items + page_size - 1) / page_size
}

/// Normalizes a plain list envelope. Servers usually report `totalPages`
/// themselves; it is derived from the item count only when omitted.
fn from_list_envelope<T>(envelope: ListEnvelope<T>, page_size: i64) -> PageResult<T> {
    let total_items = envelope.pagination.total_items;
    let total_pages = envelope
        .pagination
        .total_pages
        .unwrap_or_else(|| ceil_pages(total_items, page_size));
    PageResult {
        items: envelope.items,
        total_items: Some(total_items),
        total_pages,
    }
}

/// Normalizes a wrapped envelope. `success: false` is a data-source
/// error carrying the server's message; the echoed page number is
/// ignored because the request's page is authoritative.
fn from_wrapped<T>(envelope: WrappedEnvelope<Vec<T>>) -> Result<PageResult<T>, AdminError> {
    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| "request rejected by the server".to_string());
        return Err(AdminError::Api(eduadmin_api::Error::Rejected { message }));
    }
    let items = envelope.data.unwrap_or_default();
    let total_pages = envelope.pagination.map(|p| p.total_pages).unwrap_or(1);
    Ok(PageResult {
        items,
        total_items: None,
        total_pages,
    })
}

/// Slices one page out of a fully fetched list. The page count never
/// drops below 1, so an empty filtered list still renders page 1 of 1.
fn slice_page<T>(rows: Vec<T>, page: i64, page_size: i64) -> PageResult<T> {
    let total = rows.len() as i64;
    let total_pages = ceil_pages(total, page_size).max(1);
    let start = ((page - 1).max(0) * page_size) as usize;
    let items: Vec<T> = rows
        .into_iter()
        .skip(start)
        .take(page_size.max(0) as usize)
        .collect();
    PageResult {
        items,
        total_items: Some(total),
        total_pages,
    }
}

fn matches_search(needle: &str, name: &str, code: Option<&str>) -> bool {
    let needle = needle.to_lowercase();
    name.to_lowercase().contains(&needle)
        || code
            .map(|c| c.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

/// Applies the review screen's local filters: course search and the
/// has/no-warning toggle.
fn filter_review_rows(
    mut rows: Vec<GradeReviewRow>,
    filters: &FilterSet,
) -> Result<Vec<GradeReviewRow>, AdminError> {
    if let Some(search) = filters.text("search") {
        rows.retain(|row| matches_search(search, &row.course_name, row.course_code.as_deref()));
    }
    match filters.text("warning") {
        None => {}
        Some("has_warning") => rows.retain(|row| !row.warnings.is_empty()),
        Some("no_warning") => rows.retain(|row| row.warnings.is_empty()),
        Some(other) => {
            return Err(AdminError::InvalidInput(format!(
                "warning filter must be has_warning or no_warning, got '{}'",
                other
            )))
        }
    }
    Ok(rows)
}

/// Applies the publish screen's local filters: course search, exact
/// semester, and publication status.
fn filter_publish_rows(
    mut rows: Vec<GradePublishRow>,
    filters: &FilterSet,
) -> Result<Vec<GradePublishRow>, AdminError> {
    if let Some(search) = filters.text("search") {
        rows.retain(|row| matches_search(search, &row.course_name, row.course_code.as_deref()));
    }
    if let Some(semester) = filters.text("semester") {
        rows.retain(|row| row.semester.as_deref() == Some(semester));
    }
    if let Some(status) = filters.text("status") {
        let status: PublishStatus = status.parse().map_err(|_| {
            AdminError::InvalidInput(format!(
                "status filter must be approved or published, got '{}'",
                status
            ))
        })?;
        rows.retain(|row| row.status == status);
    }
    Ok(rows)
}

/// `/classes`, filtered by `class_name` and `department`.
pub struct ClassSource {
    client: Arc<Client>,
}

impl ClassSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for ClassSource {
    type Item = ClassGroup;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<ClassGroup>, AdminError> {
        let mut query = ClassQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(name) = request.filters.text("class_name") {
            query = query.with_class_name(name);
        }
        if let Some(department) = request.filters.text("department") {
            query = query.with_department(department);
        }
        let resp = self.client.get_classes(&query).await?;
        Ok(from_list_envelope(resp, request.page_size))
    }
}

/// `/students`, filtered by `search`, `class_id`, and `status`.
pub struct StudentSource {
    client: Arc<Client>,
}

impl StudentSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for StudentSource {
    type Item = Student;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<Student>, AdminError> {
        let mut query = StudentQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(search) = request.filters.text("search") {
            query = query.with_search(search);
        }
        if let Some(class_id) = request.filters.number("class_id") {
            query = query.with_class_id(class_id);
        }
        if let Some(status) = request.filters.text("status") {
            let status: StudentStatus = status.parse().map_err(|_| {
                AdminError::InvalidInput(format!(
                    "student status must be active or locked, got '{}'",
                    status
                ))
            })?;
            query = query.with_status(status);
        }
        let resp = self.client.get_students(&query).await?;
        Ok(from_list_envelope(resp, request.page_size))
    }
}

/// `/teachers`, filtered by `search` and `title`.
pub struct TeacherSource {
    client: Arc<Client>,
}

impl TeacherSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for TeacherSource {
    type Item = Teacher;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<Teacher>, AdminError> {
        let mut query = TeacherQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(search) = request.filters.text("search") {
            query = query.with_search(search);
        }
        if let Some(title) = request.filters.text("title") {
            query = query.with_title(title);
        }
        let resp = self.client.get_teachers(&query).await?;
        Ok(from_list_envelope(resp, request.page_size))
    }
}

/// `/courses`, filtered by `course_name`, `department`, and `credits`.
/// This endpoint names its item array `courses`; the rename is absorbed
/// here.
pub struct CourseSource {
    client: Arc<Client>,
}

impl CourseSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for CourseSource {
    type Item = Course;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<Course>, AdminError> {
        let mut query = CourseQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(name) = request.filters.text("course_name") {
            query = query.with_course_name(name);
        }
        if let Some(department) = request.filters.text("department") {
            query = query.with_department(department);
        }
        if let Some(credits) = request.filters.number("credits") {
            query = query.with_credits(credits);
        }
        let resp = self.client.get_courses(&query).await?;
        Ok(from_list_envelope(
            ListEnvelope {
                items: resp.courses,
                pagination: resp.pagination,
            },
            request.page_size,
        ))
    }
}

/// `/classrooms`, filtered by `search` and `capacity`.
pub struct ClassroomSource {
    client: Arc<Client>,
}

impl ClassroomSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for ClassroomSource {
    type Item = Classroom;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<Classroom>, AdminError> {
        let mut query = ClassroomQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(search) = request.filters.text("search") {
            query = query.with_search(search);
        }
        if let Some(capacity) = request.filters.number("capacity") {
            query = query.with_capacity(capacity);
        }
        let resp = self.client.get_classrooms(&query).await?;
        Ok(from_list_envelope(resp, request.page_size))
    }
}

/// `/logs`, the wrapped-envelope endpoint, filtered by `action`,
/// `user_id`, and `start_date`.
pub struct LogSource {
    client: Arc<Client>,
}

impl LogSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for LogSource {
    type Item = LogEntry;

    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<LogEntry>, AdminError> {
        let mut query = LogQuery::default()
            .with_page(request.page)
            .with_page_size(request.page_size);
        if let Some(action) = request.filters.text("action") {
            query = query.with_action(action);
        }
        if let Some(user_id) = request.filters.number("user_id") {
            query = query.with_user_id(user_id);
        }
        if let Some(date) = request.filters.text("start_date") {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                AdminError::InvalidInput(format!("start_date must be YYYY-MM-DD, got '{}'", date))
            })?;
            query = query.with_start_date(date);
        }
        let envelope = self.client.get_logs(&query).await?;
        from_wrapped(envelope)
    }
}

/// `/grades/pending-review`: the backend returns the whole list, so
/// search and warning filters plus pagination happen here.
pub struct ReviewSource {
    client: Arc<Client>,
}

impl ReviewSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for ReviewSource {
    type Item = GradeReviewRow;

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<GradeReviewRow>, AdminError> {
        let rows = self.client.get_pending_reviews().await?;
        let rows = filter_review_rows(rows, &request.filters)?;
        Ok(slice_page(rows, request.page, request.page_size))
    }
}

/// `/grades/publish-list`: flat like the review list, with search,
/// semester, and status filters applied here.
pub struct PublishSource {
    client: Arc<Client>,
}

impl PublishSource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl PageSource for PublishSource {
    type Item = GradePublishRow;

    async fn fetch_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResult<GradePublishRow>, AdminError> {
        let rows = self.client.get_publish_list().await?;
        let rows = filter_publish_rows(rows, &request.filters)?;
        Ok(slice_page(rows, request.page, request.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduadmin_api::types::{GradeWarning, ListPagination, ReviewStatus, WarningKind, WrappedPagination};

    fn review_row(id: i64, name: &str, code: &str, warnings: Vec<GradeWarning>) -> GradeReviewRow {
        GradeReviewRow {
            course_id: id,
            course_name: name.to_string(),
            course_code: Some(code.to_string()),
            semester: Some("2025-2026-1".to_string()),
            status: ReviewStatus::PendingReview,
            warnings,
        }
    }

    fn warning(kind: WarningKind) -> GradeWarning {
        GradeWarning {
            kind,
            message: None,
        }
    }

    fn publish_row(id: i64, name: &str, semester: &str, status: PublishStatus) -> GradePublishRow {
        GradePublishRow {
            course_id: id,
            course_name: name.to_string(),
            course_code: None,
            semester: Some(semester.to_string()),
            status,
            reviewed_at: None,
        }
    }

    // -- Envelope normalization --

    #[test]
    fn list_envelope_keeps_server_page_count() {
        let envelope = ListEnvelope {
            items: vec![1, 2, 3],
            pagination: ListPagination {
                total_items: 23,
                total_pages: Some(3),
            },
        };
        let result = from_list_envelope(envelope, 10);
        assert_eq!(result.total_items, Some(23));
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn list_envelope_derives_missing_page_count() {
        let envelope = ListEnvelope {
            items: vec![1],
            pagination: ListPagination {
                total_items: 23,
                total_pages: None,
            },
        };
        assert_eq!(from_list_envelope(envelope, 10).total_pages, 3);

        let empty = ListEnvelope {
            items: Vec::<i64>::new(),
            pagination: ListPagination {
                total_items: 0,
                total_pages: None,
            },
        };
        assert_eq!(from_list_envelope(empty, 10).total_pages, 0);
    }

    #[test]
    fn wrapped_envelope_success_has_no_item_total() {
        let envelope = WrappedEnvelope {
            success: true,
            data: Some(vec!["x"]),
            pagination: Some(WrappedPagination {
                current_page: 7,
                total_pages: 4,
            }),
            message: None,
        };
        let result = from_wrapped(envelope).unwrap();
        assert_eq!(result.items, vec!["x"]);
        assert_eq!(result.total_items, None);
        assert_eq!(result.total_pages, 4);
    }

    #[test]
    fn wrapped_envelope_rejection_carries_the_message() {
        let envelope: WrappedEnvelope<Vec<&str>> = WrappedEnvelope {
            success: false,
            data: None,
            pagination: None,
            message: Some("权限不足".to_string()),
        };
        match from_wrapped(envelope) {
            Err(AdminError::Api(eduadmin_api::Error::Rejected { message })) => {
                assert_eq!(message, "权限不足")
            }
            other => panic!("unexpected outcome: {:?}", other.map(|r| r.items)),
        }
    }

    #[test]
    fn wrapped_envelope_without_pagination_is_one_page() {
        let envelope = WrappedEnvelope {
            success: true,
            data: Some(vec![1, 2]),
            pagination: None,
            message: None,
        };
        assert_eq!(from_wrapped(envelope).unwrap().total_pages, 1);
    }

    // -- Client-side slicing --

    #[test]
    fn slice_page_returns_the_requested_window() {
        let rows: Vec<i64> = (1..=23).collect();
        let result = slice_page(rows, 3, 10);
        assert_eq!(result.items, vec![21, 22, 23]);
        assert_eq!(result.total_items, Some(23));
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn slice_page_past_the_end_is_empty() {
        let rows: Vec<i64> = (1..=5).collect();
        let result = slice_page(rows, 4, 10);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn empty_list_still_has_one_page() {
        let result = slice_page(Vec::<i64>::new(), 1, 10);
        assert!(result.items.is_empty());
        assert_eq!(result.total_items, Some(0));
        assert_eq!(result.total_pages, 1);
    }

    // -- Review filters --

    #[test]
    fn review_search_matches_name_and_code() {
        let rows = vec![
            review_row(1, "操作系统", "CS302", vec![]),
            review_row(2, "大学英语", "EN101", vec![]),
        ];
        let mut filters = FilterSet::new();
        filters.set("search", "cs3");
        let hits = filter_review_rows(rows, &filters).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_id, 1);

        let rows = vec![
            review_row(1, "操作系统", "CS302", vec![]),
            review_row(2, "大学英语", "EN101", vec![]),
        ];
        let mut filters = FilterSet::new();
        filters.set("search", "英语");
        let hits = filter_review_rows(rows, &filters).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_id, 2);
    }

    #[test]
    fn warning_filter_splits_flagged_rows() {
        let rows = vec![
            review_row(1, "操作系统", "CS302", vec![warning(WarningKind::LowPassRate)]),
            review_row(2, "大学英语", "EN101", vec![]),
        ];
        let mut filters = FilterSet::new();
        filters.set("warning", "has_warning");
        let flagged = filter_review_rows(rows, &filters).unwrap();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].course_id, 1);

        let rows = vec![
            review_row(1, "操作系统", "CS302", vec![warning(WarningKind::LowPassRate)]),
            review_row(2, "大学英语", "EN101", vec![]),
        ];
        let mut filters = FilterSet::new();
        filters.set("warning", "no_warning");
        let clean = filter_review_rows(rows, &filters).unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].course_id, 2);
    }

    #[test]
    fn unknown_warning_filter_is_rejected() {
        let rows = vec![review_row(1, "操作系统", "CS302", vec![])];
        let mut filters = FilterSet::new();
        filters.set("warning", "maybe");
        assert!(matches!(
            filter_review_rows(rows, &filters),
            Err(AdminError::InvalidInput(_))
        ));
    }

    // -- Publish filters --

    #[test]
    fn publish_filters_compose() {
        let rows = vec![
            publish_row(1, "编译原理", "2025-2026-1", PublishStatus::Approved),
            publish_row(2, "离散数学", "2025-2026-1", PublishStatus::Published),
            publish_row(3, "高等数学", "2024-2025-2", PublishStatus::Approved),
        ];
        let mut filters = FilterSet::new();
        filters.set("semester", "2025-2026-1");
        filters.set("status", "approved");
        let hits = filter_publish_rows(rows, &filters).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].course_id, 1);
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let rows = vec![publish_row(1, "编译原理", "2025-2026-1", PublishStatus::Approved)];
        let mut filters = FilterSet::new();
        filters.set("status", "archived");
        assert!(matches!(
            filter_publish_rows(rows, &filters),
            Err(AdminError::InvalidInput(_))
        ));
    }
}
