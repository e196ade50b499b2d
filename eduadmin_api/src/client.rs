//! HTTP client for the teaching-administration REST API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{
        ClassQuery, ClassroomQuery, CourseQuery, LogQuery, Query, ScheduleQuery, StudentQuery,
        TeacherQuery,
    },
    types::{
        AdminUser, BackupEntry, ClassGroup, ClassPayload, Classroom, ClassroomPayload, Course,
        CourseList, CoursePayload, Credentials, DashboardStats, GradePublishRow, GradeReviewRow,
        ListEnvelope, LogCleanResult, LogEntry, LoginResponse, NewAssignment, NewBackup,
        NewScheduleEntry, ScheduleEntry, Student, StudentPayload, StudentStatus, SystemStatus,
        Teacher, TeacherPayload, TeachingAssignment, WrappedEnvelope,
    },
    Error,
};

static USER_AGENT: &str = concat!("eduadmin/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the teaching-administration REST API.
///
/// Carries the bearer token of the signed-in administrator; requests made
/// without a token (login) simply omit the Authorization header. Each
/// request builds a fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Base URL including the version prefix.
    /// Defaults to `http://127.0.0.1:8000/api/v1`.
    base_api_url: String,
    token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the local development gateway.
    pub fn new() -> Self {
        Self {
            base_api_url: "http://127.0.0.1:8000/api/v1".to_string(),
            token: None,
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            token: None,
        }
    }

    /// Attaches the bearer token sent with every subsequent request.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    fn url_for(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = self.url_for(path)?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn http(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(&self, request: reqwest::RequestBuilder) -> Result<String, Error> {
        let resp = self
            .authorize(request)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach API: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status.as_u16() == 401 {
            tracing::warn!("Request rejected with 401; session expired");
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            let message = error_message(&body);
            tracing::error!("Request failed with status {}: {}", status, message);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn get_at<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let client = self.http()?;
        let body = self.read_body(client.get(url)).await?;

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            Error::Decode
        })?;

        Ok(parsed)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.get_at(url).await
    }

    /// Sends a JSON body and parses a typed response.
    async fn send<T, B>(&self, method: reqwest::Method, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        let client = self.http()?;
        let body = self
            .read_body(client.request(method, url).json(body))
            .await?;

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            Error::Decode
        })?;

        Ok(parsed)
    }

    /// Sends a request whose response body the screens never read; only the
    /// status matters.
    async fn execute<B>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        let client = self.http()?;
        let request = match body {
            Some(body) => client.request(method, url).json(body),
            None => client.request(method, url),
        };
        self.read_body(request).await?;
        Ok(())
    }

    // -- Auth --

    /// Signs in and returns the bearer token plus the account record.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        self.send(
            reqwest::Method::POST,
            "/auth/login",
            &Credentials { username, password },
        )
        .await
    }

    /// Checks that the attached token is still accepted by the gateway.
    pub async fn validate_session(&self) -> Result<Option<AdminUser>, Error> {
        let env: WrappedEnvelope<AdminUser> =
            self.get::<_, ClassQuery>("/auth/validate", None).await?;
        if !env.success {
            return Err(Error::Rejected {
                message: env
                    .message
                    .unwrap_or_else(|| "Session validation failed".to_string()),
            });
        }
        Ok(env.data)
    }

    // -- Dashboard --

    /// Fetches the headline record counts for the dashboard.
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.get::<_, ClassQuery>("/edu-admin/dashboard-stats", None)
            .await
    }

    // -- Classes --

    /// Fetches a paginated list of classes matching the given query.
    pub async fn get_classes(&self, query: &ClassQuery) -> Result<ListEnvelope<ClassGroup>, Error> {
        self.get("/classes", Some(query)).await
    }

    /// Fetches a single class by id.
    pub async fn get_class(&self, class_id: i64) -> Result<ClassGroup, Error> {
        self.get::<_, ClassQuery>(format!("/classes/{}", class_id).as_str(), None)
            .await
    }

    pub async fn create_class(&self, payload: &ClassPayload) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/classes", Some(payload))
            .await
    }

    pub async fn update_class(&self, class_id: i64, payload: &ClassPayload) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/classes/{}", class_id).as_str(),
            Some(payload),
        )
        .await
    }

    pub async fn delete_class(&self, class_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/classes/{}", class_id).as_str(),
            None,
        )
        .await
    }

    // -- Students --

    /// Fetches a paginated list of students matching the given query.
    pub async fn get_students(&self, query: &StudentQuery) -> Result<ListEnvelope<Student>, Error> {
        self.get("/students", Some(query)).await
    }

    /// Fetches a single student by id.
    pub async fn get_student(&self, student_id: i64) -> Result<Student, Error> {
        self.get::<_, StudentQuery>(format!("/students/{}", student_id).as_str(), None)
            .await
    }

    pub async fn create_student(&self, payload: &StudentPayload) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/students", Some(payload))
            .await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        payload: &StudentPayload,
    ) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/students/{}", student_id).as_str(),
            Some(payload),
        )
        .await
    }

    /// Locks or reactivates a student account.
    pub async fn set_student_status(
        &self,
        student_id: i64,
        status: StudentStatus,
    ) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/students/{}", student_id).as_str(),
            Some(&serde_json::json!({ "status": status })),
        )
        .await
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/students/{}", student_id).as_str(),
            None,
        )
        .await
    }

    // -- Teachers --

    /// Fetches a paginated list of teachers matching the given query.
    pub async fn get_teachers(&self, query: &TeacherQuery) -> Result<ListEnvelope<Teacher>, Error> {
        self.get("/teachers", Some(query)).await
    }

    /// Fetches a single teacher by id.
    pub async fn get_teacher(&self, teacher_id: i64) -> Result<Teacher, Error> {
        self.get::<_, TeacherQuery>(format!("/teachers/{}", teacher_id).as_str(), None)
            .await
    }

    pub async fn create_teacher(&self, payload: &TeacherPayload) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/teachers", Some(payload))
            .await
    }

    pub async fn update_teacher(
        &self,
        teacher_id: i64,
        payload: &TeacherPayload,
    ) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/teachers/{}", teacher_id).as_str(),
            Some(payload),
        )
        .await
    }

    pub async fn delete_teacher(&self, teacher_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/teachers/{}", teacher_id).as_str(),
            None,
        )
        .await
    }

    // -- Courses --

    /// Fetches a paginated list of courses matching the given query.
    pub async fn get_courses(&self, query: &CourseQuery) -> Result<CourseList, Error> {
        self.get("/courses", Some(query)).await
    }

    /// Fetches a single course by id.
    pub async fn get_course(&self, course_id: i64) -> Result<Course, Error> {
        self.get::<_, CourseQuery>(format!("/courses/{}", course_id).as_str(), None)
            .await
    }

    pub async fn create_course(&self, payload: &CoursePayload) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/courses", Some(payload))
            .await
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        payload: &CoursePayload,
    ) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/courses/{}", course_id).as_str(),
            Some(payload),
        )
        .await
    }

    pub async fn delete_course(&self, course_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/courses/{}", course_id).as_str(),
            None,
        )
        .await
    }

    // -- Classrooms --

    /// Fetches a paginated list of classrooms matching the given query.
    pub async fn get_classrooms(
        &self,
        query: &ClassroomQuery,
    ) -> Result<ListEnvelope<Classroom>, Error> {
        self.get("/classrooms", Some(query)).await
    }

    /// Fetches a single classroom by id.
    pub async fn get_classroom(&self, classroom_id: i64) -> Result<Classroom, Error> {
        self.get::<_, ClassroomQuery>(format!("/classrooms/{}", classroom_id).as_str(), None)
            .await
    }

    pub async fn create_classroom(&self, payload: &ClassroomPayload) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/classrooms", Some(payload))
            .await
    }

    pub async fn update_classroom(
        &self,
        classroom_id: i64,
        payload: &ClassroomPayload,
    ) -> Result<(), Error> {
        self.execute(
            reqwest::Method::PUT,
            format!("/classrooms/{}", classroom_id).as_str(),
            Some(payload),
        )
        .await
    }

    pub async fn delete_classroom(&self, classroom_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/classrooms/{}", classroom_id).as_str(),
            None,
        )
        .await
    }

    // -- Scheduling --

    /// Fetches every teaching assignment of one semester (flat array).
    pub async fn get_teaching_assignments(
        &self,
        semester: &str,
    ) -> Result<Vec<TeachingAssignment>, Error> {
        let mut url = self.url_for("/teaching-assignments")?;
        url.query_pairs_mut().append_pair("semester", semester);
        self.get_at(url).await
    }

    pub async fn create_assignment(&self, payload: &NewAssignment) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/teaching-assignments", Some(payload))
            .await
    }

    /// Fetches the placed timetable entries matching the given query (flat array).
    pub async fn get_course_schedules(
        &self,
        query: &ScheduleQuery,
    ) -> Result<Vec<ScheduleEntry>, Error> {
        let url = self.url_for("/course-schedules")?;
        self.get_at(query.add_to_url(&url)).await
    }

    pub async fn create_schedule(&self, payload: &NewScheduleEntry) -> Result<(), Error> {
        self.execute(reqwest::Method::POST, "/course-schedules", Some(payload))
            .await
    }

    // -- Grade review & publication --

    /// Fetches every course with submitted grades awaiting review (flat array).
    pub async fn get_pending_reviews(&self) -> Result<Vec<GradeReviewRow>, Error> {
        self.get::<_, CourseQuery>("/grades/pending-review", None)
            .await
    }

    pub async fn approve_grades(&self, course_id: i64) -> Result<(), Error> {
        self.execute(
            reqwest::Method::POST,
            "/grades/approve",
            Some(&serde_json::json!({ "course_id": course_id })),
        )
        .await
    }

    pub async fn reject_grades(&self, course_id: i64, reason: &str) -> Result<(), Error> {
        self.execute(
            reqwest::Method::POST,
            "/grades/reject",
            Some(&serde_json::json!({ "course_id": course_id, "reason": reason })),
        )
        .await
    }

    pub async fn batch_approve_grades(&self, course_ids: &[i64]) -> Result<(), Error> {
        self.execute(
            reqwest::Method::POST,
            "/grades/batch-approve",
            Some(&serde_json::json!({ "course_ids": course_ids })),
        )
        .await
    }

    pub async fn batch_reject_grades(&self, course_ids: &[i64], reason: &str) -> Result<(), Error> {
        self.execute(
            reqwest::Method::POST,
            "/grades/batch-reject",
            Some(&serde_json::json!({ "course_ids": course_ids, "reason": reason })),
        )
        .await
    }

    /// Fetches every reviewed course eligible for publication (flat array).
    pub async fn get_publish_list(&self) -> Result<Vec<GradePublishRow>, Error> {
        self.get::<_, CourseQuery>("/grades/publish-list", None)
            .await
    }

    pub async fn publish_grades(&self, course_ids: &[i64]) -> Result<(), Error> {
        self.execute(
            reqwest::Method::POST,
            "/grades/publish",
            Some(&serde_json::json!({ "course_ids": course_ids })),
        )
        .await
    }

    // -- System administration --

    /// Fetches one page of the operation log. The wrapped envelope is
    /// returned as-is; callers check `success` and unwrap `data`.
    pub async fn get_logs(&self, query: &LogQuery) -> Result<WrappedEnvelope<Vec<LogEntry>>, Error> {
        self.get("/logs", Some(query)).await
    }

    pub async fn delete_log(&self, log_id: i64) -> Result<(), Error> {
        self.execute::<()>(
            reqwest::Method::DELETE,
            format!("/logs/{}", log_id).as_str(),
            None,
        )
        .await
    }

    /// Deletes logs older than the given instant, returning the count.
    pub async fn clean_logs(&self, older_than: DateTime<Utc>) -> Result<LogCleanResult, Error> {
        let result: LogCleanResult = self
            .send(
                reqwest::Method::POST,
                "/logs/clean",
                &serde_json::json!({ "older_than": older_than.to_rfc3339() }),
            )
            .await?;
        if !result.success {
            return Err(Error::Rejected {
                message: result
                    .message
                    .unwrap_or_else(|| "Log cleanup failed".to_string()),
            });
        }
        Ok(result)
    }

    /// Fetches the backup list envelope as-is; callers check `success`.
    pub async fn get_backups(&self) -> Result<WrappedEnvelope<Vec<BackupEntry>>, Error> {
        self.get::<_, LogQuery>("/system/backups", None).await
    }

    /// Starts a backup. The archive is written asynchronously server-side;
    /// poll the list for completion.
    pub async fn create_backup(&self, payload: &NewBackup) -> Result<(), Error> {
        let env: WrappedEnvelope<serde_json::Value> = self
            .send(reqwest::Method::POST, "/system/backups", payload)
            .await?;
        if !env.success {
            return Err(Error::Rejected {
                message: env
                    .message
                    .unwrap_or_else(|| "Backup could not be started".to_string()),
            });
        }
        Ok(())
    }

    /// Fetches the system health envelope as-is; callers check `success`.
    pub async fn get_system_status(&self) -> Result<WrappedEnvelope<SystemStatus>, Error> {
        self.get::<_, LogQuery>("/system/status", None).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Bodies are routinely CJK; cut on a char boundary.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

/// Pulls the `message` field out of an error body, falling back to a snippet.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| truncate_body(body)),
        Err(_) => truncate_body(body),
    }
}
