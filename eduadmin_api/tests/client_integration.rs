use chrono::{TimeZone, Utc};
use eduadmin_api::types::{BackupKind, NewBackup, StudentStatus};
use eduadmin_api::{ClassQuery, Client, Error, LogQuery, Query, StudentQuery};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_classes_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("classes.json");

    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_classes(&ClassQuery::default()).await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.items.len(), 3);
    assert_eq!(resp.items[0].class_name, "软件2301");
    assert_eq!(resp.pagination.total_items, 23);
}

#[tokio::test]
async fn get_classes_server_error_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message": "数据库连接失败"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_classes(&ClassQuery::default()).await;
    match result {
        Err(Error::HttpStatus { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "数据库连接失败");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected an error"),
    }
}

#[tokio::test]
async fn get_classes_unauthorized_is_session_expired() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message": "未登录"}"#))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_token("stale-token");
    let result = client.get_classes(&ClassQuery::default()).await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

#[tokio::test]
async fn get_classes_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_classes(&ClassQuery::default()).await;
    assert!(matches!(result, Err(Error::Decode)));
}

#[tokio::test]
async fn get_courses_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("courses.json");

    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = eduadmin_api::CourseQuery::default();
    let result = client.get_courses(&query).await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.courses.len(), 2);
    assert_eq!(resp.courses[0].course_name, "数据结构");
}

#[tokio::test]
async fn get_students_forwards_query_params() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("students.json");

    Mock::given(method("GET"))
        .and(path("/students"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param("search", "王"))
        .and(query_param("status", "locked"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = StudentQuery::default()
        .with_search("王")
        .with_status(StudentStatus::Locked)
        .with_page(2)
        .with_page_size(10);
    let result = client.get_students(&query).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn login_posts_credentials() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("login.json");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "username": "admin01",
            "password": "Passw0rd1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.login("admin01", "Passw0rd1").await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert_eq!(resp.token, "tkn-9f2c41d8a0");
    assert_eq!(resp.user.role, "edu_admin");
}

#[tokio::test]
async fn login_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"message": "用户名或密码错误"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.login("admin01", "wrong").await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

#[tokio::test]
async fn get_logs_returns_envelope_untouched() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("logs.json");

    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_logs(&LogQuery::default()).await;
    assert!(result.is_ok());

    let env = result.unwrap();
    assert!(env.success);
    assert_eq!(env.data.unwrap().len(), 2);
    assert_eq!(env.pagination.unwrap().total_pages, 4);
}

#[tokio::test]
async fn get_logs_rejected_envelope_passes_through() {
    // A 200 with success:false is not an error at this layer; the caller
    // decides what a refusal means.
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success": false, "message": "权限不足"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_logs(&LogQuery::default()).await;
    assert!(result.is_ok());

    let env = result.unwrap();
    assert!(!env.success);
    assert_eq!(env.message.as_deref(), Some("权限不足"));
}

#[tokio::test]
async fn clean_logs_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/clean"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success": false, "message": "清理任务已在运行"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let cutoff = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let result = client.clean_logs(cutoff).await;
    match result {
        Err(Error::Rejected { message }) => assert_eq!(message, "清理任务已在运行"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected an error"),
    }
}

#[tokio::test]
async fn clean_logs_success_reports_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/clean"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success": true, "deleted_count": 87}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let cutoff = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let result = client.clean_logs(cutoff).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().deleted_count, 87);
}

#[tokio::test]
async fn bearer_token_attached_to_requests() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("classes.json");

    Mock::given(method("GET"))
        .and(path("/classes"))
        .and(header("authorization", "Bearer tkn-9f2c41d8a0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_token("tkn-9f2c41d8a0");
    let result = client.get_classes(&ClassQuery::default()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn approve_grades_sends_course_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/grades/approve"))
        .and(body_json(serde_json::json!({ "course_id": 11 })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.approve_grades(11).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn batch_reject_sends_ids_and_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/grades/batch-reject"))
        .and(body_json(serde_json::json!({
            "course_ids": [11, 13],
            "reason": "成绩分布异常"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.batch_reject_grades(&[11, 13], "成绩分布异常").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn get_pending_reviews_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("pending_review.json");

    Mock::given(method("GET"))
        .and(path("/grades/pending-review"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_pending_reviews().await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 3);
}

#[tokio::test]
async fn create_backup_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/system/backups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success": false, "message": "已有备份正在运行"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let payload = NewBackup {
        description: "手动备份".to_string(),
        kind: BackupKind::Full,
        verification: true,
    };
    let result = client.create_backup(&payload).await;
    match result {
        Err(Error::Rejected { message }) => assert_eq!(message, "已有备份正在运行"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected an error"),
    }
}

#[tokio::test]
async fn get_teaching_assignments_forwards_semester() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("assignments.json");

    Mock::given(method("GET"))
        .and(path("/teaching-assignments"))
        .and(query_param("semester", "2025-2026-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_teaching_assignments("2025-2026-1").await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_class_succeeds_on_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/classes/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.delete_class(7).await;
    assert!(result.is_ok());
}
