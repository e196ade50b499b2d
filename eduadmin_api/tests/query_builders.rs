use chrono::NaiveDate;
use eduadmin_api::types::StudentStatus;
use eduadmin_api::{
    ClassQuery, ClassroomQuery, CourseQuery, LogQuery, Query, ScheduleQuery, StudentQuery,
    TeacherQuery,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn class_query_defaults() {
    let url = ClassQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("page=1"));
    assert!(!query.contains("pageSize"));
}

#[test]
fn class_query_with_filters() {
    let url = ClassQuery::default()
        .with_class_name("软件2301")
        .with_department("软件工程系")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("class_name="));
    assert!(query.contains("department="));
}

#[test]
fn class_query_with_page_and_size() {
    let url = ClassQuery::default()
        .with_page(3)
        .with_page_size(20)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("page=3"));
    assert!(query.contains("pageSize=20"));
}

#[test]
fn student_query_with_filters() {
    let url = StudentQuery::default()
        .with_search("王")
        .with_class_id(4)
        .with_status(StudentStatus::Active)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("search="));
    assert!(query.contains("class_id=4"));
    assert!(query.contains("status=active"));
}

#[test]
fn student_query_locked_status() {
    let url = StudentQuery::default()
        .with_status(StudentStatus::Locked)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("status=locked"));
}

#[test]
fn teacher_query_with_filters() {
    let url = TeacherQuery::default()
        .with_search("陈")
        .with_title("副教授")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("search="));
    assert!(query.contains("title="));
}

#[test]
fn course_query_with_filters() {
    let url = CourseQuery::default()
        .with_course_name("数据结构")
        .with_department("计算机系")
        .with_credits(4)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("course_name="));
    assert!(query.contains("department="));
    assert!(query.contains("credits=4"));
}

#[test]
fn classroom_query_with_filters() {
    let url = ClassroomQuery::default()
        .with_search("A-3")
        .with_capacity(60)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("search="));
    assert!(query.contains("capacity=60"));
}

#[test]
fn log_query_defaults() {
    let url = LogQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("page=1"));
}

#[test]
fn log_query_with_filters() {
    let url = LogQuery::default()
        .with_action("user.login")
        .with_user_id(17)
        .with_start_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("action=user.login"));
    assert!(query.contains("user_id=17"));
    assert!(query.contains("start_date=2025-06-01"));
}

#[test]
fn unset_filters_stay_out_of_the_query() {
    let url = StudentQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(!query.contains("search"));
    assert!(!query.contains("class_id"));
    assert!(!query.contains("status"));
}

#[test]
fn schedule_query_semester_only() {
    let url = ScheduleQuery::for_semester("2025-2026-1").add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("semester=2025-2026-1"));
    assert!(!query.contains("teacher_id"));
    assert!(!query.contains("class_id"));
    assert!(!query.contains("classroom_id"));
}

#[test]
fn schedule_query_target_variants() {
    let url = ScheduleQuery::for_semester("2025-2026-1")
        .with_teacher(9)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("teacher_id=9"));

    let url = ScheduleQuery::for_semester("2025-2026-1")
        .with_class(4)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("class_id=4"));

    let url = ScheduleQuery::for_semester("2025-2026-1")
        .with_classroom(12)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("classroom_id=12"));
}

#[test]
fn schedule_query_last_target_wins() {
    let url = ScheduleQuery::for_semester("2025-2026-1")
        .with_teacher(9)
        .with_class(4)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("class_id=4"));
    assert!(!query.contains("teacher_id"));
}
