use anyhow::Result;
use eduadmin_lib::types::{
    BackupEntry, ClassGroup, Classroom, Course, DashboardStats, DayOfWeek, GradePublishRow,
    GradeReviewRow, LogEntry, ScheduleEntry, Student, SystemStatus, Teacher, TeachingAssignment,
};
use eduadmin_lib::{timetable, PageLink, TimetableGrid};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

// -- Row shapes --

#[derive(Tabled, Serialize)]
struct ClassRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Class")]
    #[serde(rename = "Class")]
    class_name: String,
    #[tabled(rename = "Department")]
    #[serde(rename = "Department")]
    department: String,
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    enrollment_year: String,
    #[tabled(rename = "Students")]
    #[serde(rename = "Students")]
    student_count: String,
}

#[derive(Tabled, Serialize)]
struct StudentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    full_name: String,
    #[tabled(rename = "Username")]
    #[serde(rename = "Username")]
    username: String,
    #[tabled(rename = "Class")]
    #[serde(rename = "Class")]
    class_name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct TeacherRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Staff No")]
    #[serde(rename = "Staff No")]
    teacher_id_number: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    full_name: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Tabled, Serialize)]
struct CourseRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    course_code: String,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course_name: String,
    #[tabled(rename = "Credits")]
    #[serde(rename = "Credits")]
    credits: f64,
    #[tabled(rename = "Department")]
    #[serde(rename = "Department")]
    department: String,
    #[tabled(rename = "Teachers")]
    #[serde(rename = "Teachers")]
    teachers: String,
}

#[derive(Tabled, Serialize)]
struct ClassroomRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Room")]
    #[serde(rename = "Room")]
    name: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Capacity")]
    #[serde(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Equipment")]
    #[serde(rename = "Equipment")]
    equipment: String,
}

#[derive(Tabled, Serialize)]
struct AssignmentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course: String,
    #[tabled(rename = "Teacher")]
    #[serde(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Semester")]
    #[serde(rename = "Semester")]
    semester: String,
}

#[derive(Tabled, Serialize)]
struct ScheduleRow {
    #[tabled(rename = "Day")]
    #[serde(rename = "Day")]
    day: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course: String,
    #[tabled(rename = "Teacher")]
    #[serde(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Classroom")]
    #[serde(rename = "Classroom")]
    classroom: String,
}

#[derive(Tabled, Serialize)]
struct ReviewRow {
    #[tabled(rename = "Course ID")]
    #[serde(rename = "Course ID")]
    course_id: i64,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course_name: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    course_code: String,
    #[tabled(rename = "Semester")]
    #[serde(rename = "Semester")]
    semester: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Warnings")]
    #[serde(rename = "Warnings")]
    warnings: String,
}

#[derive(Tabled, Serialize)]
struct PublishRow {
    #[tabled(rename = "Course ID")]
    #[serde(rename = "Course ID")]
    course_id: i64,
    #[tabled(rename = "Course")]
    #[serde(rename = "Course")]
    course_name: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    course_code: String,
    #[tabled(rename = "Semester")]
    #[serde(rename = "Semester")]
    semester: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Reviewed At")]
    #[serde(rename = "Reviewed At")]
    reviewed_at: String,
}

#[derive(Tabled, Serialize)]
struct LogRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Operator")]
    #[serde(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Action")]
    #[serde(rename = "Action")]
    action: String,
    #[tabled(rename = "Details")]
    #[serde(rename = "Details")]
    details: String,
    #[tabled(rename = "IP")]
    #[serde(rename = "IP")]
    ip_address: String,
}

#[derive(Tabled, Serialize)]
struct BackupRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Verified")]
    #[serde(rename = "Verified")]
    verified: String,
}

#[derive(Tabled, Serialize)]
struct StatRow {
    #[tabled(rename = "Metric")]
    #[serde(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Count")]
    #[serde(rename = "Count")]
    count: i64,
}

#[derive(Tabled, Serialize)]
struct StatusRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn num(value: &Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn build_class_rows(items: &[ClassGroup]) -> Vec<ClassRow> {
    items
        .iter()
        .map(|c| ClassRow {
            id: c.id,
            class_name: c.class_name.clone(),
            department: text(&c.department),
            enrollment_year: num(&c.enrollment_year),
            student_count: num(&c.student_count),
        })
        .collect()
}

fn build_student_rows(items: &[Student]) -> Vec<StudentRow> {
    items
        .iter()
        .map(|s| StudentRow {
            id: s.id,
            full_name: s.full_name.clone(),
            username: text(&s.username),
            class_name: text(&s.class_name),
            email: text(&s.email),
            status: s.status.to_string(),
        })
        .collect()
}

fn build_teacher_rows(items: &[Teacher]) -> Vec<TeacherRow> {
    items
        .iter()
        .map(|t| TeacherRow {
            id: t.id,
            teacher_id_number: text(&t.teacher_id_number),
            full_name: t.full_name.clone(),
            title: text(&t.title),
            email: text(&t.email),
        })
        .collect()
}

fn build_course_rows(items: &[Course]) -> Vec<CourseRow> {
    items
        .iter()
        .map(|c| CourseRow {
            id: c.id,
            course_code: text(&c.course_code),
            course_name: c.course_name.clone(),
            credits: c.credits,
            department: text(&c.department),
            teachers: c
                .teachers
                .iter()
                .map(|t| t.full_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn build_classroom_rows(items: &[Classroom]) -> Vec<ClassroomRow> {
    items
        .iter()
        .map(|r| ClassroomRow {
            id: r.id,
            name: r.name.clone(),
            location: text(&r.location),
            capacity: num(&r.capacity),
            equipment: text(&r.equipment),
        })
        .collect()
}

fn build_assignment_rows(items: &[TeachingAssignment]) -> Vec<AssignmentRow> {
    items
        .iter()
        .map(|a| AssignmentRow {
            id: a.id,
            course: a
                .course
                .as_ref()
                .map(|c| c.course_name.clone())
                .unwrap_or_default(),
            teacher: a
                .teacher
                .as_ref()
                .map(|t| t.full_name.clone())
                .unwrap_or_default(),
            semester: a.semester.clone(),
        })
        .collect()
}

fn build_schedule_rows(items: &[ScheduleEntry]) -> Vec<ScheduleRow> {
    items
        .iter()
        .map(|e| ScheduleRow {
            day: e.day_of_week.to_string(),
            time: format!(
                "{}-{}",
                e.start_time.format("%H:%M"),
                e.end_time.format("%H:%M")
            ),
            course: e
                .course
                .as_ref()
                .map(|c| c.course_name.clone())
                .unwrap_or_default(),
            teacher: e
                .teacher
                .as_ref()
                .map(|t| t.full_name.clone())
                .unwrap_or_default(),
            classroom: e
                .classroom
                .as_ref()
                .map(|r| r.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_review_rows(items: &[GradeReviewRow]) -> Vec<ReviewRow> {
    items
        .iter()
        .map(|r| ReviewRow {
            course_id: r.course_id,
            course_name: r.course_name.clone(),
            course_code: text(&r.course_code),
            semester: text(&r.semester),
            status: r.status.to_string(),
            warnings: r
                .warnings
                .iter()
                .map(|w| match &w.message {
                    Some(message) => format!("{} ({})", w.kind, message),
                    None => w.kind.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}

fn build_publish_rows(items: &[GradePublishRow]) -> Vec<PublishRow> {
    items
        .iter()
        .map(|r| PublishRow {
            course_id: r.course_id,
            course_name: r.course_name.clone(),
            course_code: text(&r.course_code),
            semester: text(&r.semester),
            status: r.status.to_string(),
            reviewed_at: text(&r.reviewed_at),
        })
        .collect()
}

fn build_log_rows(items: &[LogEntry]) -> Vec<LogRow> {
    items
        .iter()
        .map(|e| LogRow {
            id: e.id,
            timestamp: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            operator: e
                .operator
                .as_ref()
                .map(|o| o.username.clone())
                .unwrap_or_default(),
            action: e.action.clone(),
            details: text(&e.details),
            ip_address: text(&e.ip_address),
        })
        .collect()
}

fn build_backup_rows(items: &[BackupEntry]) -> Vec<BackupRow> {
    items
        .iter()
        .map(|b| BackupRow {
            id: b.id.clone(),
            timestamp: b.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            kind: b.kind.to_string(),
            description: b.description.clone(),
            size: b.size.map(|mb| format!("{} MB", mb)).unwrap_or_default(),
            status: b.status.to_string(),
            verified: if b.verified { "yes" } else { "no" }.to_string(),
        })
        .collect()
}

fn build_stat_rows(stats: &DashboardStats) -> Vec<StatRow> {
    vec![
        StatRow {
            metric: "Students".to_string(),
            count: stats.students,
        },
        StatRow {
            metric: "Teachers".to_string(),
            count: stats.teachers,
        },
        StatRow {
            metric: "Classes".to_string(),
            count: stats.classes,
        },
        StatRow {
            metric: "Courses".to_string(),
            count: stats.courses,
        },
    ]
}

fn build_status_rows(status: &SystemStatus) -> Vec<StatusRow> {
    let mut rows = vec![
        StatusRow {
            field: "Database".to_string(),
            value: text(&status.database_status),
        },
        StatusRow {
            field: "Uptime (days)".to_string(),
            value: num(&status.uptime_days),
        },
        StatusRow {
            field: "Storage".to_string(),
            value: text(&status.storage_usage),
        },
        StatusRow {
            field: "Last backup".to_string(),
            value: text(&status.last_backup),
        },
    ];
    if let Some(stats) = &status.statistics {
        rows.push(StatusRow {
            field: "Users".to_string(),
            value: stats.users.to_string(),
        });
        rows.push(StatusRow {
            field: "Published grades".to_string(),
            value: stats.published_grades.to_string(),
        });
        rows.push(StatusRow {
            field: "Logs today".to_string(),
            value: stats.today_logs.to_string(),
        });
    }
    rows
}

// -- Table output --

pub fn print_classes_table(items: &[ClassGroup]) {
    println!("{}", Table::new(build_class_rows(items)));
}

pub fn print_students_table(items: &[Student]) {
    println!("{}", Table::new(build_student_rows(items)));
}

pub fn print_teachers_table(items: &[Teacher]) {
    println!("{}", Table::new(build_teacher_rows(items)));
}

pub fn print_courses_table(items: &[Course]) {
    println!("{}", Table::new(build_course_rows(items)));
}

pub fn print_classrooms_table(items: &[Classroom]) {
    println!("{}", Table::new(build_classroom_rows(items)));
}

pub fn print_assignments_table(items: &[TeachingAssignment]) {
    println!("{}", Table::new(build_assignment_rows(items)));
}

pub fn print_reviews_table(items: &[GradeReviewRow]) {
    println!("{}", Table::new(build_review_rows(items)));
}

pub fn print_publish_table(items: &[GradePublishRow]) {
    println!("{}", Table::new(build_publish_rows(items)));
}

pub fn print_logs_table(items: &[LogEntry]) {
    println!("{}", Table::new(build_log_rows(items)));
}

pub fn print_backups_table(items: &[BackupEntry]) {
    println!("{}", Table::new(build_backup_rows(items)));
}

pub fn print_stats_table(stats: &DashboardStats) {
    println!("{}", Table::new(build_stat_rows(stats)));
}

pub fn print_status_table(status: &SystemStatus) {
    println!("{}", Table::new(build_status_rows(status)));
}

// -- Markdown output --

fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_classes_markdown(items: &[ClassGroup]) {
    print_markdown(build_class_rows(items));
}

pub fn print_students_markdown(items: &[Student]) {
    print_markdown(build_student_rows(items));
}

pub fn print_teachers_markdown(items: &[Teacher]) {
    print_markdown(build_teacher_rows(items));
}

pub fn print_courses_markdown(items: &[Course]) {
    print_markdown(build_course_rows(items));
}

pub fn print_classrooms_markdown(items: &[Classroom]) {
    print_markdown(build_classroom_rows(items));
}

pub fn print_assignments_markdown(items: &[TeachingAssignment]) {
    print_markdown(build_assignment_rows(items));
}

pub fn print_reviews_markdown(items: &[GradeReviewRow]) {
    print_markdown(build_review_rows(items));
}

pub fn print_publish_markdown(items: &[GradePublishRow]) {
    print_markdown(build_publish_rows(items));
}

pub fn print_logs_markdown(items: &[LogEntry]) {
    print_markdown(build_log_rows(items));
}

pub fn print_backups_markdown(items: &[BackupEntry]) {
    print_markdown(build_backup_rows(items));
}

pub fn print_stats_markdown(stats: &DashboardStats) {
    print_markdown(build_stat_rows(stats));
}

pub fn print_status_markdown(status: &SystemStatus) {
    print_markdown(build_status_rows(status));
}

// -- CSV output --

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_classes_csv(items: &[ClassGroup]) -> Result<()> {
    print_csv(build_class_rows(items))
}

pub fn print_students_csv(items: &[Student]) -> Result<()> {
    print_csv(build_student_rows(items))
}

pub fn print_teachers_csv(items: &[Teacher]) -> Result<()> {
    print_csv(build_teacher_rows(items))
}

pub fn print_courses_csv(items: &[Course]) -> Result<()> {
    print_csv(build_course_rows(items))
}

pub fn print_classrooms_csv(items: &[Classroom]) -> Result<()> {
    print_csv(build_classroom_rows(items))
}

pub fn print_assignments_csv(items: &[TeachingAssignment]) -> Result<()> {
    print_csv(build_assignment_rows(items))
}

pub fn print_schedules_csv(items: &[ScheduleEntry]) -> Result<()> {
    print_csv(build_schedule_rows(items))
}

pub fn print_reviews_csv(items: &[GradeReviewRow]) -> Result<()> {
    print_csv(build_review_rows(items))
}

pub fn print_publish_csv(items: &[GradePublishRow]) -> Result<()> {
    print_csv(build_publish_rows(items))
}

pub fn print_logs_csv(items: &[LogEntry]) -> Result<()> {
    print_csv(build_log_rows(items))
}

pub fn print_backups_csv(items: &[BackupEntry]) -> Result<()> {
    print_csv(build_backup_rows(items))
}

pub fn print_stats_csv(stats: &DashboardStats) -> Result<()> {
    print_csv(build_stat_rows(stats))
}

pub fn print_status_csv(status: &SystemStatus) -> Result<()> {
    print_csv(build_status_rows(status))
}

/// Writes log rows to an arbitrary writer. The export subcommand streams
/// an entire filtered log into a file with this.
pub fn write_logs_csv<W: std::io::Write>(writer: W, items: &[LogEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in build_log_rows(items) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Pager strip --

/// Renders a pagination window as the one-line strip shown under lists,
/// with the current page bracketed: `1 .. 4 5 [6] 7 8 .. 42`.
pub fn pager_line(links: &[PageLink], current: i64) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(p) if *p == current => format!("[{}]", p),
            PageLink::Page(p) => p.to_string(),
            PageLink::Ellipsis => "..".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// -- Timetable grid --

fn grid_cell_text(entries: &[&ScheduleEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let mut cell = e
                .course
                .as_ref()
                .map(|c| c.course_name.clone())
                .unwrap_or_default();
            if let Some(teacher) = &e.teacher {
                cell.push(' ');
                cell.push_str(&teacher.full_name);
            }
            if let Some(room) = &e.classroom {
                cell.push_str(" @");
                cell.push_str(&room.name);
            }
            cell
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn timetable_table(grid: &TimetableGrid<'_>) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["Slot".to_string()];
    header.extend(DayOfWeek::ALL.iter().map(|d| d.to_string()));
    builder.push_record(header);
    for (slot, label) in timetable::SLOT_LABELS.iter().enumerate() {
        let mut record = vec![(*label).to_string()];
        for day in DayOfWeek::ALL {
            record.push(grid_cell_text(grid.cell(slot, day)));
        }
        builder.push_record(record);
    }
    builder.build()
}

pub fn render_timetable(grid: &TimetableGrid<'_>) -> String {
    timetable_table(grid).to_string()
}

pub fn render_timetable_markdown(grid: &TimetableGrid<'_>) -> String {
    let mut table = timetable_table(grid);
    table.with(Style::markdown());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use eduadmin_lib::page_window;
    use eduadmin_lib::types::{
        AssignedTeacherRef, ClassroomRef, CourseRef, ListEnvelope, WrappedEnvelope,
    };

    const CLASSES_JSON: &str = include_str!("../../eduadmin_api/tests/fixtures/classes.json");
    const LOGS_JSON: &str = include_str!("../../eduadmin_api/tests/fixtures/logs.json");
    const REVIEW_JSON: &str = include_str!("../../eduadmin_api/tests/fixtures/pending_review.json");
    const BACKUPS_JSON: &str = include_str!("../../eduadmin_api/tests/fixtures/backups.json");

    fn fixture_classes() -> Vec<ClassGroup> {
        serde_json::from_str::<ListEnvelope<ClassGroup>>(CLASSES_JSON)
            .unwrap()
            .items
    }

    fn csv_from_rows<R: Serialize>(rows: Vec<R>) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_class_rows_from_fixture() {
        let rows = build_class_rows(&fixture_classes());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].class_name, "软件2301");
        assert_eq!(rows[0].department, "软件工程系");
        assert_eq!(rows[0].enrollment_year, "2023");
        assert_eq!(rows[2].student_count, "28");
    }

    #[test]
    fn test_class_csv_headers() {
        let csv = csv_from_rows(build_class_rows(&fixture_classes()));
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "ID,Class,Department,Year,Students");
    }

    #[test]
    fn test_log_rows_blank_out_missing_operator() {
        let entries = serde_json::from_str::<WrappedEnvelope<Vec<LogEntry>>>(LOGS_JSON)
            .unwrap()
            .data
            .unwrap();
        let rows = build_log_rows(&entries);
        assert_eq!(rows[0].operator, "admin01");
        assert_eq!(rows[0].timestamp, "2025-06-21 08:30:00");
        assert_eq!(rows[1].operator, "");
        assert_eq!(rows[1].ip_address, "");
    }

    #[test]
    fn test_review_rows_join_warnings() {
        let rows_in: Vec<GradeReviewRow> = serde_json::from_str(REVIEW_JSON).unwrap();
        let rows = build_review_rows(&rows_in);
        assert_eq!(
            rows[0].warnings,
            "HIGH_EXCELLENT_RATE (优秀率 41%); LOW_PASS_RATE"
        );
        assert_eq!(rows[1].warnings, "");
        assert_eq!(rows[2].status, "pending_review");
    }

    #[test]
    fn test_backup_rows_format_size_and_verified() {
        let entries = serde_json::from_str::<WrappedEnvelope<Vec<BackupEntry>>>(BACKUPS_JSON)
            .unwrap()
            .data
            .unwrap();
        let rows = build_backup_rows(&entries);
        assert_eq!(rows[0].size, "220 MB");
        assert_eq!(rows[0].verified, "yes");
        assert_eq!(rows[1].size, "");
        assert_eq!(rows[1].status, "running");
    }

    #[test]
    fn test_markdown_table_structure() {
        let mut table = Table::new(build_class_rows(&fixture_classes()));
        table.with(Style::markdown());
        let rendered = table.to_string();
        let mut lines = rendered.lines();
        let header = lines.next().unwrap();
        let separator = lines.next().unwrap();
        assert!(header.starts_with('|') && header.contains("Class"));
        assert!(separator.contains("---"));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn test_pager_line_brackets_current_page() {
        insta::assert_snapshot!(pager_line(&page_window(2, 3), 2), @"1 [2] 3");
    }

    #[test]
    fn test_pager_line_collapses_far_pages() {
        insta::assert_snapshot!(pager_line(&page_window(6, 42), 6), @"1 .. 4 5 [6] 7 8 .. 42");
    }

    // -- Timetable rendering --

    fn entry(day: DayOfWeek, start: (u32, u32), course: &str, room: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: Some(1),
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start.0 + 1, start.1 + 40, 0).unwrap(),
            course: Some(CourseRef {
                course_name: course.to_string(),
            }),
            teacher: Some(AssignedTeacherRef {
                full_name: "王伟".to_string(),
            }),
            classroom: Some(ClassroomRef {
                name: room.to_string(),
            }),
        }
    }

    #[test]
    fn test_timetable_places_entries_in_cells() {
        let entries = vec![
            entry(DayOfWeek::Mon, (8, 0), "数据结构", "A-301"),
            entry(DayOfWeek::Fri, (19, 0), "大学英语", "B-102"),
        ];
        let grid = TimetableGrid::place(&entries);

        let rendered = render_timetable(&grid);
        assert!(rendered.contains("Mon"));
        assert!(rendered.contains("数据结构 王伟 @A-301"));
        assert!(rendered.contains("大学英语 王伟 @B-102"));
        assert!(rendered.contains("08:00-09:40"));
        assert!(rendered.contains("19:00-20:40"));
    }

    #[test]
    fn test_timetable_markdown_has_pipe_rows() {
        let grid = TimetableGrid::place(&[]);
        let rendered = render_timetable_markdown(&grid);
        // header, separator, five slot rows
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.lines().all(|l| l.starts_with('|')));
    }
}
