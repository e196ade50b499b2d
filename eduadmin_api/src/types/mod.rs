mod meta;
pub use self::meta::{ListEnvelope, ListPagination, WrappedEnvelope, WrappedPagination};

mod class_group;
pub use self::class_group::{ClassGroup, ClassPayload};

mod student;
pub use self::student::{Student, StudentPayload, StudentStatus};

mod teacher;
pub use self::teacher::{Teacher, TeacherPayload};

mod course;
pub use self::course::{Course, CourseList, CoursePayload, GradeItem, TeacherRef};

mod classroom;
pub use self::classroom::{Classroom, ClassroomPayload};

mod schedule;
pub use self::schedule::{
    AssignedTeacherRef, ClassroomRef, CourseRef, DayOfWeek, NewAssignment, NewScheduleEntry,
    ScheduleEntry, TeachingAssignment,
};

mod grade;
pub use self::grade::{
    GradePublishRow, GradeReviewRow, GradeWarning, PublishStatus, ReviewStatus, WarningKind,
};

mod log;
pub use self::log::{LogCleanResult, LogEntry, Operator};

mod backup;
pub use self::backup::{BackupEntry, BackupKind, BackupStatus, NewBackup};

mod system;
pub use self::system::{SystemStatistics, SystemStatus};

mod user;
pub use self::user::{AdminUser, Credentials, LoginResponse};

mod stats;
pub use self::stats::DashboardStats;
