mod common;
pub use self::common::{Query, QueryCommon};

mod class;
pub use self::class::ClassQuery;

mod student;
pub use self::student::StudentQuery;

mod teacher;
pub use self::teacher::TeacherQuery;

mod course;
pub use self::course::CourseQuery;

mod classroom;
pub use self::classroom::ClassroomQuery;

mod log;
pub use self::log::LogQuery;

mod schedule;
pub use self::schedule::{ScheduleQuery, ScheduleTarget};
