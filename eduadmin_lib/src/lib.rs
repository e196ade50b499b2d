//! Library layer for the EduAdmin console: paged list controller, editor
//! flows, and session handling.
//!
//! Wraps the `eduadmin_api` crate with the generic [`PagedCollection`]
//! list controller, per-endpoint page sources, the add/edit flow state
//! machine, dropdown option caching, input validation, and the saved
//! session store.

pub mod collection;
pub mod error;
pub mod flow;
pub mod options;
pub mod session;
pub mod sources;
pub mod timetable;
pub mod validation;
pub mod window;

pub use eduadmin_api;
pub use eduadmin_api::types;
pub use eduadmin_api::{
    ClassQuery, ClassroomQuery, Client, CourseQuery, LogQuery, Query, ScheduleQuery, StudentQuery,
    TeacherQuery,
};

pub use collection::{
    FilterSet, FilterValue, PageRequest, PageResult, PageSource, PagedCollection, Refresh,
};
pub use error::AdminError;
pub use flow::{EditorFlow, FlowError};
pub use options::{OptionCatalog, OptionItem};
pub use session::{Session, SessionStore};
pub use sources::{
    ClassSource, ClassroomSource, CourseSource, LogSource, PublishSource, ReviewSource,
    StudentSource, TeacherSource,
};
pub use timetable::TimetableGrid;
pub use window::{page_window, PageLink};
