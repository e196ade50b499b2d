//! CLI subcommand implementations.

use anyhow::{bail, Result};
use eduadmin_lib::OptionItem;

pub mod auth;
pub mod backups;
pub mod classes;
pub mod classrooms;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod logs;
pub mod schedule;
pub mod status;
pub mod students;
pub mod teachers;

/// Checks a user-supplied id against the option list the matching form
/// selector would offer.
pub(crate) fn ensure_known(options: &[OptionItem], id: i64, what: &str) -> Result<()> {
    if options.iter().any(|option| option.id == id) {
        return Ok(());
    }
    bail!("{} {} does not exist on the backend", what, id)
}
