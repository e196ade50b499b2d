//! Backup types served by the system-administration wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One backup on the `/system/backups` list.
#[derive(Serialize, Deserialize)]
pub struct BackupEntry {
    /// Opaque identifier, e.g. "backup_1735700000000".
    pub id: String,

    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: BackupKind,

    pub description: String,

    /// Archive size in megabytes.
    #[serde(default)]
    pub size: Option<i64>,

    pub status: BackupStatus,

    /// Whether an integrity check ran after the backup completed.
    #[serde(default)]
    pub verified: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    #[serde(rename = "full")]
    Full,

    #[serde(rename = "incremental")]
    Incremental,
}
impl std::fmt::Display for BackupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BackupKind::Full => "full",
                BackupKind::Incremental => "incremental",
            }
        )
    }
}
impl std::str::FromStr for BackupKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(BackupKind::Full),
            "incremental" => Ok(BackupKind::Incremental),
            _ => Err(()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    #[serde(rename = "running")]
    Running,

    #[serde(rename = "success")]
    Success,

    #[serde(rename = "failed")]
    Failed,
}
impl std::fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BackupStatus::Running => "running",
                BackupStatus::Success => "success",
                BackupStatus::Failed => "failed",
            }
        )
    }
}

/// Body for starting a backup.
#[derive(Serialize, Deserialize)]
pub struct NewBackup {
    pub description: String,

    #[serde(rename = "type")]
    pub kind: BackupKind,

    /// Run an integrity check once the archive is written.
    pub verification: bool,
}
