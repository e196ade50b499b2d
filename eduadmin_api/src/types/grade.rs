//! Grade review and publication types.
//!
//! Review and publish lists come back as flat arrays; search, semester and
//! warning filters plus pagination are applied client-side.

use serde::{Deserialize, Serialize};

/// One course awaiting review, from `/grades/pending-review`.
#[derive(Serialize, Deserialize)]
pub struct GradeReviewRow {
    pub course_id: i64,

    pub course_name: String,

    pub course_code: Option<String>,

    pub semester: Option<String>,

    pub status: ReviewStatus,

    /// Anomalies flagged by the backend's distribution checks; empty when
    /// the submitted grades look normal.
    #[serde(default)]
    pub warnings: Vec<GradeWarning>,
}

/// One reviewed course on the publication list, from `/grades/publish-list`.
#[derive(Serialize, Deserialize)]
pub struct GradePublishRow {
    pub course_id: i64,

    pub course_name: String,

    pub course_code: Option<String>,

    pub semester: Option<String>,

    /// `Approved` rows can be published; `Published` rows are done.
    pub status: PublishStatus,

    /// Review completion time as the backend formats it, absent while
    /// the review is still pending.
    #[serde(default)]
    pub reviewed_at: Option<String>,
}

/// Review state of a submitted grade sheet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    #[serde(rename = "pending_review")]
    PendingReview,

    #[serde(rename = "approved")]
    Approved,

    #[serde(rename = "rejected")]
    Rejected,
}
impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ReviewStatus::PendingReview => "pending_review",
                ReviewStatus::Approved => "approved",
                ReviewStatus::Rejected => "rejected",
            }
        )
    }
}

/// Publication state of an approved grade sheet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    #[serde(rename = "approved")]
    Approved,

    #[serde(rename = "published")]
    Published,
}
impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PublishStatus::Approved => "approved",
                PublishStatus::Published => "published",
            }
        )
    }
}
impl std::str::FromStr for PublishStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(PublishStatus::Approved),
            "published" => Ok(PublishStatus::Published),
            _ => Err(()),
        }
    }
}

/// A single anomaly attached to a review row. Some deployments spell the
/// discriminator `type`, others `warning_type`.
#[derive(Serialize, Deserialize)]
pub struct GradeWarning {
    #[serde(rename = "type", alias = "warning_type")]
    pub kind: WarningKind,

    #[serde(default)]
    pub message: Option<String>,
}

/// Anomaly categories produced by the grade distribution checks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    #[serde(rename = "HIGH_EXCELLENT_RATE")]
    HighExcellentRate,

    #[serde(rename = "LOW_PASS_RATE")]
    LowPassRate,

    #[serde(rename = "GRADE_DISTRIBUTION_ABNORMAL")]
    DistributionAbnormal,

    #[serde(rename = "SINGLE_STUDENT_ANOMALY")]
    SingleStudentAnomaly,

    #[serde(rename = "MULTIPLE_STUDENTS_ANOMALY")]
    MultipleStudentsAnomaly,
}
impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                WarningKind::HighExcellentRate => "HIGH_EXCELLENT_RATE",
                WarningKind::LowPassRate => "LOW_PASS_RATE",
                WarningKind::DistributionAbnormal => "GRADE_DISTRIBUTION_ABNORMAL",
                WarningKind::SingleStudentAnomaly => "SINGLE_STUDENT_ANOMALY",
                WarningKind::MultipleStudentsAnomaly => "MULTIPLE_STUDENTS_ANOMALY",
            }
        )
    }
}
