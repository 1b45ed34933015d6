use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AssessmentSubmission, JobOpening, OpeningId, OpeningStatus, PanelMember, ReviewerId,
    SubmissionId,
};
use super::scoring::ScoreComponent;

/// Stored job opening plus its assigned review panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningRecord {
    pub opening: JobOpening,
    pub status: OpeningStatus,
    pub panel: Vec<PanelMember>,
}

impl OpeningRecord {
    /// Completion percentage given how many panel members have submitted,
    /// rounded to one decimal place.
    pub fn progress_percent(&self, submitted: usize) -> f32 {
        if self.panel.is_empty() {
            return 0.0;
        }
        let raw = submitted as f32 / self.panel.len() as f32 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

/// Stored submission with everything the scorer computed at creation time.
/// Records are write-once; the risk fields are never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub opening_id: OpeningId,
    pub submitted_at: DateTime<Utc>,
    pub submission: AssessmentSubmission,
    pub total_score: i16,
    pub components: Vec<ScoreComponent>,
    pub corrective_guidance: Vec<String>,
}

impl SubmissionRecord {
    pub fn status_view(&self) -> SubmissionStatusView {
        SubmissionStatusView {
            submission_id: self.id.clone(),
            reviewer: self.submission.reviewer.reviewer.clone(),
            role_label: self.submission.reviewer.role.label(),
            level_label: self.submission.reviewer.role.level().label(),
            decision: self.submission.decision.label(),
            risk_level: self.submission.risk_level.label(),
            decline_category: self.submission.decline_category.map(|c| c.label()),
            decline_reason: self.submission.decline_reason.clone(),
            corrective_guidance: self.corrective_guidance.clone(),
            total_score: self.total_score,
        }
    }
}

/// Sanitized representation of a stored submission for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionStatusView {
    pub submission_id: SubmissionId,
    pub reviewer: ReviewerId,
    pub role_label: &'static str,
    pub level_label: &'static str,
    pub decision: &'static str,
    pub risk_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub corrective_guidance: Vec<String>,
    pub total_score: i16,
}

/// Storage abstraction so the service module can be exercised in isolation.
/// Implementations must enforce uniqueness on (opening, reviewer) and report
/// a duplicate as `Conflict`.
pub trait AssessmentRepository: Send + Sync {
    fn insert_opening(&self, record: OpeningRecord) -> Result<OpeningRecord, RepositoryError>;
    fn update_opening(&self, record: OpeningRecord) -> Result<(), RepositoryError>;
    fn fetch_opening(&self, id: &OpeningId) -> Result<Option<OpeningRecord>, RepositoryError>;
    fn insert_submission(
        &self,
        record: SubmissionRecord,
    ) -> Result<SubmissionRecord, RepositoryError>;
    fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError>;
    fn submissions_for(&self, opening: &OpeningId)
        -> Result<Vec<SubmissionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (e-mail, chat, dashboards).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: AssessmentAlert) -> Result<(), AlertError>;
}

/// Templated alert payload so routes and tests can assert fan-out boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAlert {
    pub template: String,
    pub opening_id: OpeningId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
