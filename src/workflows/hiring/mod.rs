//! Role-based hiring assessment workflow: openings routed to a fixed review
//! panel, per-reviewer questionnaire scoring, and the aggregate decision
//! engine that folds the panel's verdicts into one recommendation.

pub mod aggregate;
pub mod domain;
pub(crate) mod intake;
pub mod questionnaire;
pub mod report;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{HiringRecommendation, OverallAssessment, OverallDecisionEngine, OverallRisk};
pub use domain::{
    AssessmentSubmission, Band, Decision, DeclineCategory, FundingSource, JobOpening, OpeningId,
    OpeningStatus, PanelMember, ReviewerId, ReviewerLevel, ReviewerRole, RiskLevel, SubmissionId,
    UnknownLevel,
};
pub use intake::{DecisionPayload, IntakeGuard, IntakeViolation, OpeningIntake, ScreenedResponse};
pub use questionnaire::{AnswerKind, AnswerValue, QuestionId, QuestionSpec, Rating, RatingOutOfRange};
pub use report::{AssessmentResults, LevelSection, RecommendationView};
pub use repository::{
    AlertError, AlertPublisher, AssessmentAlert, AssessmentRepository, OpeningRecord,
    RepositoryError, SubmissionRecord, SubmissionStatusView,
};
pub use router::hiring_router;
pub use scoring::{corrective_guidance, RiskScorer, ScoreComponent, ScoreOutcome};
pub use service::{AssessmentServiceError, HiringAssessmentService};
