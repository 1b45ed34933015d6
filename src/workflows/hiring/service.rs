use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::aggregate::{OverallAssessment, OverallDecisionEngine};
use super::domain::{
    AssessmentSubmission, Decision, JobOpening, OpeningId, OpeningStatus, ReviewerLevel,
    SubmissionId,
};
use super::intake::{DecisionPayload, IntakeGuard, IntakeViolation, OpeningIntake};
use super::report::{results_view, AssessmentResults};
use super::repository::{
    AlertError, AlertPublisher, AssessmentAlert, AssessmentRepository, OpeningRecord,
    RepositoryError, SubmissionRecord,
};
use super::scoring::RiskScorer;

/// Service composing the intake guard, repository, alert publisher, and the
/// two decision engines.
pub struct HiringAssessmentService<R, A> {
    guard: IntakeGuard,
    repository: Arc<R>,
    alerts: Arc<A>,
    scorer: RiskScorer,
    overall: OverallDecisionEngine,
}

static OPENING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_opening_id() -> OpeningId {
    let id = OPENING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OpeningId(format!("opening-{id:04}"))
}

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("assessment-{id:06}"))
}

impl<R, A> HiringAssessmentService<R, A>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            alerts,
            scorer: RiskScorer,
            overall: OverallDecisionEngine,
        }
    }

    /// Open a new job role and route it to the review panel.
    pub fn open(&self, intake: OpeningIntake) -> Result<OpeningRecord, AssessmentServiceError> {
        self.guard.screen_opening(&intake)?;

        let OpeningIntake {
            title,
            department,
            description,
            required_skills,
            experience_level,
            budget_range,
            urgency,
            opened_by,
            panel,
        } = intake;

        let opening = JobOpening {
            id: next_opening_id(),
            title,
            department,
            description,
            required_skills,
            experience_level,
            budget_range,
            urgency,
            opened_by,
            opened_at: Utc::now(),
        };

        let record = OpeningRecord {
            opening,
            status: OpeningStatus::Active,
            panel,
        };
        let stored = self.repository.insert_opening(record)?;

        let mut details = BTreeMap::new();
        details.insert("title".to_string(), stored.opening.title.clone());
        details.insert("panel_size".to_string(), stored.panel.len().to_string());
        self.alerts.publish(AssessmentAlert {
            template: "opening_created".to_string(),
            opening_id: stored.opening.id.clone(),
            details,
        })?;

        Ok(stored)
    }

    /// Accept one reviewer's questionnaire response, score it, and persist
    /// the outcome. A second submission for the same (opening, reviewer)
    /// pair surfaces as `RepositoryError::Conflict`, which callers should
    /// treat as "already submitted" rather than a failure.
    pub fn submit(
        &self,
        opening_id: &OpeningId,
        payload: DecisionPayload,
    ) -> Result<SubmissionRecord, AssessmentServiceError> {
        let opening = self
            .repository
            .fetch_opening(opening_id)?
            .ok_or(RepositoryError::NotFound)?;

        let member = opening
            .panel
            .iter()
            .find(|member| member.reviewer == payload.reviewer)
            .cloned()
            .ok_or_else(|| IntakeViolation::NotOnPanel(payload.reviewer.clone()))?;

        let screened = self.guard.screen_submission(&member, payload)?;
        let outcome = self.scorer.score(
            member.role.level(),
            &screened.answers,
            screened.decision,
            screened.declared_category,
        );

        let record = SubmissionRecord {
            id: next_submission_id(),
            opening_id: opening_id.clone(),
            submitted_at: Utc::now(),
            submission: AssessmentSubmission {
                reviewer: member.clone(),
                decision: screened.decision,
                decline_reason: screened.decline_reason,
                decline_category: outcome.decline_category,
                risk_level: outcome.risk_level,
                answers: screened.answers,
            },
            total_score: outcome.total_score,
            components: outcome.components,
            corrective_guidance: outcome
                .guidance
                .map(|steps| steps.iter().map(|step| step.to_string()).collect())
                .unwrap_or_default(),
        };

        let stored = self.repository.insert_submission(record)?;

        if stored.submission.decision == Decision::Decline
            && member.role.level() != ReviewerLevel::Strategic
        {
            let mut details = BTreeMap::new();
            details.insert("reviewer".to_string(), member.reviewer.0.clone());
            details.insert("role".to_string(), member.role.label().to_string());
            if let Some(category) = stored.submission.decline_category {
                details.insert("category".to_string(), category.key().to_string());
            }
            self.alerts.publish(AssessmentAlert {
                template: "reviewer_declined".to_string(),
                opening_id: opening_id.clone(),
                details,
            })?;
        }

        self.finalize_if_complete(opening)?;

        Ok(stored)
    }

    /// Recompute the aggregate verdict and render the results view. Nothing
    /// is persisted; the outcome shifts as further submissions arrive.
    pub fn results(
        &self,
        opening_id: &OpeningId,
    ) -> Result<AssessmentResults, AssessmentServiceError> {
        let opening = self
            .repository
            .fetch_opening(opening_id)?
            .ok_or(RepositoryError::NotFound)?;
        let records = self.repository.submissions_for(opening_id)?;

        let assessment = self.assess(&records);
        Ok(results_view(&opening, &records, &assessment))
    }

    /// Fetch one stored submission.
    pub fn get_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<SubmissionRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch_submission(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn assess(&self, records: &[SubmissionRecord]) -> OverallAssessment {
        let submissions: Vec<AssessmentSubmission> = records
            .iter()
            .map(|record| record.submission.clone())
            .collect();
        self.overall.assess(&submissions)
    }

    fn finalize_if_complete(&self, opening: OpeningRecord) -> Result<(), AssessmentServiceError> {
        if opening.status == OpeningStatus::Completed {
            return Ok(());
        }

        let submissions = self.repository.submissions_for(&opening.opening.id)?;
        if submissions.len() < opening.panel.len() {
            return Ok(());
        }

        let opening_id = opening.opening.id.clone();
        let mut completed = opening;
        completed.status = OpeningStatus::Completed;
        self.repository.update_opening(completed)?;

        let mut details = BTreeMap::new();
        details.insert("submissions".to_string(), submissions.len().to_string());
        self.alerts.publish(AssessmentAlert {
            template: "assessments_completed".to_string(),
            opening_id,
            details,
        })?;

        Ok(())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
