use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::hiring::domain::{
    AssessmentSubmission, Band, Decision, DeclineCategory, OpeningId, PanelMember, ReviewerId,
    ReviewerRole, RiskLevel, SubmissionId,
};
use crate::workflows::hiring::intake::{DecisionPayload, OpeningIntake};
use crate::workflows::hiring::questionnaire::{AnswerValue, QuestionId, Rating};
use crate::workflows::hiring::repository::{
    AlertError, AlertPublisher, AssessmentAlert, AssessmentRepository, OpeningRecord,
    RepositoryError, SubmissionRecord,
};
use crate::workflows::hiring::router::hiring_router;
use crate::workflows::hiring::service::HiringAssessmentService;

pub(super) fn member(name: &str, role: ReviewerRole) -> PanelMember {
    PanelMember {
        reviewer: ReviewerId(name.to_string()),
        role,
    }
}

pub(super) fn standard_panel() -> Vec<PanelMember> {
    vec![
        member("avery", ReviewerRole::Founder),
        member("blair", ReviewerRole::CoFounder),
        member("casey", ReviewerRole::Cfo),
        member("drew", ReviewerRole::Cto),
        member("finley", ReviewerRole::HrManager),
    ]
}

pub(super) fn opening_intake() -> OpeningIntake {
    OpeningIntake {
        title: "Platform Engineer".to_string(),
        department: "Engineering".to_string(),
        description: "Own deployment tooling and observability.".to_string(),
        required_skills: "Rust, Kubernetes, CI/CD".to_string(),
        experience_level: "Mid-Senior".to_string(),
        budget_range: "$120k-$150k".to_string(),
        urgency: Band::Medium,
        opened_by: member("avery", ReviewerRole::Founder),
        panel: standard_panel(),
    }
}

pub(super) fn rating(value: u8) -> AnswerValue {
    AnswerValue::Rating(Rating::new(value).expect("test rating in range"))
}

pub(super) fn approve_payload(
    reviewer: &str,
    answers: BTreeMap<QuestionId, AnswerValue>,
) -> DecisionPayload {
    DecisionPayload {
        reviewer: ReviewerId(reviewer.to_string()),
        decision: Decision::Approve,
        decline_reason: None,
        decline_category: None,
        answers,
    }
}

pub(super) fn decline_payload(
    reviewer: &str,
    answers: BTreeMap<QuestionId, AnswerValue>,
    category: Option<DeclineCategory>,
) -> DecisionPayload {
    DecisionPayload {
        reviewer: ReviewerId(reviewer.to_string()),
        decision: Decision::Decline,
        decline_reason: Some("Concerns raised during review".to_string()),
        decline_category: category,
        answers,
    }
}

/// Bare scored submission for aggregate-engine tests.
pub(super) fn scored_submission(
    name: &str,
    role: ReviewerRole,
    decision: Decision,
    risk_level: RiskLevel,
    decline_category: Option<DeclineCategory>,
) -> AssessmentSubmission {
    AssessmentSubmission {
        reviewer: member(name, role),
        decision,
        decline_reason: None,
        decline_category,
        risk_level,
        answers: BTreeMap::new(),
    }
}

pub(super) fn build_service() -> (
    HiringAssessmentService<MemoryRepository, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = HiringAssessmentService::new(repository.clone(), alerts.clone());
    (service, repository, alerts)
}

pub(super) fn router_with_service(
    service: HiringAssessmentService<MemoryRepository, MemoryAlerts>,
) -> axum::Router {
    hiring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    openings: Arc<Mutex<HashMap<OpeningId, OpeningRecord>>>,
    submissions: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert_opening(&self, record: OpeningRecord) -> Result<OpeningRecord, RepositoryError> {
        let mut guard = self.openings.lock().expect("opening mutex poisoned");
        if guard.contains_key(&record.opening.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.opening.id.clone(), record.clone());
        Ok(record)
    }

    fn update_opening(&self, record: OpeningRecord) -> Result<(), RepositoryError> {
        let mut guard = self.openings.lock().expect("opening mutex poisoned");
        if guard.contains_key(&record.opening.id) {
            guard.insert(record.opening.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_opening(&self, id: &OpeningId) -> Result<Option<OpeningRecord>, RepositoryError> {
        let guard = self.openings.lock().expect("opening mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_submission(
        &self,
        record: SubmissionRecord,
    ) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.opening_id == record.opening_id
                && existing.submission.reviewer.reviewer == record.submission.reviewer.reviewer
        });
        if duplicate || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn submissions_for(
        &self,
        opening: &OpeningId,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        let mut records: Vec<SubmissionRecord> = guard
            .values()
            .filter(|record| &record.opening_id == opening)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<AssessmentAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<AssessmentAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: AssessmentAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}
