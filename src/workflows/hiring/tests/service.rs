use std::collections::BTreeMap;

use super::common::*;
use crate::workflows::hiring::domain::{
    Band, DeclineCategory, OpeningId, OpeningStatus, ReviewerId, RiskLevel,
};
use crate::workflows::hiring::intake::IntakeViolation;
use crate::workflows::hiring::questionnaire::{AnswerValue, QuestionId};
use crate::workflows::hiring::repository::{AssessmentRepository, RepositoryError};
use crate::workflows::hiring::service::AssessmentServiceError;

#[test]
fn opening_is_stored_active_and_announced() {
    let (service, _, alerts) = build_service();

    let record = service.open(opening_intake()).expect("opening stored");

    assert_eq!(record.status, OpeningStatus::Active);
    assert_eq!(record.panel.len(), 5);

    let events = alerts.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "opening_created");
    assert_eq!(events[0].details.get("panel_size").map(String::as_str), Some("5"));
}

#[test]
fn submission_is_scored_and_persisted_once() {
    let (service, _, _) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    let answers = BTreeMap::from([(QuestionId::BudgetApproval, AnswerValue::Flag(false))]);
    let record = service
        .submit(&opening.opening.id, decline_payload("avery", answers.clone(), None))
        .expect("submission stored");

    assert_eq!(record.submission.risk_level, RiskLevel::High);
    assert_eq!(
        record.submission.decline_category,
        Some(DeclineCategory::BudgetConstraint)
    );
    assert_eq!(record.total_score, 3);
    assert!(!record.corrective_guidance.is_empty());

    let duplicate = service.submit(&opening.opening.id, decline_payload("avery", answers, None));
    assert!(matches!(
        duplicate,
        Err(AssessmentServiceError::Repository(RepositoryError::Conflict))
    ));
}

#[test]
fn submissions_from_outside_the_panel_are_refused() {
    let (service, _, _) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    let result = service.submit(
        &opening.opening.id,
        approve_payload("stranger", BTreeMap::new()),
    );

    match result {
        Err(AssessmentServiceError::Intake(IntakeViolation::NotOnPanel(reviewer))) => {
            assert_eq!(reviewer, ReviewerId("stranger".to_string()));
        }
        other => panic!("expected not-on-panel violation, got {other:?}"),
    }
}

#[test]
fn unknown_opening_is_not_found() {
    let (service, _, _) = build_service();

    let result = service.submit(
        &OpeningId("missing".to_string()),
        approve_payload("avery", BTreeMap::new()),
    );

    assert!(matches!(
        result,
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn non_strategic_declines_raise_an_alert() {
    let (service, _, alerts) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    let answers = BTreeMap::from([(QuestionId::TimelineRisk, AnswerValue::Band(Band::High))]);
    service
        .submit(&opening.opening.id, decline_payload("drew", answers, None))
        .expect("submission stored");

    let events = alerts.events();
    let decline = events
        .iter()
        .find(|event| event.template == "reviewer_declined")
        .expect("decline alert published");
    assert_eq!(decline.details.get("reviewer").map(String::as_str), Some("drew"));
    assert_eq!(
        decline.details.get("category").map(String::as_str),
        Some("timeline_risk")
    );
}

#[test]
fn strategic_declines_stay_quiet() {
    let (service, _, alerts) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    service
        .submit(
            &opening.opening.id,
            decline_payload("avery", BTreeMap::new(), Some(DeclineCategory::BudgetConstraint)),
        )
        .expect("submission stored");

    assert!(alerts
        .events()
        .iter()
        .all(|event| event.template != "reviewer_declined"));
}

#[test]
fn full_panel_completes_the_opening() {
    let (service, repository, alerts) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    for name in ["avery", "blair", "casey", "drew", "finley"] {
        service
            .submit(&opening.opening.id, approve_payload(name, BTreeMap::new()))
            .expect("submission stored");
    }

    let stored = repository
        .fetch_opening(&opening.opening.id)
        .expect("repository reachable")
        .expect("opening present");
    assert_eq!(stored.status, OpeningStatus::Completed);

    assert!(alerts
        .events()
        .iter()
        .any(|event| event.template == "assessments_completed"));
}

#[test]
fn results_group_by_level_and_track_progress() {
    let (service, _, _) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    service
        .submit(&opening.opening.id, approve_payload("avery", BTreeMap::new()))
        .expect("submission stored");
    service
        .submit(
            &opening.opening.id,
            approve_payload(
                "drew",
                BTreeMap::from([(QuestionId::SkillAvailability, AnswerValue::Band(Band::Medium))]),
            ),
        )
        .expect("submission stored");

    let results = service.results(&opening.opening.id).expect("results build");

    assert_eq!(results.progress_percent, 40.0);
    assert_eq!(results.sections.len(), 3);

    let strategic = &results.sections[0];
    assert_eq!(strategic.submissions.len(), 1);
    assert_eq!(strategic.submissions[0].reviewer.0, "avery");

    let execution = &results.sections[1];
    assert_eq!(execution.submissions.len(), 1);
    assert_eq!(execution.submissions[0].risk_level, "medium");

    assert_eq!(results.recommendation.decision, "Proceed with conditions");
}

#[test]
fn results_for_an_unassessed_opening_are_unknown() {
    let (service, _, _) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    let results = service.results(&opening.opening.id).expect("results build");

    assert_eq!(results.overall_risk.label(), "unknown");
    assert_eq!(results.progress_percent, 0.0);
}

#[test]
fn stored_submissions_are_retrievable_by_id() {
    let (service, _, _) = build_service();
    let opening = service.open(opening_intake()).expect("opening stored");

    let record = service
        .submit(&opening.opening.id, approve_payload("avery", BTreeMap::new()))
        .expect("submission stored");

    let fetched = service.get_submission(&record.id).expect("submission found");
    assert_eq!(fetched.id, record.id);
    assert_eq!(fetched.submission.reviewer.reviewer.0, "avery");
}
