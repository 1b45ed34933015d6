use std::collections::BTreeMap;

use super::common::{member, opening_intake, rating};
use crate::workflows::hiring::domain::{
    Band, Decision, DeclineCategory, ReviewerLevel, ReviewerRole,
};
use crate::workflows::hiring::intake::{DecisionPayload, IntakeGuard, IntakeViolation};
use crate::workflows::hiring::questionnaire::{AnswerValue, QuestionId};

#[test]
fn role_to_level_table_is_fixed() {
    use ReviewerLevel::*;
    use ReviewerRole::*;

    let expectations = [
        (Founder, Strategic),
        (CoFounder, Strategic),
        (Ceo, Execution),
        (Cfo, Execution),
        (Cto, Execution),
        (Coo, Execution),
        (ProjectHead, Execution),
        (HrManager, Support),
        (Recruiter, Support),
        (HrExecutive, Support),
    ];

    for (role, level) in expectations {
        assert_eq!(role.level(), level, "{role:?}");
    }
}

#[test]
fn executive_tier_is_wider_than_the_strategic_level() {
    assert!(ReviewerRole::Founder.in_executive_tier());
    assert!(ReviewerRole::CoFounder.in_executive_tier());
    assert!(ReviewerRole::Ceo.in_executive_tier());
    assert!(ReviewerRole::Cfo.in_executive_tier());
    assert!(!ReviewerRole::Cto.in_executive_tier());
    assert!(!ReviewerRole::HrManager.in_executive_tier());

    // CEO and CFO escalate aggregates but answer the Execution questionnaire.
    assert_eq!(ReviewerRole::Ceo.level(), ReviewerLevel::Execution);
    assert_eq!(ReviewerRole::Cfo.level(), ReviewerLevel::Execution);
}

#[test]
fn level_indexes_round_trip_and_reject_unknown_values() {
    for level in ReviewerLevel::ordered() {
        let rebuilt = ReviewerLevel::from_index(level.index()).expect("known index");
        assert_eq!(rebuilt, level);
    }

    assert!(ReviewerLevel::from_index(0).is_err());
    assert!(ReviewerLevel::from_index(4).is_err());
}

#[test]
fn only_founders_open_job_roles() {
    let mut intake = opening_intake();
    intake.opened_by = member("casey", ReviewerRole::Cfo);

    let result = IntakeGuard.screen_opening(&intake);

    assert!(matches!(
        result,
        Err(IntakeViolation::UnauthorizedOpener(ReviewerRole::Cfo))
    ));
}

#[test]
fn panel_must_not_be_empty() {
    let mut intake = opening_intake();
    intake.panel.clear();

    let result = IntakeGuard.screen_opening(&intake);

    assert!(matches!(result, Err(IntakeViolation::EmptyPanel)));
}

#[test]
fn duplicate_panel_members_are_rejected() {
    let mut intake = opening_intake();
    intake.panel.push(member("avery", ReviewerRole::Founder));

    let result = IntakeGuard.screen_opening(&intake);

    match result {
        Err(IntakeViolation::DuplicatePanelMember(reviewer)) => {
            assert_eq!(reviewer.0, "avery");
        }
        other => panic!("expected duplicate panel member, got {other:?}"),
    }
}

#[test]
fn well_formed_opening_passes() {
    IntakeGuard
        .screen_opening(&opening_intake())
        .expect("valid opening intake");
}

#[test]
fn answers_for_other_levels_are_dropped_silently() {
    let cto = member("drew", ReviewerRole::Cto);
    let payload = DecisionPayload {
        reviewer: cto.reviewer.clone(),
        decision: Decision::Approve,
        decline_reason: None,
        decline_category: None,
        answers: BTreeMap::from([
            (QuestionId::BudgetApproval, AnswerValue::Flag(true)),
            (QuestionId::SkillAvailability, AnswerValue::Band(Band::High)),
        ]),
    };

    let screened = IntakeGuard
        .screen_submission(&cto, payload)
        .expect("payload screens");

    assert!(!screened.answers.contains_key(&QuestionId::BudgetApproval));
    assert!(screened.answers.contains_key(&QuestionId::SkillAvailability));
}

#[test]
fn mistyped_answer_for_an_owned_question_is_rejected() {
    let founder = member("avery", ReviewerRole::Founder);
    let payload = DecisionPayload {
        reviewer: founder.reviewer.clone(),
        decision: Decision::Approve,
        decline_reason: None,
        decline_category: None,
        answers: BTreeMap::from([(QuestionId::BudgetApproval, rating(3))]),
    };

    let result = IntakeGuard.screen_submission(&founder, payload);

    assert!(matches!(
        result,
        Err(IntakeViolation::AnswerTypeMismatch {
            question: QuestionId::BudgetApproval,
            ..
        })
    ));
}

#[test]
fn approvals_have_decline_metadata_cleared() {
    let founder = member("avery", ReviewerRole::Founder);
    let payload = DecisionPayload {
        reviewer: founder.reviewer.clone(),
        decision: Decision::Approve,
        decline_reason: Some("should vanish".to_string()),
        decline_category: Some(DeclineCategory::TimelineRisk),
        answers: BTreeMap::new(),
    };

    let screened = IntakeGuard
        .screen_submission(&founder, payload)
        .expect("payload screens");

    assert_eq!(screened.decline_reason, None);
    assert_eq!(screened.declared_category, None);
}

#[test]
fn blank_decline_reasons_are_normalized_away() {
    let founder = member("avery", ReviewerRole::Founder);
    let payload = DecisionPayload {
        reviewer: founder.reviewer.clone(),
        decision: Decision::Decline,
        decline_reason: Some("   ".to_string()),
        decline_category: None,
        answers: BTreeMap::new(),
    };

    let screened = IntakeGuard
        .screen_submission(&founder, payload)
        .expect("payload screens");

    assert_eq!(screened.decline_reason, None);
}

#[test]
fn cfo_supplemental_answers_survive_screening() {
    let cfo = member("casey", ReviewerRole::Cfo);
    let payload = DecisionPayload {
        reviewer: cfo.reviewer.clone(),
        decision: Decision::Approve,
        decline_reason: None,
        decline_category: None,
        answers: BTreeMap::from([
            (QuestionId::RoiProjection, rating(4)),
            (QuestionId::SkillAvailability, AnswerValue::Band(Band::Medium)),
        ]),
    };

    let screened = IntakeGuard
        .screen_submission(&cfo, payload)
        .expect("payload screens");

    assert!(screened.answers.contains_key(&QuestionId::RoiProjection));

    // The same supplemental answer from a non-CFO is dropped, not rejected.
    let ceo = member("chloe", ReviewerRole::Ceo);
    let payload = DecisionPayload {
        reviewer: ceo.reviewer.clone(),
        decision: Decision::Approve,
        decline_reason: None,
        decline_category: None,
        answers: BTreeMap::from([(QuestionId::RoiProjection, rating(4))]),
    };
    let screened = IntakeGuard
        .screen_submission(&ceo, payload)
        .expect("payload screens");
    assert!(screened.answers.is_empty());
}

#[test]
fn every_level_declares_a_five_question_schema() {
    for level in ReviewerLevel::ordered() {
        assert_eq!(level.questionnaire().len(), 5, "{level:?}");
    }
    assert_eq!(ReviewerRole::Cfo.supplemental_questions().len(), 4);
    assert!(ReviewerRole::Ceo.supplemental_questions().is_empty());
}
