use std::collections::BTreeMap;

use super::ScoreComponent;
use crate::workflows::hiring::domain::{Band, DeclineCategory, ReviewerLevel};
use crate::workflows::hiring::questionnaire::{AnswerValue, QuestionId};

/// Condition a rule checks against one answer. A missing answer or an answer
/// of the wrong type never matches; absence is "no contribution", not the
/// lowest value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RulePredicate {
    FlagIs(bool),
    RatingAtLeast(u8),
    RatingAtMost(u8),
    BandIs(Band),
}

impl RulePredicate {
    fn matches(&self, answer: &AnswerValue) -> bool {
        match (self, answer) {
            (Self::FlagIs(expected), AnswerValue::Flag(value)) => value == expected,
            (Self::RatingAtLeast(min), AnswerValue::Rating(rating)) => rating.get() >= *min,
            (Self::RatingAtMost(max), AnswerValue::Rating(rating)) => rating.get() <= *max,
            (Self::BandIs(expected), AnswerValue::Band(value)) => value == expected,
            _ => false,
        }
    }
}

/// One weighted rule in a level's policy table. Rules run in declaration
/// order, and a later rule's category suggestion overwrites an earlier one.
/// Order therefore encodes priority; do not reorder entries casually.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeightedRule {
    pub question: QuestionId,
    pub predicate: RulePredicate,
    pub delta: i8,
    pub suggests: Option<DeclineCategory>,
    pub note: &'static str,
}

const STRATEGIC_RULES: &[WeightedRule] = &[
    WeightedRule {
        question: QuestionId::BudgetApproval,
        predicate: RulePredicate::FlagIs(false),
        delta: 3,
        suggests: Some(DeclineCategory::BudgetConstraint),
        note: "budget not approved",
    },
    WeightedRule {
        question: QuestionId::FinancialRisk,
        predicate: RulePredicate::RatingAtLeast(4),
        delta: 2,
        suggests: None,
        note: "high financial risk",
    },
    WeightedRule {
        question: QuestionId::StrategicPriority,
        predicate: RulePredicate::BandIs(Band::Low),
        delta: 1,
        suggests: Some(DeclineCategory::BusinessMisalignment),
        note: "low strategic priority",
    },
    WeightedRule {
        question: QuestionId::StrategicPriority,
        predicate: RulePredicate::BandIs(Band::High),
        delta: -1,
        suggests: None,
        note: "high strategic priority",
    },
    WeightedRule {
        question: QuestionId::BusinessAlignment,
        predicate: RulePredicate::RatingAtMost(2),
        delta: 2,
        suggests: None,
        note: "poor business alignment",
    },
    WeightedRule {
        question: QuestionId::LongTermImpact,
        predicate: RulePredicate::RatingAtMost(2),
        delta: 1,
        suggests: None,
        note: "limited long-term impact",
    },
];

const EXECUTION_RULES: &[WeightedRule] = &[
    WeightedRule {
        question: QuestionId::SkillAvailability,
        predicate: RulePredicate::BandIs(Band::Low),
        delta: 2,
        suggests: Some(DeclineCategory::SkillUnavailability),
        note: "low skill availability",
    },
    WeightedRule {
        question: QuestionId::SkillAvailability,
        predicate: RulePredicate::BandIs(Band::Medium),
        delta: 1,
        suggests: None,
        note: "medium skill availability",
    },
    WeightedRule {
        question: QuestionId::TimelineRisk,
        predicate: RulePredicate::BandIs(Band::High),
        delta: 2,
        suggests: Some(DeclineCategory::TimelineRisk),
        note: "high timeline risk",
    },
    WeightedRule {
        question: QuestionId::TimelineRisk,
        predicate: RulePredicate::BandIs(Band::Medium),
        delta: 1,
        suggests: None,
        note: "medium timeline risk",
    },
    WeightedRule {
        question: QuestionId::MentorAvailable,
        predicate: RulePredicate::FlagIs(false),
        delta: 1,
        suggests: None,
        note: "no mentor available",
    },
    WeightedRule {
        question: QuestionId::TeamDependency,
        predicate: RulePredicate::RatingAtLeast(4),
        delta: 1,
        suggests: Some(DeclineCategory::TeamDependency),
        note: "high team dependency",
    },
    WeightedRule {
        question: QuestionId::ExecutionFeasibility,
        predicate: RulePredicate::RatingAtMost(2),
        delta: 1,
        suggests: None,
        note: "low execution feasibility",
    },
];

const SUPPORT_RULES: &[WeightedRule] = &[
    WeightedRule {
        question: QuestionId::TalentAvailability,
        predicate: RulePredicate::BandIs(Band::Low),
        delta: 2,
        suggests: Some(DeclineCategory::SkillUnavailability),
        note: "low talent availability",
    },
    WeightedRule {
        question: QuestionId::TalentAvailability,
        predicate: RulePredicate::BandIs(Band::Medium),
        delta: 1,
        suggests: None,
        note: "medium talent availability",
    },
    WeightedRule {
        question: QuestionId::CostValidation,
        predicate: RulePredicate::FlagIs(false),
        delta: 2,
        suggests: Some(DeclineCategory::BudgetConstraint),
        note: "cost not validated",
    },
    WeightedRule {
        question: QuestionId::MarketCompetition,
        predicate: RulePredicate::BandIs(Band::High),
        delta: 1,
        suggests: None,
        note: "high market competition",
    },
    WeightedRule {
        question: QuestionId::ProcessReadiness,
        predicate: RulePredicate::RatingAtMost(2),
        delta: 1,
        suggests: Some(DeclineCategory::OperationalGap),
        note: "low process readiness",
    },
    WeightedRule {
        question: QuestionId::OnboardingCapacity,
        predicate: RulePredicate::FlagIs(false),
        delta: 1,
        suggests: None,
        note: "no onboarding capacity",
    },
];

pub(crate) const fn rules_for(level: ReviewerLevel) -> &'static [WeightedRule] {
    match level {
        ReviewerLevel::Strategic => STRATEGIC_RULES,
        ReviewerLevel::Execution => EXECUTION_RULES,
        ReviewerLevel::Support => SUPPORT_RULES,
    }
}

/// Run a rule table over a sparse answer set, accumulating the total score,
/// the last category suggestion, and an auditable component per matched rule.
pub(crate) fn run_rules(
    rules: &[WeightedRule],
    answers: &BTreeMap<QuestionId, AnswerValue>,
) -> (i16, Option<DeclineCategory>, Vec<ScoreComponent>) {
    let mut total: i16 = 0;
    let mut suggested = None;
    let mut components = Vec::new();

    for rule in rules {
        let Some(answer) = answers.get(&rule.question) else {
            continue;
        };
        if !rule.predicate.matches(answer) {
            continue;
        }

        total += rule.delta as i16;
        if let Some(category) = rule.suggests {
            suggested = Some(category);
        }
        components.push(ScoreComponent {
            question: rule.question,
            delta: rule.delta,
            note: rule.note.to_string(),
        });
    }

    (total, suggested, components)
}
