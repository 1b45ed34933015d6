use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    Band, Decision, DeclineCategory, PanelMember, ReviewerId, ReviewerRole,
};
use super::questionnaire::{spec_for, AnswerKind, AnswerValue, QuestionId};

/// Validation errors raised before anything reaches the scorer.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("role {0:?} may not open job roles")]
    UnauthorizedOpener(ReviewerRole),
    #[error("review panel must contain at least one member")]
    EmptyPanel,
    #[error("reviewer {0} appears on the panel more than once")]
    DuplicatePanelMember(ReviewerId),
    #[error("reviewer {0} is not on the panel for this opening")]
    NotOnPanel(ReviewerId),
    #[error("answer for {question:?} must be a {kind}", question = .question, kind = .expected.label())]
    AnswerTypeMismatch {
        question: QuestionId,
        expected: AnswerKind,
    },
}

/// Request payload proposing a new job opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningIntake {
    pub title: String,
    pub department: String,
    pub description: String,
    pub required_skills: String,
    pub experience_level: String,
    pub budget_range: String,
    pub urgency: Band,
    pub opened_by: PanelMember,
    pub panel: Vec<PanelMember>,
}

/// Request payload carrying one reviewer's questionnaire response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPayload {
    pub reviewer: ReviewerId,
    pub decision: Decision,
    #[serde(default)]
    pub decline_reason: Option<String>,
    #[serde(default)]
    pub decline_category: Option<DeclineCategory>,
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, AnswerValue>,
}

/// A payload that survived screening: answers narrowed to the reviewer's own
/// questionnaire, decline metadata normalized.
#[derive(Debug, Clone)]
pub struct ScreenedResponse {
    pub decision: Decision,
    pub decline_reason: Option<String>,
    pub declared_category: Option<DeclineCategory>,
    pub answers: BTreeMap<QuestionId, AnswerValue>,
}

/// Guard screening inbound intake against the questionnaire schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Validate a proposed opening before it is stored.
    pub fn screen_opening(&self, intake: &OpeningIntake) -> Result<(), IntakeViolation> {
        if !intake.opened_by.role.can_open_roles() {
            return Err(IntakeViolation::UnauthorizedOpener(intake.opened_by.role));
        }

        if intake.panel.is_empty() {
            return Err(IntakeViolation::EmptyPanel);
        }

        for (index, member) in intake.panel.iter().enumerate() {
            if intake.panel[..index]
                .iter()
                .any(|other| other.reviewer == member.reviewer)
            {
                return Err(IntakeViolation::DuplicatePanelMember(member.reviewer.clone()));
            }
        }

        Ok(())
    }

    /// Screen one reviewer's response.
    ///
    /// Answers for questions outside the member's questionnaire are dropped
    /// silently; an answer of the wrong type for a question the member does
    /// own is rejected. Decline metadata on an approval is cleared rather
    /// than refused.
    pub fn screen_submission(
        &self,
        member: &PanelMember,
        payload: DecisionPayload,
    ) -> Result<ScreenedResponse, IntakeViolation> {
        let mut answers = BTreeMap::new();
        for (question, answer) in payload.answers {
            let Some(spec) = spec_for(member.role, question) else {
                continue;
            };
            if answer.kind() != spec.kind {
                return Err(IntakeViolation::AnswerTypeMismatch {
                    question,
                    expected: spec.kind,
                });
            }
            answers.insert(question, answer);
        }

        let (decline_reason, declared_category) = match payload.decision {
            Decision::Approve => (None, None),
            Decision::Decline => {
                let reason = payload
                    .decline_reason
                    .map(|reason| reason.trim().to_string())
                    .filter(|reason| !reason.is_empty());
                (reason, payload.decline_category)
            }
        };

        Ok(ScreenedResponse {
            decision: payload.decision,
            decline_reason,
            declared_category,
            answers,
        })
    }
}
