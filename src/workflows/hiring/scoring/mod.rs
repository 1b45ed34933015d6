mod guidance;
mod rules;

pub use guidance::corrective_guidance;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Decision, DeclineCategory, ReviewerLevel, RiskLevel};
use super::questionnaire::{AnswerValue, QuestionId};

/// Stateless scorer applying the fixed per-level weighted rule tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskScorer;

impl RiskScorer {
    /// Score one reviewer's answers.
    ///
    /// Answers belonging to other levels are simply never consulted, so a
    /// caller passing a wider map gets identical results. When the reviewer
    /// declines, their explicitly declared category wins over the
    /// rule-suggested one, and corrective guidance is resolved for whichever
    /// applies. Approvals never carry a category or guidance.
    pub fn score(
        &self,
        level: ReviewerLevel,
        answers: &BTreeMap<QuestionId, AnswerValue>,
        decision: Decision,
        declared_category: Option<DeclineCategory>,
    ) -> ScoreOutcome {
        let (total_score, suggested, components) = rules::run_rules(rules::rules_for(level), answers);
        let risk_level = RiskLevel::from_score(total_score);

        let (decline_category, guidance) = match decision {
            Decision::Approve => (None, None),
            Decision::Decline => {
                let category = declared_category.or(suggested);
                (category, Some(guidance::corrective_guidance(category)))
            }
        };

        ScoreOutcome {
            risk_level,
            total_score,
            decline_category,
            guidance,
            components,
        }
    }
}

/// Discrete contribution of one matched rule, kept for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub question: QuestionId,
    pub delta: i8,
    pub note: String,
}

/// Result of scoring a single submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub risk_level: RiskLevel,
    pub total_score: i16,
    pub decline_category: Option<DeclineCategory>,
    pub guidance: Option<&'static [&'static str]>,
    pub components: Vec<ScoreComponent>,
}
