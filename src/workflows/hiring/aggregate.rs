use serde::Serialize;

use super::domain::{AssessmentSubmission, Decision, RiskLevel};

/// Organization-wide risk for one job opening. `Unknown` is reserved for an
/// opening nobody has assessed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallRisk {
    Unknown,
    Low,
    Medium,
    High,
}

impl OverallRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Final hiring recommendation surfaced to strategic stakeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiringRecommendation {
    pub decision: &'static str,
    pub risk: OverallRisk,
    pub conditions: String,
}

/// Combined output of one aggregate pass over an opening's submissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallAssessment {
    pub overall_risk: OverallRisk,
    pub recommendation: HiringRecommendation,
}

/// Folds every submission for one opening into an organization-wide verdict.
///
/// A pure function of the submission set: safe on partial panels, safe to
/// re-run as further submissions arrive, and free of hidden state.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverallDecisionEngine;

impl OverallDecisionEngine {
    pub fn assess(&self, submissions: &[AssessmentSubmission]) -> OverallAssessment {
        let overall_risk = Self::overall_risk(submissions);
        let recommendation = Self::recommendation(overall_risk, submissions);

        OverallAssessment {
            overall_risk,
            recommendation,
        }
    }

    /// Escalation rules in strict priority order; the first match decides.
    fn overall_risk(submissions: &[AssessmentSubmission]) -> OverallRisk {
        if submissions.is_empty() {
            return OverallRisk::Unknown;
        }

        // Executive-tier reviewers (founder, co-founder, CEO, CFO) escalate
        // directly; this tier is wider than the Strategic questionnaire level.
        if submissions
            .iter()
            .any(|s| s.reviewer.role.in_executive_tier() && s.risk_level == RiskLevel::High)
        {
            return OverallRisk::High;
        }

        let declines = submissions
            .iter()
            .filter(|s| s.decision == Decision::Decline)
            .count();
        if declines * 2 >= submissions.len() {
            return OverallRisk::High;
        }

        if submissions.iter().any(|s| s.risk_level >= RiskLevel::Medium) {
            return OverallRisk::Medium;
        }

        OverallRisk::Low
    }

    fn recommendation(
        overall_risk: OverallRisk,
        submissions: &[AssessmentSubmission],
    ) -> HiringRecommendation {
        match overall_risk {
            OverallRisk::Low => HiringRecommendation {
                decision: "Proceed with hiring",
                risk: overall_risk,
                conditions: "No special conditions required".to_string(),
            },
            OverallRisk::Medium => HiringRecommendation {
                decision: "Proceed with conditions",
                risk: overall_risk,
                conditions: "Address medium risk areas before proceeding".to_string(),
            },
            OverallRisk::High | OverallRisk::Unknown => HiringRecommendation {
                decision: "Delay or cancel hiring",
                risk: overall_risk,
                conditions: format!(
                    "Address critical issues: {}",
                    Self::decline_categories(submissions).join(", ")
                ),
            },
        }
    }

    /// Distinct decline categories among declined submissions, first-seen
    /// order. Declines without a category contribute nothing.
    fn decline_categories(submissions: &[AssessmentSubmission]) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for submission in submissions {
            if submission.decision != Decision::Decline {
                continue;
            }
            let Some(category) = submission.decline_category else {
                continue;
            };
            let key = category.key();
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen
    }
}
