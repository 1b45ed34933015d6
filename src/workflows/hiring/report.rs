use serde::Serialize;

use super::aggregate::{OverallAssessment, OverallRisk};
use super::domain::{OpeningId, ReviewerLevel};
use super::repository::{OpeningRecord, SubmissionRecord, SubmissionStatusView};

/// On-demand results view for one job opening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResults {
    pub opening_id: OpeningId,
    pub title: String,
    pub status: &'static str,
    pub progress_percent: f32,
    pub sections: Vec<LevelSection>,
    pub overall_risk: OverallRisk,
    pub recommendation: RecommendationView,
}

/// Submissions grouped under one questionnaire level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSection {
    pub level: ReviewerLevel,
    pub level_label: &'static str,
    pub submissions: Vec<SubmissionStatusView>,
}

/// Recommendation as surfaced to the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub decision: &'static str,
    pub risk: &'static str,
    pub conditions: String,
}

pub(crate) fn results_view(
    opening: &OpeningRecord,
    records: &[SubmissionRecord],
    assessment: &OverallAssessment,
) -> AssessmentResults {
    let sections = ReviewerLevel::ordered()
        .into_iter()
        .map(|level| LevelSection {
            level,
            level_label: level.label(),
            submissions: records
                .iter()
                .filter(|record| record.submission.reviewer.role.level() == level)
                .map(SubmissionRecord::status_view)
                .collect(),
        })
        .collect();

    AssessmentResults {
        opening_id: opening.opening.id.clone(),
        title: opening.opening.title.clone(),
        status: opening.status.label(),
        progress_percent: opening.progress_percent(records.len()),
        sections,
        overall_risk: assessment.overall_risk,
        recommendation: RecommendationView {
            decision: assessment.recommendation.decision,
            risk: assessment.recommendation.risk.label(),
            conditions: assessment.recommendation.conditions.clone(),
        },
    }
}
