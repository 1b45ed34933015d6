use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::questionnaire::{AnswerValue, QuestionId};

/// Identifier wrapper for job openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpeningId(pub String);

/// Identifier wrapper for stored assessment submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Identifier for a reviewer on an assessment panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewerId(pub String);

impl std::fmt::Display for ReviewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organizational roles that take part in hiring assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Founder,
    CoFounder,
    Ceo,
    Cfo,
    Cto,
    Coo,
    ProjectHead,
    HrManager,
    Recruiter,
    HrExecutive,
}

impl ReviewerRole {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Founder,
            Self::CoFounder,
            Self::Ceo,
            Self::Cfo,
            Self::Cto,
            Self::Coo,
            Self::ProjectHead,
            Self::HrManager,
            Self::Recruiter,
            Self::HrExecutive,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Founder => "Founder",
            Self::CoFounder => "Co-Founder",
            Self::Ceo => "CEO",
            Self::Cfo => "CFO",
            Self::Cto => "CTO / Tech Lead",
            Self::Coo => "COO",
            Self::ProjectHead => "Project Head / Team Lead",
            Self::HrManager => "HR Manager / People Operations",
            Self::Recruiter => "Recruiter",
            Self::HrExecutive => "HR Executive",
        }
    }

    /// Fixed mapping from role to questionnaire level.
    pub const fn level(self) -> ReviewerLevel {
        match self {
            Self::Founder | Self::CoFounder => ReviewerLevel::Strategic,
            Self::Ceo | Self::Cfo | Self::Cto | Self::Coo | Self::ProjectHead => {
                ReviewerLevel::Execution
            }
            Self::HrManager | Self::Recruiter | Self::HrExecutive => ReviewerLevel::Support,
        }
    }

    /// Only founders and co-founders may open new job roles.
    pub const fn can_open_roles(self) -> bool {
        matches!(self, Self::Founder | Self::CoFounder)
    }

    /// Membership in the executive escalation tier used by the overall
    /// decision engine. Deliberately a superset of the `Strategic`
    /// questionnaire level: CEO and CFO answer the Execution questionnaire
    /// but their high-risk verdicts still escalate the overall outcome.
    pub const fn in_executive_tier(self) -> bool {
        matches!(self, Self::Founder | Self::CoFounder | Self::Ceo | Self::Cfo)
    }
}

/// Questionnaire routing tiers derived from the reviewer's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerLevel {
    Strategic,
    Execution,
    Support,
}

impl ReviewerLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Strategic, Self::Execution, Self::Support]
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Strategic => 1,
            Self::Execution => 2,
            Self::Support => 3,
        }
    }

    /// Levels are derived from roles, so an out-of-range index is a
    /// configuration fault, never a reason to fall back to a default level.
    pub fn from_index(value: u8) -> Result<Self, UnknownLevel> {
        match value {
            1 => Ok(Self::Strategic),
            2 => Ok(Self::Execution),
            3 => Ok(Self::Support),
            other => Err(UnknownLevel(other)),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strategic => "Strategic / Ownership",
            Self::Execution => "Execution / Delivery",
            Self::Support => "HR / Operations Support",
        }
    }
}

/// Raised when a numeric level index does not map to a questionnaire tier.
#[derive(Debug, thiserror::Error)]
#[error("no reviewer level maps to index {0}")]
pub struct UnknownLevel(pub u8);

/// A reviewer's binary verdict on a job opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Decline => "Decline",
        }
    }
}

/// Derived risk classification, totally ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Score-to-risk mapping shared by every questionnaire level.
    pub const fn from_score(score: i16) -> Self {
        if score >= 3 {
            Self::High
        } else if score >= 1 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Reasons a reviewer can decline a role, used to key corrective guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineCategory {
    BudgetConstraint,
    SkillUnavailability,
    TimelineRisk,
    TeamDependency,
    BusinessMisalignment,
    OperationalGap,
}

impl DeclineCategory {
    /// Stable key used in aggregate condition summaries.
    pub const fn key(self) -> &'static str {
        match self {
            Self::BudgetConstraint => "budget_constraint",
            Self::SkillUnavailability => "skill_unavailability",
            Self::TimelineRisk => "timeline_risk",
            Self::TeamDependency => "team_dependency",
            Self::BusinessMisalignment => "business_misalignment",
            Self::OperationalGap => "operational_gap",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BudgetConstraint => "Budget constraint",
            Self::SkillUnavailability => "Skill unavailability",
            Self::TimelineRisk => "Timeline risk",
            Self::TeamDependency => "Team dependency",
            Self::BusinessMisalignment => "Business misalignment",
            Self::OperationalGap => "Operational readiness gap",
        }
    }
}

/// One reviewer seat on an assessment panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMember {
    pub reviewer: ReviewerId,
    pub role: ReviewerRole,
}

/// Lifecycle of a job opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl OpeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A proposed job role routed to the review panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: OpeningId,
    pub title: String,
    pub department: String,
    pub description: String,
    pub required_skills: String,
    pub experience_level: String,
    pub budget_range: String,
    pub urgency: Band,
    pub opened_by: PanelMember,
    pub opened_at: DateTime<Utc>,
}

/// Three-step low/medium/high scale used by several questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Where the budget for a role is drawn from, per the CFO supplement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSource {
    Operational,
    Contingency,
    NewFunding,
    CostCenter,
}

impl FundingSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operational => "Operational Budget",
            Self::Contingency => "Contingency Fund",
            Self::NewFunding => "Requires New Funding",
            Self::CostCenter => "Cost Center Budget",
        }
    }
}

/// One reviewer's scored, immutable response for one job opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub reviewer: PanelMember,
    pub decision: Decision,
    pub decline_reason: Option<String>,
    pub decline_category: Option<DeclineCategory>,
    pub risk_level: RiskLevel,
    pub answers: BTreeMap<QuestionId, AnswerValue>,
}
