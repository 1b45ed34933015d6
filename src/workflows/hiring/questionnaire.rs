use serde::{Deserialize, Serialize};

use super::domain::{Band, FundingSource, ReviewerLevel, ReviewerRole};

/// Questions asked across the three questionnaire levels, plus the
/// CFO-only financial supplement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    // Strategic / Ownership
    BusinessAlignment,
    FinancialRisk,
    LongTermImpact,
    BudgetApproval,
    StrategicPriority,
    // Execution / Delivery
    SkillAvailability,
    ExecutionFeasibility,
    TeamDependency,
    TimelineRisk,
    MentorAvailable,
    // HR / Operations Support
    TalentAvailability,
    CostValidation,
    ProcessReadiness,
    OnboardingCapacity,
    MarketCompetition,
    // CFO financial supplement (collected, never scored)
    RoiProjection,
    CashFlowImpact,
    BudgetAlignment,
    FundingSource,
}

/// A 1-5 questionnaire rating; out-of-range values are rejected at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub u8);

/// Typed value for a single questionnaire answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Rating(Rating),
    Flag(bool),
    Band(Band),
    Funding(FundingSource),
}

impl AnswerValue {
    pub const fn kind(self) -> AnswerKind {
        match self {
            Self::Rating(_) => AnswerKind::Rating,
            Self::Flag(_) => AnswerKind::Flag,
            Self::Band(_) => AnswerKind::Band,
            Self::Funding(_) => AnswerKind::Funding,
        }
    }

    pub const fn as_rating(self) -> Option<Rating> {
        match self {
            Self::Rating(rating) => Some(rating),
            _ => None,
        }
    }

    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub const fn as_band(self) -> Option<Band> {
        match self {
            Self::Band(band) => Some(band),
            _ => None,
        }
    }
}

/// Declared answer type for a question, used to screen inbound payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Rating,
    Flag,
    Band,
    Funding,
}

impl AnswerKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "1-5 rating",
            Self::Flag => "yes/no flag",
            Self::Band => "low/medium/high band",
            Self::Funding => "funding source",
        }
    }
}

/// Schema entry declaring one question asked at a given level.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSpec {
    pub id: QuestionId,
    pub kind: AnswerKind,
    pub prompt: &'static str,
}

const STRATEGIC_QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        id: QuestionId::BusinessAlignment,
        kind: AnswerKind::Rating,
        prompt: "Business alignment with current goals (1-5)",
    },
    QuestionSpec {
        id: QuestionId::FinancialRisk,
        kind: AnswerKind::Rating,
        prompt: "Financial risk assessment (1-5)",
    },
    QuestionSpec {
        id: QuestionId::LongTermImpact,
        kind: AnswerKind::Rating,
        prompt: "Long-term impact (1-5)",
    },
    QuestionSpec {
        id: QuestionId::BudgetApproval,
        kind: AnswerKind::Flag,
        prompt: "Budget approved?",
    },
    QuestionSpec {
        id: QuestionId::StrategicPriority,
        kind: AnswerKind::Band,
        prompt: "Strategic priority",
    },
];

const EXECUTION_QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        id: QuestionId::SkillAvailability,
        kind: AnswerKind::Band,
        prompt: "Skill availability in market",
    },
    QuestionSpec {
        id: QuestionId::ExecutionFeasibility,
        kind: AnswerKind::Rating,
        prompt: "Execution feasibility (1-5)",
    },
    QuestionSpec {
        id: QuestionId::TeamDependency,
        kind: AnswerKind::Rating,
        prompt: "Team dependency level (1-5)",
    },
    QuestionSpec {
        id: QuestionId::TimelineRisk,
        kind: AnswerKind::Band,
        prompt: "Timeline risk",
    },
    QuestionSpec {
        id: QuestionId::MentorAvailable,
        kind: AnswerKind::Flag,
        prompt: "Mentor or trainer available?",
    },
];

const SUPPORT_QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        id: QuestionId::TalentAvailability,
        kind: AnswerKind::Band,
        prompt: "Talent availability",
    },
    QuestionSpec {
        id: QuestionId::CostValidation,
        kind: AnswerKind::Flag,
        prompt: "Cost validated with market?",
    },
    QuestionSpec {
        id: QuestionId::ProcessReadiness,
        kind: AnswerKind::Rating,
        prompt: "Process readiness (1-5)",
    },
    QuestionSpec {
        id: QuestionId::OnboardingCapacity,
        kind: AnswerKind::Flag,
        prompt: "Onboarding capacity available?",
    },
    QuestionSpec {
        id: QuestionId::MarketCompetition,
        kind: AnswerKind::Band,
        prompt: "Market competition level",
    },
];

const CFO_FINANCIAL_QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        id: QuestionId::RoiProjection,
        kind: AnswerKind::Rating,
        prompt: "ROI projection score (1-5)",
    },
    QuestionSpec {
        id: QuestionId::CashFlowImpact,
        kind: AnswerKind::Rating,
        prompt: "Cash flow impact (1-5)",
    },
    QuestionSpec {
        id: QuestionId::BudgetAlignment,
        kind: AnswerKind::Flag,
        prompt: "Aligned with annual budget?",
    },
    QuestionSpec {
        id: QuestionId::FundingSource,
        kind: AnswerKind::Funding,
        prompt: "Funding source",
    },
];

impl ReviewerLevel {
    /// The ordered questionnaire shown to reviewers at this level.
    pub const fn questionnaire(self) -> &'static [QuestionSpec] {
        match self {
            Self::Strategic => STRATEGIC_QUESTIONS,
            Self::Execution => EXECUTION_QUESTIONS,
            Self::Support => SUPPORT_QUESTIONS,
        }
    }
}

impl ReviewerRole {
    /// Extra questions asked of specific roles on top of the level
    /// questionnaire. Supplemental answers are stored for the record but
    /// carry no scoring weight.
    pub const fn supplemental_questions(self) -> &'static [QuestionSpec] {
        match self {
            Self::Cfo => CFO_FINANCIAL_QUESTIONS,
            _ => &[],
        }
    }
}

/// Look up the schema entry a panel member is allowed to answer.
pub(crate) fn spec_for(member_role: ReviewerRole, question: QuestionId) -> Option<&'static QuestionSpec> {
    member_role
        .level()
        .questionnaire()
        .iter()
        .chain(member_role.supplemental_questions())
        .find(|spec| spec.id == question)
}
