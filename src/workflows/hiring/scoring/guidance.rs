use crate::workflows::hiring::domain::DeclineCategory;

/// Fallback shown when a decline carries no recognizable category.
pub(crate) const GENERIC_REMEDIATION: &[&str] = &["Review specific concerns"];

/// Canned remediation suggestions per decline category. Plain table lookup;
/// there is no behavioral variation beyond the keyed list.
pub(crate) const fn remediation_steps(category: DeclineCategory) -> &'static [&'static str] {
    match category {
        DeclineCategory::BudgetConstraint => &[
            "Increase budget allocation",
            "Reduce role scope or responsibilities",
            "Consider contract or part-time hiring",
        ],
        DeclineCategory::SkillUnavailability => &[
            "Revise skill requirements",
            "Provide training for existing team",
            "Consider outsourcing specific tasks",
        ],
        DeclineCategory::TimelineRisk => &[
            "Delay hiring timeline",
            "Hire contract resource for immediate needs",
            "Redistribute workload temporarily",
        ],
        DeclineCategory::TeamDependency => &[
            "Assign experienced mentor",
            "Restructure team responsibilities",
            "Provide cross-training",
        ],
        DeclineCategory::BusinessMisalignment => &[
            "Re-evaluate business strategy",
            "Conduct market analysis",
            "Re-align role with business goals",
        ],
        DeclineCategory::OperationalGap => &[
            "Improve onboarding process",
            "Set up necessary infrastructure",
            "Define clear processes first",
        ],
    }
}

/// Total lookup: every category yields a non-empty list, and an unknown
/// category yields the generic single-item fallback.
pub fn corrective_guidance(category: Option<DeclineCategory>) -> &'static [&'static str] {
    match category {
        Some(category) => remediation_steps(category),
        None => GENERIC_REMEDIATION,
    }
}
