//! Scenario record types
//!
//! Fixed-shape records for the decision dataset. Wire names follow the
//! authored content, including its irregular comparison-table keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value tag attached to an option and used as an expert-opinion key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueLabel {
    Safety,
    Efficiency,
    Sustainability,
    Fairness,
    Nonmaleficence,
}

impl ValueLabel {
    /// Canonical order, matching the expert panel layout.
    pub const ALL: [ValueLabel; 5] = [
        ValueLabel::Safety,
        ValueLabel::Efficiency,
        ValueLabel::Sustainability,
        ValueLabel::Fairness,
        ValueLabel::Nonmaleficence,
    ];

    /// Lowercase key as it appears in the dataset.
    pub fn key(&self) -> &'static str {
        match self {
            ValueLabel::Safety => "safety",
            ValueLabel::Efficiency => "efficiency",
            ValueLabel::Sustainability => "sustainability",
            ValueLabel::Fairness => "fairness",
            ValueLabel::Nonmaleficence => "nonmaleficence",
        }
    }
}

impl fmt::Display for ValueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueLabel::Safety => "Safety",
            ValueLabel::Efficiency => "Efficiency",
            ValueLabel::Sustainability => "Sustainability",
            ValueLabel::Fairness => "Fairness",
            ValueLabel::Nonmaleficence => "Nonmaleficence",
        };
        f.pad(name)
    }
}

/// A crisis situation with its selectable responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Presentation order, not ranked by merit.
    pub options: Vec<DecisionOption>,
}

impl Scenario {
    pub fn option(&self, option_id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// One selectable course of action within a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    pub id: String,
    pub title: String,
    pub label: ValueLabel,
    pub description: String,
    pub impact: Impact,
    pub risk_info: Vec<String>,
    pub expert_opinions: ExpertOpinions,
    pub radar_data: RadarData,
    pub cvr_question: CvrQuestion,
    pub comparison_table_column_content: ComparisonTable,
}

impl DecisionOption {
    /// The expert opinion written from this option's own value perspective.
    pub fn aligned_opinion(&self) -> &ExpertOpinion {
        self.expert_opinions.get(self.label)
    }
}

/// Outcome deltas of choosing an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub lives_saved: i64,
    pub human_casualties: i64,
    /// Percentage-point deltas below.
    pub firefighting_resource: i32,
    pub infrastructure_condition: i32,
    pub biodiversity_condition: i32,
    pub properties_condition: i32,
    pub nuclear_power_station: i32,
}

impl Impact {
    /// Percentage-point deltas with their wire names.
    pub fn deltas(&self) -> [(&'static str, i32); 5] {
        [
            ("firefightingResource", self.firefighting_resource),
            ("infrastructureCondition", self.infrastructure_condition),
            ("biodiversityCondition", self.biodiversity_condition),
            ("propertiesCondition", self.properties_condition),
            ("nuclearPowerStation", self.nuclear_power_station),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Accept,
    Reject,
}

/// A single stakeholder-perspective assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertOpinion {
    pub summary: String,
    pub recommendation: Recommendation,
    pub comparison: String,
    pub confidence: String,
}

/// Exactly one opinion per value tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpertOpinions {
    pub safety: ExpertOpinion,
    pub efficiency: ExpertOpinion,
    pub sustainability: ExpertOpinion,
    pub fairness: ExpertOpinion,
    pub nonmaleficence: ExpertOpinion,
}

impl ExpertOpinions {
    pub fn get(&self, label: ValueLabel) -> &ExpertOpinion {
        match label {
            ValueLabel::Safety => &self.safety,
            ValueLabel::Efficiency => &self.efficiency,
            ValueLabel::Sustainability => &self.sustainability,
            ValueLabel::Fairness => &self.fairness,
            ValueLabel::Nonmaleficence => &self.nonmaleficence,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueLabel, &ExpertOpinion)> + '_ {
        ValueLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }

    pub fn accept_count(&self) -> usize {
        self.iter()
            .filter(|(_, op)| op.recommendation == Recommendation::Accept)
            .count()
    }
}

/// Seven-axis profile in [0, 100], used only for charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RadarData {
    pub fire_containment: f64,
    pub firefighter_risk: f64,
    pub resource_use: f64,
    pub infrastructure_damage: f64,
    pub biodiversity_impact: f64,
    pub ethical_fairness: f64,
    pub population_safety: f64,
}

impl RadarData {
    pub fn axes(&self) -> [(&'static str, f64); 7] {
        [
            ("fireContainment", self.fire_containment),
            ("firefighterRisk", self.firefighter_risk),
            ("resourceUse", self.resource_use),
            ("infrastructureDamage", self.infrastructure_damage),
            ("biodiversityImpact", self.biodiversity_impact),
            ("ethicalFairness", self.ethical_fairness),
            ("populationSafety", self.population_safety),
        ]
    }
}

/// Counterfactual-value-reflection question paired with an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvrQuestion {
    pub description_tile: String,
    pub description: String,
    pub question: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserChoice {
    Accepted,
    Rejected,
}

impl UserChoice {
    pub fn opposite(self) -> Self {
        match self {
            UserChoice::Accepted => UserChoice::Rejected,
            UserChoice::Rejected => UserChoice::Accepted,
        }
    }
}

impl fmt::Display for UserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserChoice::Accepted => f.pad("Accepted"),
            UserChoice::Rejected => f.pad("Rejected"),
        }
    }
}

/// Two-column juxtaposition of the chosen option and its CVR counterfactual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonTable {
    #[serde(rename = "firstColumnTitle")]
    pub first_title: String,
    #[serde(rename = "firstColumnSelectedPreference")]
    pub first_selected_preference: String,
    #[serde(rename = "firstValue")]
    pub first_value: String,
    #[serde(rename = "firstColumnAffected")]
    pub first_affected: u64,
    #[serde(rename = "firstColumnRisk")]
    pub first_risk: String,
    #[serde(rename = "firstColumnuserChoice")]
    pub first_user_choice: UserChoice,
    #[serde(rename = "secondColumnTitle")]
    pub second_title: String,
    #[serde(rename = "secondColumnSelectedPreference")]
    pub second_selected_preference: String,
    #[serde(rename = "secondValue")]
    pub second_value: String,
    #[serde(rename = "secondColumnaffected")]
    pub second_affected: u64,
    #[serde(rename = "secondColumnRisk")]
    pub second_risk: String,
    #[serde(rename = "secondColumnuserChoice")]
    pub second_user_choice: UserChoice,
}

/// One rendered row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub first: String,
    pub second: String,
}

impl ComparisonTable {
    /// Accepted on one side, rejected on the other.
    pub fn is_contrasting(&self) -> bool {
        self.first_user_choice.opposite() == self.second_user_choice
    }

    pub fn rows(&self) -> Vec<ComparisonRow> {
        let row = |label, first: &str, second: &str| ComparisonRow {
            label,
            first: first.trim().to_string(),
            second: second.trim().to_string(),
        };
        vec![
            row("Scenario", &self.first_title, &self.second_title),
            row("Selected preference", &self.first_selected_preference, &self.second_selected_preference),
            row("Value", &self.first_value, &self.second_value),
            row("Affected", &self.first_affected.to_string(), &self.second_affected.to_string()),
            row("Risk", &self.first_risk, &self.second_risk),
            row("User choice", &self.first_user_choice.to_string(), &self.second_user_choice.to_string()),
        ]
    }
}
