//! Dataset validation
//!
//! Turns raw dataset documents into typed scenarios. Structural faults abort
//! the load with a `SchemaViolation`; authoring conventions that the content
//! is expected (but not required) to follow are collected as warnings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::types::{DecisionOption, Scenario};
use crate::error::{CatalogError, Result};

/// Sections of an option that deserialize independently, probed in order
/// to name the offending field.
const OPTION_SECTIONS: [&str; 9] = [
    "title",
    "label",
    "description",
    "impact",
    "riskInfo",
    "expertOpinions",
    "radarData",
    "cvrQuestion",
    "comparisonTableColumnContent",
];

/// Non-fatal content issue found during load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthoringWarning {
    pub scenario_id: i64,
    pub option_id: String,
    pub message: String,
}

/// Outcome of a successful validation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub scenarios: usize,
    pub options: usize,
    pub warnings: Vec<AuthoringWarning>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    id: i64,
    title: String,
    description: String,
    options: Vec<Value>,
}

/// Validate a whole dataset document (a JSON array of scenarios).
pub fn validate_document(doc: Value) -> Result<(Vec<Scenario>, ValidationReport)> {
    let raw: Vec<Value> = match doc {
        Value::Array(items) => items,
        other => {
            return Err(CatalogError::violation(
                0,
                None,
                "document",
                format!("expected a list of scenarios at the document root, found {}", kind_of(&other)),
            ))
        }
    };

    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();
    let mut scenarios = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        let known_id = value.get("id").and_then(Value::as_i64);
        let raw: RawScenario = serde_json::from_value(value).map_err(|e| match known_id {
            Some(id) => CatalogError::violation(id, None, "scenario", e.to_string()),
            // No usable id: `scenario_id` carries the list position instead.
            None => CatalogError::violation(
                index as i64,
                None,
                format!("scenarios[{}]", index),
                format!("scenario at position {} has no usable id: {}", index, e),
            ),
        })?;

        if !seen_ids.insert(raw.id) {
            return Err(CatalogError::violation(raw.id, None, "id", "duplicate scenario id"));
        }

        let scenario = validate_scenario(raw, &mut report)?;
        report.scenarios += 1;
        report.options += scenario.options.len();
        scenarios.push(scenario);
    }

    Ok((scenarios, report))
}

fn validate_scenario(raw: RawScenario, report: &mut ValidationReport) -> Result<Scenario> {
    if raw.options.is_empty() {
        return Err(CatalogError::violation(raw.id, None, "options", "scenario has no options"));
    }

    let mut option_ids = HashSet::new();
    let mut options = Vec::with_capacity(raw.options.len());

    for value in raw.options {
        let option_id = match value.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
            Some(Value::String(_)) => {
                return Err(CatalogError::violation(raw.id, None, "options.id", "option id is empty"))
            }
            _ => {
                return Err(CatalogError::violation(
                    raw.id,
                    None,
                    "options.id",
                    "option id missing or not a string",
                ))
            }
        };

        if !option_ids.insert(option_id.clone()) {
            return Err(CatalogError::violation(raw.id, Some(&option_id), "id", "duplicate option id"));
        }

        let option: DecisionOption = match serde_json::from_value(value.clone()) {
            Ok(option) => option,
            Err(e) => {
                let field = locate_faulty_section(&value);
                return Err(CatalogError::violation(raw.id, Some(&option_id), field, e.to_string()));
            }
        };

        check_option(raw.id, &option)?;
        report.warnings.extend(authoring_warnings(raw.id, &option));
        options.push(option);
    }

    debug!(scenario_id = raw.id, options = options.len(), "Scenario validated");

    Ok(Scenario {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        options,
    })
}

/// Hard numeric rules the type system cannot express.
fn check_option(scenario_id: i64, option: &DecisionOption) -> Result<()> {
    let oid = Some(option.id.as_str());

    if option.impact.lives_saved < 0 {
        return Err(CatalogError::violation(
            scenario_id,
            oid,
            "impact.livesSaved",
            format!("must be non-negative, got {}", option.impact.lives_saved),
        ));
    }
    if option.impact.human_casualties < 0 {
        return Err(CatalogError::violation(
            scenario_id,
            oid,
            "impact.humanCasualties",
            format!("must be non-negative, got {}", option.impact.human_casualties),
        ));
    }

    // Documents routed through `serde_json::Value` cannot carry NaN or
    // infinities; the finiteness check covers records built in code.
    for (axis, score) in option.radar_data.axes() {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(CatalogError::violation(
                scenario_id,
                oid,
                format!("radarData.{}", axis),
                format!("must be within [0, 100], got {}", score),
            ));
        }
    }

    Ok(())
}

fn authoring_warnings(scenario_id: i64, option: &DecisionOption) -> Vec<AuthoringWarning> {
    let mut messages = Vec::new();
    let table = &option.comparison_table_column_content;

    if !table.is_contrasting() {
        messages.push(format!(
            "comparison choices are not opposite ({} vs {})",
            table.first_user_choice, table.second_user_choice
        ));
    }

    // Both counts are non-negative once `check_option` has passed.
    let accounted = u64::try_from(option.impact.lives_saved)
        .unwrap_or(0)
        .saturating_add(u64::try_from(option.impact.human_casualties).unwrap_or(0));
    if accounted > table.first_affected {
        messages.push(format!(
            "livesSaved + humanCasualties ({}) exceeds affected population ({})",
            accounted, table.first_affected
        ));
    }

    for (name, delta) in option.impact.deltas() {
        if !(-100..=0).contains(&delta) {
            messages.push(format!("impact.{} delta {} outside [-100, 0]", name, delta));
        }
    }

    messages
        .into_iter()
        .map(|message| {
            warn!(scenario_id, option_id = %option.id, "{}", message);
            AuthoringWarning {
                scenario_id,
                option_id: option.id.clone(),
                message,
            }
        })
        .collect()
}

/// Find the first option section that fails to deserialize on its own.
fn locate_faulty_section(value: &Value) -> String {
    for section in OPTION_SECTIONS {
        let Some(part) = value.get(section) else {
            return section.to_string();
        };
        let ok = match section {
            "title" | "description" => part.is_string(),
            "label" => serde_json::from_value::<super::ValueLabel>(part.clone()).is_ok(),
            "impact" => serde_json::from_value::<super::Impact>(part.clone()).is_ok(),
            "riskInfo" => serde_json::from_value::<Vec<String>>(part.clone()).is_ok(),
            "expertOpinions" => serde_json::from_value::<super::ExpertOpinions>(part.clone()).is_ok(),
            "radarData" => serde_json::from_value::<super::RadarData>(part.clone()).is_ok(),
            "cvrQuestion" => serde_json::from_value::<super::CvrQuestion>(part.clone()).is_ok(),
            _ => serde_json::from_value::<super::ComparisonTable>(part.clone()).is_ok(),
        };
        if !ok {
            return section.to_string();
        }
    }
    "option".to_string()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
