//! Scenario Catalog
//!
//! Immutable, validated handle over the decision dataset. Nothing is exposed
//! to callers until every scenario and option has passed validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::types::{DecisionOption, Scenario};
use super::validation::{validate_document, ValidationReport};
use crate::error::{CatalogError, Result};

/// Wildfire dataset bundled with the crate.
const BUILTIN_DATASET: &str = include_str!("../../data/scenarios.json");

/// Outbound event carrying the user's pick to whatever consumes it next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSelection {
    pub scenario_id: i64,
    pub option_id: String,
}

struct CatalogInner {
    scenarios: Vec<Scenario>,
    report: ValidationReport,
}

/// Read-only scenario catalog. Clones share the same data.
#[derive(Clone)]
pub struct ScenarioCatalog {
    inner: Arc<CatalogInner>,
}

impl ScenarioCatalog {
    /// Load and validate the bundled wildfire dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        Self::from_document(doc)
    }

    /// Load a dataset file, choosing the parser from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn from_document(doc: Value) -> Result<Self> {
        let (scenarios, report) = validate_document(doc)?;
        info!(
            scenarios = report.scenarios,
            options = report.options,
            warnings = report.warnings.len(),
            "Scenario catalog loaded"
        );
        Ok(Self {
            inner: Arc::new(CatalogInner { scenarios, report }),
        })
    }

    pub fn get_scenario(&self, id: i64) -> Result<&Scenario> {
        self.inner
            .scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or(CatalogError::ScenarioNotFound { scenario_id: id })
    }

    pub fn get_option(&self, scenario_id: i64, option_id: &str) -> Result<&DecisionOption> {
        self.get_scenario(scenario_id)?
            .option(option_id)
            .ok_or_else(|| CatalogError::OptionNotFound {
                scenario_id,
                option_id: option_id.to_string(),
            })
    }

    /// Resolve a pick into the event forwarded to progression logic.
    pub fn select(&self, scenario_id: i64, option_id: &str) -> Result<OptionSelection> {
        let option = self.get_option(scenario_id, option_id)?;
        info!(scenario_id, option_id = %option.id, label = %option.label, "Option selected");
        Ok(OptionSelection {
            scenario_id,
            option_id: option.id.clone(),
        })
    }

    /// Scenarios in authored order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.inner.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.scenarios.is_empty()
    }

    /// Warnings and counts gathered while loading.
    pub fn report(&self) -> &ValidationReport {
        &self.inner.report
    }
}

impl std::fmt::Debug for ScenarioCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCatalog")
            .field("scenarios", &self.inner.report.scenarios)
            .field("options", &self.inner.report.options)
            .finish()
    }
}
