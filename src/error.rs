//! Catalog errors

use thiserror::Error;

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or querying the scenario catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("scenario {scenario_id} not found")]
    ScenarioNotFound { scenario_id: i64 },

    #[error("option '{option_id}' not found in scenario {scenario_id}")]
    OptionNotFound { scenario_id: i64, option_id: String },

    /// The dataset failed validation. `option_id` is `None` when the fault
    /// sits on the scenario itself.
    #[error("schema violation in scenario {scenario_id}{suffix}: {field}: {reason}", suffix = option_suffix(.option_id))]
    SchemaViolation {
        scenario_id: i64,
        option_id: Option<String>,
        field: String,
        reason: String,
    },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

fn option_suffix(option_id: &Option<String>) -> String {
    match option_id {
        Some(id) => format!(", option '{}'", id),
        None => String::new(),
    }
}

impl CatalogError {
    pub(crate) fn violation(
        scenario_id: i64,
        option_id: Option<&str>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CatalogError::SchemaViolation {
            scenario_id,
            option_id: option_id.map(str::to_string),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for either lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ScenarioNotFound { .. } | CatalogError::OptionNotFound { .. }
        )
    }
}
