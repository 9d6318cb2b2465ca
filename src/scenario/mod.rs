//! Scenario Module
//!
//! The wildfire decision dataset: record types, load-time validation and the
//! read-only catalog views query.

mod catalog;
mod types;
pub mod validation;

pub use catalog::{OptionSelection, ScenarioCatalog};
pub use types::{
    ComparisonRow, ComparisonTable, CvrQuestion, DecisionOption, ExpertOpinion, ExpertOpinions, Impact,
    RadarData, Recommendation, Scenario, UserChoice, ValueLabel,
};
pub use validation::{AuthoringWarning, ValidationReport};
