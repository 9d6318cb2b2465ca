//! Wildfire Dilemmas
//!
//! Core of an educational wildfire-crisis decision exercise:
//! - Validated, read-only scenario catalog (options, expert panel, radar
//!   profile, counterfactual comparison)
//! - Video-gated tutorial with an origin-checked playback channel
//! - Read-only HTTP surface for rendering views

pub mod config;
pub mod error;
pub mod gate;
pub mod scenario;
pub mod server;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::CatalogError;
pub use gate::TutorialGate;
pub use scenario::ScenarioCatalog;
