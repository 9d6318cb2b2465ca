use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use anyhow::Result;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::TutorialConfig;
use crate::error::CatalogError;
use crate::gate::{tutorial_page, TutorialPage};
use crate::scenario::{DecisionOption, Scenario, ScenarioCatalog, ValueLabel};

// Lookup misses become 404 so views can show a clear "not found" state.
struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<CatalogError>() {
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for ServerError where E: Into<anyhow::Error> {
    fn from(err: E) -> Self { Self(err.into()) }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: ScenarioCatalog,
    pub tutorial: TutorialConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSummary {
    id: i64,
    title: String,
    description: String,
    options: Vec<OptionSummary>,
}

#[derive(Serialize)]
struct OptionSummary {
    id: String,
    title: String,
    label: ValueLabel,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(s: &Scenario) -> Self {
        Self {
            id: s.id,
            title: s.title.clone(),
            description: s.description.clone(),
            options: s
                .options
                .iter()
                .map(|o| OptionSummary { id: o.id.clone(), title: o.title.clone(), label: o.label })
                .collect(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/scenarios", get(list_scenarios))
        .route("/v1/scenarios/{id}", get(get_scenario))
        .route("/v1/scenarios/{id}/options/{option_id}", get(get_option))
        .route("/v1/tutorial", get(get_tutorial))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: &str) -> Result<()> {
    let scenarios = state.catalog.len();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, scenarios, "Scenario server listening");
    println!("🚀 Scenario API ready: http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn list_scenarios(State(state): State<AppState>) -> Json<Vec<ScenarioSummary>> {
    Json(state.catalog.scenarios().map(ScenarioSummary::from).collect())
}

async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Scenario>, ServerError> {
    let scenario = state.catalog.get_scenario(id)?;
    Ok(Json(scenario.clone()))
}

async fn get_option(
    State(state): State<AppState>,
    Path((id, option_id)): Path<(i64, String)>,
) -> Result<Json<DecisionOption>, ServerError> {
    let option = state.catalog.get_option(id, &option_id)?;
    Ok(Json(option.clone()))
}

async fn get_tutorial(State(state): State<AppState>) -> Json<TutorialPage> {
    Json(tutorial_page(&state.tutorial))
}
