//! HTTP surface: the query proxy, the derived-metrics reads, and the unlock
//! gate.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use basketbridge_core::dataset::CategoryMix;
use basketbridge_core::metrics::{derive, drill_down, DerivedView, DrillRow};
use basketbridge_core::prompt::{build_system_prompt, PartialMetricSet};
use basketbridge_core::scenario::{simulate, ScenarioOutcome};
use basketbridge_core::{gate, MetricSet};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/ask", post(ask).fallback(method_not_allowed))
        .route("/api/unlock", post(unlock).fallback(method_not_allowed))
        .route("/api/metrics", get(metrics))
        .route("/api/scenario", get(scenario))
        .layer(cors)
        .with_state(state)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// ── Q&A proxy ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub data: Option<AskData>,
}

#[derive(Debug, Deserialize)]
pub struct AskData {
    #[serde(default)]
    pub kpi: Option<PartialMetricSet>,
    #[serde(default, rename = "mixCats")]
    pub mix_cats: Option<Vec<CategoryMix>>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Proxy a board question to the model, grounded in the supplied (or
/// reference) metrics. One upstream attempt; failures surface immediately.
async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let query = req
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;

    let kpi = req.data.as_ref().and_then(|d| d.kpi.as_ref());
    let cats: &[CategoryMix] = req
        .data
        .as_ref()
        .and_then(|d| d.mix_cats.as_deref())
        .unwrap_or(&[]);

    let system_prompt = build_system_prompt(kpi, cats);

    log::info!("Proxying board question ({} chars)", query.len());
    let answer = state.chat.complete(&system_prompt, query).await?;

    Ok(Json(AskResponse { answer }))
}

// ── Unlock gate ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub passcode: String,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub ok: bool,
    pub token: String,
}

/// Check the board passcode in constant time and mint an ephemeral session
/// token. An unset passcode disables the gate entirely.
async fn unlock(
    State(state): State<AppState>,
    Json(req): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>, ApiError> {
    let expected = state.passcode.as_deref().ok_or_else(|| {
        log::error!("Unlock attempted but no passcode is configured");
        ApiError::Internal
    })?;

    if !gate::verify_passcode(&req.passcode, expected) {
        log::warn!("Rejected unlock attempt");
        return Err(ApiError::InvalidPasscode);
    }

    let token = state.sessions.grant();
    Ok(Json(UnlockResponse { ok: true, token }))
}

// ── Board reads ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub kpi: MetricSet,
    pub derived: DerivedView,
    pub drill_down: Vec<DrillRow>,
}

/// The full board view: KPI snapshot, derived incidence, drill-down rows.
async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let d = &state.dataset;
    Json(MetricsResponse {
        kpi: d.kpi.clone(),
        derived: derive(&d.kpi, &d.mix_cats),
        drill_down: drill_down(&d.hierarchy),
    })
}

#[derive(Debug, Deserialize)]
pub struct ScenarioParams {
    pub rate: f64,
}

/// Run the conversion-uplift scenario at the requested rate.
async fn scenario(
    State(state): State<AppState>,
    params: Result<Query<ScenarioParams>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<ScenarioOutcome>, ApiError> {
    let Query(params) =
        params.map_err(|_| ApiError::BadParameter("rate must be a number".into()))?;
    let outcome = simulate(&state.dataset.kpi, params.rate)?;
    Ok(Json(outcome))
}
