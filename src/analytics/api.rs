use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::roi::{analyze_roi, churn_sensitivity, BrokerProfile, RoiAnalysis};
use crate::booking::{
    summarize, BatchSummary, BookingClassifier, BrokerPolicy, ClientActivity, ClientDecision,
};
use crate::calculators::exposure::{portfolio_exposure, Holding, PortfolioExposure};
use crate::calculators::margin::{analyze_margin, MarginAnalysis, MarginInput};
use crate::calculators::pip::{analyze_pip, pnl_curve, PipAnalysis, PipInput};
use crate::calculators::position_sizing::{calculate_position_size, PositionSize, PositionSizeInput};
use crate::calculators::risk_reward::{analyze_trade, RiskRewardAnalysis, TradePlan};
use crate::calculators::swap::{analyze_swap, cumulative_swap_curve, SwapAnalysis, SwapInput};
use crate::calculators::var::{monte_carlo_var, VarEstimate, VarInput};
use crate::config::Config;
use crate::error::RiskError;

pub type SharedConfig = Arc<Config>;

pub fn router(config: SharedConfig) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/booking/classify", post(classify_clients))
        .route("/api/position-size", post(position_size))
        .route("/api/risk-reward", post(risk_reward))
        .route("/api/exposure", post(exposure))
        .route("/api/var", post(value_at_risk))
        .route("/api/margin", post(margin))
        .route("/api/swap", post(swap))
        .route("/api/pip", post(pip))
        .route("/api/roi", post(roi))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(config)
}

pub async fn run_server(config: SharedConfig) -> anyhow::Result<()> {
    let address = config.api.bind_address();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("🌐 Risk desk API running on http://{}", address);
    axum::serve(listener, app).await?;
    Ok(())
}

pub struct ApiError(RiskError);

impl From<RiskError> for ApiError {
    fn from(err: RiskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("❌ Rejected request: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Falls back to the configured default policy when absent.
    pub policy: Option<BrokerPolicy>,
    pub clients: Vec<ClientActivity>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub generated_at: DateTime<Utc>,
    pub policy: BrokerPolicy,
    pub decisions: Vec<ClientDecision>,
    pub summary: BatchSummary,
}

#[derive(Debug, Serialize)]
pub struct SwapResponse {
    #[serde(flatten)]
    pub analysis: SwapAnalysis,
    pub cumulative_curve: Vec<(u32, f64)>,
}

#[derive(Debug, Serialize)]
pub struct PipResponse {
    #[serde(flatten)]
    pub analysis: PipAnalysis,
    pub pnl_curve: Vec<(i32, f64)>,
}

#[derive(Debug, Serialize)]
pub struct RoiResponse {
    #[serde(flatten)]
    pub analysis: RoiAnalysis,
    pub churn_sensitivity: Vec<(u32, f64)>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn classify_clients(
    State(config): State<SharedConfig>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let policy = request.policy.unwrap_or(config.booking.default_policy);
    tracing::info!(
        "📥 Classifying {} clients ({} policy, LP cost ${:.2}/lot)",
        request.clients.len(),
        policy.risk_tolerance,
        policy.lp_commission_cost_per_lot
    );

    let classifier = BookingClassifier::new(config.booking.thresholds);
    let decisions = classifier.classify_batch(&request.clients, &policy);
    let summary = summarize(&decisions);

    Json(ClassifyResponse {
        generated_at: Utc::now(),
        policy,
        decisions,
        summary,
    })
}

pub async fn position_size(Json(input): Json<PositionSizeInput>) -> Json<PositionSize> {
    Json(calculate_position_size(&input))
}

pub async fn risk_reward(Json(plan): Json<TradePlan>) -> Json<RiskRewardAnalysis> {
    Json(analyze_trade(&plan))
}

pub async fn exposure(Json(holdings): Json<Vec<Holding>>) -> Json<PortfolioExposure> {
    Json(portfolio_exposure(&holdings))
}

pub async fn value_at_risk(
    State(config): State<SharedConfig>,
    Json(input): Json<VarInput>,
) -> Result<Json<VarEstimate>, ApiError> {
    Ok(Json(monte_carlo_var(&input, &config.simulation)?))
}

pub async fn margin(Json(input): Json<MarginInput>) -> Result<Json<MarginAnalysis>, ApiError> {
    Ok(Json(analyze_margin(&input)?))
}

pub async fn swap(Json(input): Json<SwapInput>) -> Json<SwapResponse> {
    let analysis = analyze_swap(&input);
    let cumulative_curve = cumulative_swap_curve(analysis.daily_swap, input.days_held);
    Json(SwapResponse {
        analysis,
        cumulative_curve,
    })
}

pub async fn pip(Json(input): Json<PipInput>) -> Json<PipResponse> {
    let analysis = analyze_pip(&input);
    let pnl_curve = pnl_curve(analysis.pip_value, analysis.total_cost);
    Json(PipResponse {
        analysis,
        pnl_curve,
    })
}

pub async fn roi(
    State(config): State<SharedConfig>,
    Json(profile): Json<BrokerProfile>,
) -> Json<RoiResponse> {
    Json(RoiResponse {
        analysis: analyze_roi(&profile, &config.roi),
        churn_sensitivity: churn_sensitivity(&profile, &config.roi),
    })
}
