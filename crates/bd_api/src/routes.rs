//! 路由与处理函数

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use bd_auth::AuthService;
use bd_cognitive::compute;
use bd_core::{Inputs, LogEntry, Session, Stats};
use bd_durable::{StatsRecord, StatsStore};

use crate::error::ApiError;
use crate::extract::{AuthUser, OptionalAuth};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<dyn StatsStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(stats: Arc<dyn StatsStore>, auth: Arc<AuthService>) -> Self {
        Self { stats, auth }
    }
}

/// 构建完整路由
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/stats", get(get_stats).post(save_stats))
        .route("/api/calculate", post(calculate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "CS Brain Dashboard API is running",
    }))
}

#[derive(Debug, Deserialize)]
struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let response = state.auth.signup(&req.name, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let response = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

async fn get_stats(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<StatsRecord>, ApiError> {
    state
        .stats
        .latest(identity.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No stats found yet".to_string()))
}

/// 每个字段都可能缺失，缺失时统一返回 400
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsPayload {
    focus_level: Option<f64>,
    logic_power: Option<f64>,
    bug_count: Option<u32>,
    coffee_dependency: Option<f64>,
    brain_ram_usage: Option<f64>,
}

impl StatsPayload {
    fn into_stats(self) -> Option<Stats> {
        Some(Stats {
            focus_level: self.focus_level?,
            logic_power: self.logic_power?,
            bug_count: self.bug_count?,
            coffee_dependency: self.coffee_dependency?,
            brain_ram_usage: self.brain_ram_usage?,
        })
    }
}

#[derive(Debug, Serialize)]
struct SaveStatsResponse {
    message: &'static str,
    stats: StatsRecord,
}

async fn save_stats(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    body: Result<Json<StatsPayload>, JsonRejection>,
) -> Result<Json<SaveStatsResponse>, ApiError> {
    let Json(payload) = body?;
    let stats = payload
        .into_stats()
        .ok_or_else(|| ApiError::BadRequest("All stats fields are required".to_string()))?;

    let record = state.stats.upsert(identity.user_id, stats).await?;
    tracing::info!(user_id = %identity.user_id, "Stats saved");

    Ok(Json(SaveStatsResponse {
        message: "Stats saved successfully",
        stats: record,
    }))
}

#[derive(Debug, Serialize)]
struct CalculateResponse {
    stats: Stats,
    logs: Vec<LogEntry>,
    saved: bool,
}

async fn calculate(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
    body: Result<Json<Inputs>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(inputs) = body?;
    if !inputs.is_finite() {
        return Err(ApiError::BadRequest("All inputs must be finite numbers".to_string()));
    }

    let assessment = compute(&inputs);

    let saved = match &session {
        Session::Anonymous => false,
        Session::Authenticated(identity) => {
            match state.stats.upsert(identity.user_id, assessment.stats).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(
                        user_id = %identity.user_id,
                        error = %e,
                        "Failed to persist calculated stats"
                    );
                    false
                }
            }
        }
    };

    Ok(Json(CalculateResponse {
        stats: assessment.stats,
        logs: assessment.logs,
        saved,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_every_field() {
        let full: StatsPayload = serde_json::from_value(json!({
            "focusLevel": 80.0,
            "logicPower": 70.0,
            "bugCount": 3,
            "coffeeDependency": 25.0,
            "brainRamUsage": 1.5,
        }))
        .unwrap();
        assert_eq!(full.into_stats().unwrap().bug_count, 3);

        let partial: StatsPayload = serde_json::from_value(json!({ "focusLevel": 80.0 })).unwrap();
        assert!(partial.into_stats().is_none());
        assert!(StatsPayload::default().into_stats().is_none());
    }
}
