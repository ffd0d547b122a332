//! Single routed task endpoint

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::check_base_url;
use crate::core::types::InboundTask;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// Body of a successful `POST /api/route`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Text for text tasks, the parsed object for structured ones
    pub result: Value,
    pub provider: String,
    pub model: String,
    pub attempts: u32,
    pub used_fallback: bool,
}

/// Route one task through its candidate list
pub async fn route_task(
    state: web::Data<AppState>,
    task: web::Json<InboundTask>,
) -> Result<HttpResponse> {
    let task = task.into_inner();
    check_base_url(task.api_base_url.as_deref())?;
    let request = task.to_routed()?;

    let keys = task.keys(state.table.vision_family());
    if keys.is_empty() {
        return Err(GatewayError::validation("apiKey is required"));
    }

    let candidates = state.table.candidates_for(
        request.kind,
        task.preferred_model.as_deref(),
        task.api_base_url.as_deref(),
    );
    let execution = state.router.route(&request, &candidates, &keys).await?;

    info!(
        task = %request.kind,
        provider = %execution.candidate.provider,
        model = %execution.candidate.model,
        attempts = execution.attempts,
        "task routed"
    );

    Ok(HttpResponse::Ok().json(RouteResponse {
        result: execution.result.into_value(),
        provider: execution.candidate.provider.to_string(),
        model: execution.candidate.model,
        attempts: execution.attempts,
        used_fallback: execution.used_fallback,
    }))
}
