//! Image analysis endpoint

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{Instrument, info, info_span};

use super::check_base_url;
use crate::core::providers::ProviderKeys;
use crate::core::recovery::{AnalysisContext, AnalysisImage, RecoveryPipeline};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use crate::utils::generate_request_id;

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub images: Vec<AnalysisImage>,
    #[serde(default)]
    pub vision_model: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub provider_keys: ProviderKeys,
}

impl AnalyzeRequest {
    fn check(&self, max_images: usize) -> Result<()> {
        if self.images.is_empty() {
            return Err(GatewayError::validation("at least one image is required"));
        }
        if self.images.len() > max_images {
            return Err(GatewayError::validation(format!(
                "too many images: {} (max {})",
                self.images.len(),
                max_images
            )));
        }
        check_base_url(self.api_base_url.as_deref())
    }
}

/// Analyze every image; one outcome per image, in input order
///
/// Provider failures never fail the request. Only a malformed body, a
/// missing key, or an image without data is rejected.
pub async fn analyze(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    request.check(state.config.server.max_images)?;

    let keys = request
        .provider_keys
        .clone()
        .with_primary(state.table.vision_family(), &request.api_key);
    if keys.is_empty() {
        return Err(GatewayError::validation("apiKey is required"));
    }

    let request_id = generate_request_id();
    let span = info_span!("analyze", request_id = %request_id, images = request.images.len());

    async {
        let ctx = AnalysisContext {
            keys: &keys,
            vision_model: request.vision_model.as_deref(),
            api_base_url: request.api_base_url.as_deref(),
        };
        let pipeline = RecoveryPipeline::new(&state.router, &state.table);
        let outcomes = pipeline.analyze(&request.images, &ctx).await?;

        info!(outcomes = outcomes.len(), "analysis complete");
        Ok::<_, GatewayError>(HttpResponse::Ok().json(outcomes))
    }
    .instrument(span)
    .await
}
