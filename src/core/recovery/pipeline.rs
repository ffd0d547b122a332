//! Per-image recovery state machine
//!
//! ```text
//! VisionDescribe ──▶ ParseAsJson ──ok──▶ done
//!                         │fail
//!                         ▼
//!                StructuredRevision ──ok──▶ done
//!                         │fail
//!                         ▼
//!                 TextOnlyFallback ──ok──▶ done
//!                         │fail
//!                         ▼
//!                       Stub ──────────▶ done
//! ```
//!
//! Transitions only move forward. Provider failures are absorbed at every
//! stage; the only error that escapes is an invalid image, raised before any
//! network call.

use std::fmt;

use tracing::{debug, info};

use super::outcome::{AnalysisImage, RecoveryOutcome};
use super::prompts;
use crate::core::router::{PriorityTable, Router};
use crate::core::traits::ApiKeyLookup;
use crate::core::types::{InvalidPayload, RoutedRequest, VisionRequest, parse_json_object};

/// Per-request routing inputs shared by every image in a batch
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub keys: &'a dyn ApiKeyLookup,
    /// Requested vision model, tried first
    pub vision_model: Option<&'a str>,
    /// Rebinds the vision family's endpoints for this request
    pub api_base_url: Option<&'a str>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(keys: &'a dyn ApiKeyLookup) -> Self {
        Self {
            keys,
            vision_model: None,
            api_base_url: None,
        }
    }
}

/// Stage names, reported with each resolved outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    VisionDescribe,
    ParseAsJson,
    StructuredRevision,
    TextOnlyFallback,
    Stub,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::VisionDescribe => "vision_describe",
            StageKind::ParseAsJson => "parse_as_json",
            StageKind::StructuredRevision => "structured_revision",
            StageKind::TextOnlyFallback => "text_only_fallback",
            StageKind::Stub => "stub",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome plus the stage that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub outcome: RecoveryOutcome,
    pub resolved_by: StageKind,
}

/// Machine state; `vision_text` is the trimmed, non-blank describe output
enum RecoveryStage {
    VisionDescribe,
    ParseAsJson { vision_text: Option<String> },
    StructuredRevision { vision_text: Option<String> },
    TextOnlyFallback { vision_text: Option<String> },
    Stub { vision_text: Option<String> },
    Done(Recovery),
}

impl RecoveryStage {
    fn kind(&self) -> Option<StageKind> {
        match self {
            RecoveryStage::VisionDescribe => Some(StageKind::VisionDescribe),
            RecoveryStage::ParseAsJson { .. } => Some(StageKind::ParseAsJson),
            RecoveryStage::StructuredRevision { .. } => Some(StageKind::StructuredRevision),
            RecoveryStage::TextOnlyFallback { .. } => Some(StageKind::TextOnlyFallback),
            RecoveryStage::Stub { .. } => Some(StageKind::Stub),
            RecoveryStage::Done(_) => None,
        }
    }
}

/// Structured-output recovery layered on the router
#[derive(Debug, Clone, Copy)]
pub struct RecoveryPipeline<'a> {
    router: &'a Router,
    table: &'a PriorityTable,
}

impl<'a> RecoveryPipeline<'a> {
    pub fn new(router: &'a Router, table: &'a PriorityTable) -> Self {
        Self { router, table }
    }

    /// Recover a result for every image, in input order
    ///
    /// All images are validated before the first provider call; images are
    /// then processed one at a time.
    pub async fn analyze(
        &self,
        images: &[AnalysisImage],
        ctx: &AnalysisContext<'_>,
    ) -> Result<Vec<RecoveryOutcome>, InvalidPayload> {
        for image in images {
            image.image_ref()?;
        }

        let mut outcomes = Vec::with_capacity(images.len());
        for image in images {
            outcomes.push(self.recover(image, ctx).await?.outcome);
        }
        Ok(outcomes)
    }

    /// Drive one image through the stages until it resolves
    pub async fn recover(
        &self,
        image: &AnalysisImage,
        ctx: &AnalysisContext<'_>,
    ) -> Result<Recovery, InvalidPayload> {
        let image_ref = image.image_ref()?;
        let vision = VisionRequest::new(image_ref)
            .with_tags(image.tags.clone())
            .with_system_prompt(prompts::SURFACE_SYSTEM_PROMPT);
        let vision_candidates = self.table.vision_candidates(ctx.vision_model, ctx.api_base_url);

        let mut stage = RecoveryStage::VisionDescribe;
        loop {
            if let Some(kind) = stage.kind() {
                debug!(image_id = %image.id, stage = %kind, "recovery stage");
            }

            stage = match stage {
                RecoveryStage::VisionDescribe => {
                    let request = RoutedRequest::vision_describe(
                        vision
                            .clone()
                            .with_user_text(prompts::describe_user_text(&image.tags)),
                    );
                    let vision_text = match self
                        .router
                        .route(&request, &vision_candidates, ctx.keys)
                        .await
                    {
                        Ok(result) => non_blank(result.result.into_text()),
                        Err(e) => {
                            debug!(image_id = %image.id, error = %e, "vision describe failed");
                            None
                        }
                    };
                    RecoveryStage::ParseAsJson { vision_text }
                }

                RecoveryStage::ParseAsJson { vision_text } => {
                    match vision_text.as_deref().and_then(parse_json_object) {
                        Some(structured) => {
                            let fallback = vision_text.clone().unwrap_or_default();
                            RecoveryStage::Done(Recovery {
                                outcome: RecoveryOutcome::from_structured(
                                    image, structured, fallback, true,
                                ),
                                resolved_by: StageKind::ParseAsJson,
                            })
                        }
                        None => RecoveryStage::StructuredRevision { vision_text },
                    }
                }

                RecoveryStage::StructuredRevision { vision_text } => {
                    let request = RoutedRequest::vision_structured(
                        vision
                            .clone()
                            .with_user_text(prompts::structured_user_text(&image.id)),
                    );
                    match self
                        .router
                        .route(&request, &vision_candidates, ctx.keys)
                        .await
                    {
                        Ok(result) => match result.result.as_structured() {
                            Some(structured) => {
                                let fallback = vision_text
                                    .clone()
                                    .unwrap_or_else(|| fallback_description(image, None));
                                RecoveryStage::Done(Recovery {
                                    outcome: RecoveryOutcome::from_structured(
                                        image,
                                        structured.clone(),
                                        fallback,
                                        true,
                                    ),
                                    resolved_by: StageKind::StructuredRevision,
                                })
                            }
                            None => RecoveryStage::TextOnlyFallback { vision_text },
                        },
                        Err(e) => {
                            debug!(image_id = %image.id, error = %e, "structured revision failed");
                            RecoveryStage::TextOnlyFallback { vision_text }
                        }
                    }
                }

                RecoveryStage::TextOnlyFallback { vision_text } => {
                    let description = image
                        .caller_description()
                        .or(vision_text.as_deref())
                        .unwrap_or_default();
                    let request = RoutedRequest::compose(prompts::compose_prompt(
                        &image.id,
                        &image.tags,
                        description,
                    ));
                    let candidates = self
                        .table
                        .compose_fallback_candidates(ctx.vision_model, ctx.api_base_url);

                    match self.router.route(&request, &candidates, ctx.keys).await {
                        Ok(result) => {
                            let text = result.result.into_text();
                            let fallback = fallback_description(image, vision_text.as_deref());
                            let outcome = match parse_json_object(&text) {
                                Some(structured) => RecoveryOutcome::from_structured(
                                    image, structured, fallback, false,
                                ),
                                None => RecoveryOutcome {
                                    image_id: image.id.clone(),
                                    tags: image.tags.clone(),
                                    microdesc: fallback,
                                    surface_layers: serde_json::json!({}),
                                },
                            };
                            RecoveryStage::Done(Recovery {
                                outcome,
                                resolved_by: StageKind::TextOnlyFallback,
                            })
                        }
                        Err(e) => {
                            debug!(image_id = %image.id, error = %e, "text-only fallback failed");
                            RecoveryStage::Stub { vision_text }
                        }
                    }
                }

                RecoveryStage::Stub { vision_text } => {
                    let description = vision_text.as_deref().or(image.caller_description());
                    RecoveryStage::Done(Recovery {
                        outcome: RecoveryOutcome::stub(image, description),
                        resolved_by: StageKind::Stub,
                    })
                }

                RecoveryStage::Done(recovery) => {
                    info!(
                        image_id = %image.id,
                        resolved_by = %recovery.resolved_by,
                        "image analysis resolved"
                    );
                    return Ok(recovery);
                }
            };
        }
    }
}

/// Vision text, else the caller description, else `Image {id}`
fn fallback_description(image: &AnalysisImage, vision_text: Option<&str>) -> String {
    vision_text
        .or_else(|| image.caller_description())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Image {}", image.id))
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
