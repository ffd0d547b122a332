//! Generation prompt and component lint endpoints

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::core::generation::{
    GenerationBrief, Violation, build_generation_prompt, lint_component, normalize_negatives,
};
use crate::utils::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
    pub negatives: Vec<String>,
}

/// Build the prompt handed to the external component generator
pub async fn generation_prompt(brief: web::Json<GenerationBrief>) -> Result<HttpResponse> {
    let prompt = build_generation_prompt(&brief)?;
    Ok(HttpResponse::Ok().json(PromptResponse {
        prompt,
        negatives: normalize_negatives(&brief.negatives),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LintRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LintResponse {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

/// Check generated component code
pub async fn lint(request: web::Json<LintRequest>) -> HttpResponse {
    let violations = lint_component(&request.code);
    HttpResponse::Ok().json(LintResponse {
        valid: violations.is_empty(),
        violations,
    })
}
