//! Component-generation prompt assembly
//!
//! The prompt is handed to an external code generator; this module only
//! builds the text.

use serde::Deserialize;

use crate::core::recovery::{AnalysisImage, RecoveryOutcome};
use crate::core::types::InvalidPayload;

const PROMPT_HEADER: [&str; 3] = [
    "Build a single headless React + TypeScript + Tailwind component.",
    "White background, center the component on both axes, overflow-hidden, no extra text beyond the component.",
    "No font-family declarations or animations. Tailwind utilities only; minimal CSS if absolutely necessary.",
];

const NEGATIVE_MAPPINGS: [(&str, &str); 7] = [
    ("no-glassmorphism", "no-blur"),
    ("no-transparency", "no-opacity"),
    ("no-shadows", "no-shadow"),
    ("no-rounded", "no-border-radius"),
    ("no-gradients", "no-gradient"),
    ("no-animations", "no-motion"),
    ("no-dark-mode", "no-dark"),
];

/// Inputs for one generation prompt
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationBrief {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub user_prompt: String,
    #[serde(default)]
    pub negatives: Vec<String>,
    #[serde(default)]
    pub images: Vec<AnalysisImage>,
    #[serde(default)]
    pub analyses: Vec<RecoveryOutcome>,
}

/// Lowercase, trim and map negatives to their canonical names
///
/// Blank entries are dropped; unknown entries pass through normalized.
pub fn normalize_negatives(negatives: &[String]) -> Vec<String> {
    negatives
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .map(|n| {
            NEGATIVE_MAPPINGS
                .iter()
                .find(|(from, _)| *from == n)
                .map(|(_, to)| to.to_string())
                .unwrap_or(n)
        })
        .collect()
}

/// Detail block listing the brief, images and per-image analyses
pub fn build_details(brief: &GenerationBrief) -> String {
    let component = non_blank(brief.component_name.as_deref()).unwrap_or("Component");
    let app = non_blank(brief.app_name.as_deref()).unwrap_or("App");
    let negatives = normalize_negatives(&brief.negatives);

    let mut lines = Vec::with_capacity(4 + brief.images.len() + brief.analyses.len());
    lines.push(format!("Component name: {}. App: {}.", component, app));
    lines.push(format!(
        "User prompt (may reference #tags or @img:{{id}}): {}",
        brief.user_prompt
    ));
    if !negatives.is_empty() {
        lines.push(format!("Negatives: {}", negatives.join(", ")));
    }

    lines.push("Images:".to_string());
    for image in &brief.images {
        lines.push(format!(
            "- {} tags=[{}] desc=\"{}\"",
            image.id,
            image.tags.join(", "),
            image.description.as_deref().unwrap_or_default()
        ));
    }

    lines.push("Surface details per image:".to_string());
    for analysis in &brief.analyses {
        lines.push(format!(
            "- {} microdesc=\"{}\" layers={}",
            analysis.image_id, analysis.microdesc, analysis.surface_layers
        ));
    }

    lines.join("\n")
}

/// Full generation prompt; a brief without analyses is rejected
pub fn build_generation_prompt(brief: &GenerationBrief) -> Result<String, InvalidPayload> {
    if brief.analyses.is_empty() {
        return Err(InvalidPayload::new("analyses required"));
    }

    let mut sections: Vec<String> = PROMPT_HEADER.iter().map(|s| s.to_string()).collect();
    sections.push(build_details(brief));
    Ok(sections.join("\n"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
