//! Prompt text for each recovery stage

use serde_json::Value;

/// System prompt for both vision stages
pub const SURFACE_SYSTEM_PROMPT: &str = "You identify only VISIBLE UI surface details from a single image. \
No hidden/inferred or typographic guesses. Be precise but conservative.\n\
Return STRICT JSON for the described schema. Do not include prose.";

/// User text for the initial describe call
pub fn describe_user_text(tags: &[String]) -> String {
    format!("Analyze visible surface-only layers. Tags: {}", tags.join(", "))
}

/// User text for the structured revision call
pub fn structured_user_text(image_id: &str) -> String {
    format!(
        "Return ONLY a JSON object with keys imageId, tags, microdesc, surfaceLayers for imageId={}. No markdown.",
        image_id
    )
}

/// Prompt for the text-only compose fallback
pub fn compose_prompt(image_id: &str, tags: &[String], description: &str) -> String {
    let tags_json = Value::from(tags.to_vec()).to_string();
    format!(
        "Return ONLY a JSON object with keys imageId, tags, microdesc, surfaceLayers. No markdown.\n\
         imageId:{}\ntags:{}\ndescription:{}",
        image_id, tags_json, description
    )
}
