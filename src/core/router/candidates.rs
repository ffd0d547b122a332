//! Priority lists of provider candidates
//!
//! Built once from [`RouterSettings`] and handed out by reference. Lists are
//! returned in priority order with `(provider, model)` duplicates removed,
//! keeping the first occurrence.

use std::collections::HashSet;

use crate::config::RouterSettings;
use crate::core::providers::{ProviderCandidate, ProviderKind};
use crate::core::types::TaskKind;

/// Ordered candidate tables for text and vision tasks
#[derive(Debug, Clone)]
pub struct PriorityTable {
    text: Vec<ProviderCandidate>,
    vision_family: ProviderKind,
    vision_models: Vec<String>,
    vision_base_url: Option<String>,
    compose_fallback_model: String,
}

impl PriorityTable {
    pub fn from_settings(settings: &RouterSettings) -> Self {
        Self {
            text: settings
                .text_candidates
                .iter()
                .map(|c| c.to_candidate())
                .collect(),
            vision_family: settings.vision_family,
            vision_models: settings.effective_vision_models(),
            vision_base_url: settings.vision_base_url.clone(),
            compose_fallback_model: settings.compose_fallback_model.clone(),
        }
    }

    /// Family bound to a request's primary `apiKey`
    pub fn vision_family(&self) -> ProviderKind {
        self.vision_family
    }

    pub fn vision_models(&self) -> &[String] {
        &self.vision_models
    }

    /// Vision candidates, `preferred` first when given
    ///
    /// `base_url` rebinds the family endpoint for this request only.
    pub fn vision_candidates(
        &self,
        preferred: Option<&str>,
        base_url: Option<&str>,
    ) -> Vec<ProviderCandidate> {
        let endpoint = self.family_endpoint(base_url);
        let preferred = non_blank(preferred);

        let candidates = preferred
            .into_iter()
            .chain(self.vision_models.iter().map(String::as_str))
            .map(|model| ProviderCandidate::new(self.vision_family, model, endpoint.clone()))
            .collect();
        dedupe(candidates)
    }

    /// Text candidates, with `preferred` on the vision family first when given
    pub fn text_candidates(
        &self,
        preferred: Option<&str>,
        base_url: Option<&str>,
    ) -> Vec<ProviderCandidate> {
        let mut candidates = Vec::with_capacity(self.text.len() + 1);
        if let Some(model) = non_blank(preferred) {
            candidates.push(ProviderCandidate::new(
                self.vision_family,
                model,
                self.family_endpoint(base_url),
            ));
        }
        candidates.extend(self.text.iter().map(|c| self.rebind(c, base_url)));
        dedupe(candidates)
    }

    /// Candidates for the text-only recovery stage
    ///
    /// Led by `preferred`, else the configured compose fallback model.
    pub fn compose_fallback_candidates(
        &self,
        preferred: Option<&str>,
        base_url: Option<&str>,
    ) -> Vec<ProviderCandidate> {
        let model = non_blank(preferred).unwrap_or(self.compose_fallback_model.as_str());
        self.text_candidates(Some(model), base_url)
    }

    /// Candidate list suited to a task kind
    pub fn candidates_for(
        &self,
        kind: TaskKind,
        preferred: Option<&str>,
        base_url: Option<&str>,
    ) -> Vec<ProviderCandidate> {
        if kind.is_vision() {
            self.vision_candidates(preferred, base_url)
        } else {
            self.text_candidates(preferred, base_url)
        }
    }

    fn family_base<'a>(&'a self, base_url: Option<&'a str>) -> Option<&'a str> {
        non_blank(base_url).or(self.vision_base_url.as_deref())
    }

    fn family_endpoint(&self, base_url: Option<&str>) -> String {
        match self.family_base(base_url) {
            Some(base) => self.vision_family.endpoint_for_base(base),
            None => self.vision_family.default_endpoint(),
        }
    }

    fn rebind(&self, candidate: &ProviderCandidate, base_url: Option<&str>) -> ProviderCandidate {
        match self.family_base(base_url) {
            Some(base) if candidate.provider == self.vision_family => ProviderCandidate::new(
                candidate.provider,
                &candidate.model,
                self.vision_family.endpoint_for_base(base),
            ),
            _ => candidate.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn dedupe(candidates: Vec<ProviderCandidate>) -> Vec<ProviderCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.provider, c.model.clone())))
        .collect()
}
