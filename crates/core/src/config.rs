//! Viewer configuration.
//!
//! The policy choices that differ between viewing modes live here: how
//! navigation behaves at project boundaries, where backgrounds may come from,
//! which image keys are read and what the controls say.

use crate::error::Result;
use crate::navigation::{NavLabels, NavigationPolicy};
use crate::normalize::Normalizer;
use crate::resolve::{BackgroundScope, ResourceResolver};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Policy set for a viewer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub policy: NavigationPolicy,
    pub background_scope: BackgroundScope,
    /// Read `imagen`/`image` when `imagenes`/`images` is missing.
    pub image_synonyms: bool,
    pub labels: NavLabels,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            policy: NavigationPolicy::Looping,
            background_scope: BackgroundScope::SlideOnly,
            image_synonyms: true,
            labels: NavLabels::default(),
        }
    }
}

impl ViewerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for viewing a single project: bounded navigation, slide-only
    /// backgrounds, plural image keys only.
    pub fn single_project() -> Self {
        Self::default()
            .with_policy(NavigationPolicy::Bounded)
            .with_image_synonyms(false)
    }

    pub fn with_policy(mut self, policy: NavigationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_background_scope(mut self, scope: BackgroundScope) -> Self {
        self.background_scope = scope;
        self
    }

    pub fn with_image_synonyms(mut self, accept: bool) -> Self {
        self.image_synonyms = accept;
        self
    }

    pub fn with_labels(mut self, labels: NavLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalizer configured for these options.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new().with_image_synonyms(self.image_synonyms)
    }

    /// Resolver configured for these options.
    pub fn resolver(&self) -> ResourceResolver {
        ResourceResolver::new().with_scope(self.background_scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ViewerOptions::new();
        assert_eq!(options.policy, NavigationPolicy::Looping);
        assert_eq!(options.background_scope, BackgroundScope::SlideOnly);
        assert!(options.image_synonyms);
    }

    #[test]
    fn test_single_project_preset() {
        let options = ViewerOptions::single_project();
        assert_eq!(options.policy, NavigationPolicy::Bounded);
        assert!(!options.image_synonyms);
    }

    #[test]
    fn test_from_json_partial() {
        let options = ViewerOptions::from_json(
            r#"{"policy": "bounded", "background_scope": "slide-then-project"}"#,
        )
        .unwrap();
        assert_eq!(options.policy, NavigationPolicy::Bounded);
        assert_eq!(options.background_scope, BackgroundScope::SlideThenProject);
        assert!(options.image_synonyms);
        assert_eq!(options.labels, NavLabels::default());
    }

    #[test]
    fn test_from_json_labels() {
        let options =
            ViewerOptions::from_json(r#"{"labels": {"next_project": "next project"}}"#).unwrap();
        assert_eq!(options.labels.next_project, "next project");
        assert_eq!(options.labels.prev_slide, "página anterior");
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        assert!(ViewerOptions::from_json(r#"{"policy": "sideways"}"#).is_err());
    }

    #[test]
    fn test_resolver_uses_scope() {
        let options = ViewerOptions::new().with_background_scope(BackgroundScope::SlideThenProject);
        assert_eq!(options.resolver().scope(), BackgroundScope::SlideThenProject);
    }
}
