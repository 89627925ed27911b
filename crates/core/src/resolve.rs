//! Image and background resolution.
//!
//! Chooses which candidate URLs are usable for the current slide. Invalid
//! candidates are dropped with a warning and never reported as errors.

use crate::types::{Background, Project, Slide};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Allowed image extensions, case-insensitive.
static IMAGE_EXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(avif|webp|png|jpe?g|svg)$").unwrap());

/// Check whether a candidate path can be displayed as an image.
///
/// A valid path is non-blank, does not end in `/` and has an allowed
/// extension.
pub fn is_valid_image_path(src: &str) -> bool {
    !src.trim().is_empty() && !src.ends_with('/') && IMAGE_EXT_REGEX.is_match(src)
}

/// Strip one leading `./` segment.
fn clean_url(src: &str) -> String {
    src.strip_prefix("./").unwrap_or(src).to_string()
}

/// Whether a project-level background may stand in for a slide's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundScope {
    /// Only the slide's own background is consulted.
    #[default]
    SlideOnly,
    /// The project background is used when the slide has none.
    SlideThenProject,
}

/// An image that passed validation, ready to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidImage {
    pub url: String,
    /// Horizontal offset in vw.
    pub left: f64,
    /// Vertical offset in vh.
    pub top: f64,
    pub alt: String,
}

/// Resolver for slide images and backgrounds.
#[derive(Debug, Clone, Default)]
pub struct ResourceResolver {
    scope: BackgroundScope,
}

impl ResourceResolver {
    /// Create a resolver that only uses slide backgrounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background scope.
    pub fn with_scope(mut self, scope: BackgroundScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> BackgroundScope {
        self.scope
    }

    /// Pick the background URL for a slide, if any candidate is valid.
    ///
    /// Under [`BackgroundScope::SlideThenProject`] the project background is
    /// consulted only when the slide has no background field at all; a slide
    /// whose own candidates are all invalid shows no background.
    pub fn resolve_background(&self, slide: &Slide, project: Option<&Project>) -> Option<String> {
        let candidates = match (self.scope, project) {
            (BackgroundScope::SlideThenProject, Some(project)) if slide.background.is_none() => {
                &project.background
            }
            _ => &slide.background,
        };
        pick_first_valid(candidates).map(clean_url)
    }

    /// Every valid image of the slide, in document order.
    pub fn resolve_images(&self, slide: &Slide) -> Vec<ValidImage> {
        slide
            .images
            .iter()
            .filter(|image| {
                let valid = is_valid_image_path(&image.url);
                if !valid && !image.url.trim().is_empty() {
                    log::warn!("[IMG] Invalid image URL discarded: {}", image.url);
                }
                valid
            })
            .map(|image| ValidImage {
                url: clean_url(&image.url),
                left: image.coords[0],
                top: image.coords[1],
                alt: image.alt.clone(),
            })
            .collect()
    }
}

/// First valid candidate of a background field.
fn pick_first_valid(background: &Background) -> Option<&str> {
    let candidates: &[String] = match background {
        Background::None => return None,
        Background::Single(src) => std::slice::from_ref(src),
        Background::List(list) => list,
    };

    let picked = candidates.iter().find(|src| {
        let valid = is_valid_image_path(src);
        if !valid && !src.trim().is_empty() {
            log::warn!("[BG] Invalid background candidate discarded: {}", src);
        }
        valid
    });

    if picked.is_none() && !candidates.is_empty() {
        log::warn!("[BG] No valid background among {} candidates", candidates.len());
    }

    picked.map(String::as_str)
}
