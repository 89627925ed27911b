//! Document normalization.
//!
//! Turns an arbitrary JSON value into an ordered, fully defaulted list of
//! projects. Normalization never fails: every missing or malformed field
//! degrades to a default.

use crate::shape::{field, text, Shape};
use crate::types::{Background, ImageCandidate, Project, Slide};
use regex::Regex;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Leading numeric prefix of a string, the way `"12.5vw"` reads as 12.5.
static LEADING_FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Root keys that may hold the project list, in priority order.
const PROJECT_LIST_KEYS: &[&str] = &["proyectos2", "proyectos", "projects"];

const SLUG_KEYS: &[&str] = &["slug"];
const TITLE_KEYS: &[&str] = &["titulo", "title"];
const DATE_KEYS: &[&str] = &["fecha", "date"];
const ORDER_KEYS: &[&str] = &["orden", "order"];
const SLIDES_KEYS: &[&str] = &["slides"];
const BACKGROUND_KEYS: &[&str] = &["background"];
const TEXT_KEYS: &[&str] = &["texto", "text"];
const IMAGES_KEYS: &[&str] = &["imagenes", "images"];
const IMAGES_WITH_SYNONYM_KEYS: &[&str] = &["imagenes", "images", "imagen", "image"];

/// Normalizer for raw slideshow documents.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Whether the singular `imagen`/`image` keys are read when the plural
    /// keys are missing.
    image_synonyms: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            image_synonyms: true,
        }
    }
}

impl Normalizer {
    /// Create a normalizer that accepts image key synonyms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the singular image keys are accepted.
    pub fn with_image_synonyms(mut self, accept: bool) -> Self {
        self.image_synonyms = accept;
        self
    }

    /// Normalize a whole document into ordered projects.
    ///
    /// The input is only borrowed; the result shares nothing with it.
    pub fn normalize(&self, raw: &Value) -> Vec<Project> {
        let root = raw.as_object();
        let entries = Shape::as_list(field(root, PROJECT_LIST_KEYS));

        let projects: Vec<Project> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| self.normalize_project(entry, idx))
            .collect();

        log::debug!(
            "Normalized {} projects ({} slides)",
            projects.len(),
            projects.iter().map(Project::slide_count).sum::<usize>()
        );

        sort_by_order(projects, |p| p.order)
    }

    /// Normalize one project. `idx` is its zero-based input position.
    fn normalize_project(&self, raw: &Value, idx: usize) -> Project {
        let object = raw.as_object();
        let number = idx + 1;

        let raw_slug = text(field(object, SLUG_KEYS));
        let slug = raw_slug
            .clone()
            .unwrap_or_else(|| format!("proyecto-{}", number));
        let title = text(field(object, TITLE_KEYS))
            .or(raw_slug)
            .unwrap_or_else(|| format!("Proyecto {}", number));

        let slides = Shape::as_list(field(object, SLIDES_KEYS))
            .iter()
            .map(|slide| self.normalize_slide(slide))
            .collect();

        Project {
            slug,
            title,
            date: text(field(object, DATE_KEYS)).unwrap_or_default(),
            background: to_background(field(object, BACKGROUND_KEYS)),
            order: to_order(field(object, ORDER_KEYS)),
            slides: sort_by_order(slides, |s| s.order),
        }
    }

    fn normalize_slide(&self, raw: &Value) -> Slide {
        let object = raw.as_object();
        let image_keys = if self.image_synonyms {
            IMAGES_WITH_SYNONYM_KEYS
        } else {
            IMAGES_KEYS
        };

        Slide {
            order: to_order(field(object, ORDER_KEYS)),
            paragraphs: to_paragraphs(field(object, TEXT_KEYS)),
            images: to_images(field(object, image_keys)),
            background: to_background(field(object, BACKGROUND_KEYS)),
        }
    }
}

/// Sort by explicit order, falling back to the 1-based input position.
///
/// The sort is stable, so equal keys keep their input order.
fn sort_by_order<T>(items: Vec<T>, order: impl Fn(&T) -> Option<f64>) -> Vec<T> {
    let mut keyed: Vec<(f64, T)> = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| (order(&item).unwrap_or((idx + 1) as f64), item))
        .collect();

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn to_order(value: Option<&Value>) -> Option<f64> {
    match Shape::of(value) {
        Shape::Number(n) => Some(n),
        _ => None,
    }
}

fn to_paragraphs(value: Option<&Value>) -> Vec<String> {
    match Shape::of(value) {
        Shape::Text(s) => vec![s.to_string()],
        Shape::List(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn to_images(value: Option<&Value>) -> Vec<ImageCandidate> {
    match Shape::of(value) {
        Shape::List(items) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| image_from_entry(item, idx))
            .collect(),
        Shape::Object(object) if has_url(object) => vec![image_from_object(object, 0)],
        Shape::Text(url) => vec![image_from_url(url, 0)],
        _ => Vec::new(),
    }
}

/// One entry of an image array. Entries that are neither objects nor
/// strings are dropped.
fn image_from_entry(item: &Value, idx: usize) -> Option<ImageCandidate> {
    match Shape::of(Some(item)) {
        Shape::Object(object) => Some(image_from_object(object, idx)),
        Shape::Text(url) => Some(image_from_url(url, idx)),
        _ => None,
    }
}

fn image_from_object(object: &Map<String, Value>, idx: usize) -> ImageCandidate {
    let url = object
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let alt = match object.get("alt").and_then(Value::as_str) {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => default_alt(idx),
    };

    ImageCandidate {
        url: url.to_string(),
        coords: to_coords(object.get("coords")),
        alt,
    }
}

fn image_from_url(url: &str, idx: usize) -> ImageCandidate {
    ImageCandidate::new(url, default_alt(idx))
}

fn default_alt(idx: usize) -> String {
    format!("img-{}", idx + 1)
}

fn has_url(object: &Map<String, Value>) -> bool {
    object
        .get("url")
        .and_then(Value::as_str)
        .is_some_and(|url| !url.is_empty())
}

fn to_coords(value: Option<&Value>) -> [f64; 2] {
    match Shape::of(value) {
        Shape::List(items) => [coord(items.first()), coord(items.get(1))],
        _ => [0.0, 0.0],
    }
}

/// A single coordinate: numbers as-is, strings by their leading numeric
/// prefix, anything else 0.
fn coord(value: Option<&Value>) -> f64 {
    let parsed = match Shape::of(value) {
        Shape::Number(n) => n,
        Shape::Text(s) => parse_leading_float(s),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

fn parse_leading_float(s: &str) -> f64 {
    LEADING_FLOAT_REGEX
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Background candidates. Only a missing or `null` field is
/// [`Background::None`]; a present field with nothing usable becomes an empty
/// list, so it still counts as the slide's own background.
fn to_background(value: Option<&Value>) -> Background {
    match Shape::of(value) {
        Shape::Absent => Background::None,
        Shape::Text(url) => Background::Single(url.to_string()),
        Shape::Object(object) => object
            .get("url")
            .and_then(Value::as_str)
            .map(|url| Background::Single(url.to_string()))
            .unwrap_or_else(|| Background::List(Vec::new())),
        Shape::List(items) => Background::List(
            items
                .iter()
                .filter_map(|item| match Shape::of(Some(item)) {
                    Shape::Text(url) => Some(url.to_string()),
                    Shape::Object(object) => {
                        object.get("url").and_then(Value::as_str).map(str::to_string)
                    }
                    _ => None,
                })
                .collect(),
        ),
        Shape::Number(_) | Shape::Other => Background::List(Vec::new()),
    }
}
