//! Domain types for normalized slideshow documents.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// First run of four digits in a free-text date.
static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// A named, ordered collection of slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier used for selection.
    pub slug: String,

    /// Display title.
    pub title: String,

    /// Free-text date.
    pub date: String,

    /// Project-level background, used only under
    /// [`BackgroundScope::SlideThenProject`](crate::BackgroundScope).
    pub background: Background,

    /// Explicit sort key, if the document provided a numeric one.
    pub order: Option<f64>,

    /// Slides in display order.
    pub slides: Vec<Slide>,
}

impl Project {
    /// Create an empty project with the given slug and title.
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            date: String::new(),
            background: Background::None,
            order: None,
            slides: Vec::new(),
        }
    }

    /// Year extracted from the date, or an empty string.
    pub fn year(&self) -> &str {
        extract_year(&self.date)
    }

    /// The "title, year" label shown above the slide.
    pub fn heading(&self) -> String {
        let year = self.year();
        if year.is_empty() {
            self.title.clone()
        } else {
            format!("{}, {}", self.title, year)
        }
    }

    /// Number of slides in this project.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Extract the first run of four digits found anywhere in `date`.
pub fn extract_year(date: &str) -> &str {
    YEAR_REGEX.find(date).map(|m| m.as_str()).unwrap_or("")
}

/// A single slide within a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Explicit sort key, if the document provided a numeric one.
    pub order: Option<f64>,

    /// Text paragraphs, in order.
    pub paragraphs: Vec<String>,

    /// Image candidates, in document order. Not yet validated.
    pub images: Vec<ImageCandidate>,

    /// Slide background candidates. Not yet validated.
    pub background: Background,
}

/// A proposed image, positioned in viewport-relative units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// Candidate URL. Empty when the document gave none.
    pub url: String,

    /// Horizontal (vw) and vertical (vh) placement.
    pub coords: [f64; 2],

    /// Alternative text.
    pub alt: String,
}

impl ImageCandidate {
    /// Candidate at the origin with the given alt text.
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            coords: [0.0, 0.0],
            alt: alt.into(),
        }
    }
}

/// Background candidates for a slide or project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// No background field.
    #[default]
    None,
    /// A single candidate.
    Single(String),
    /// Several candidates, first valid wins. Empty when the field was
    /// present but held nothing usable.
    List(Vec<String>),
}

impl Background {
    /// Whether the document provided any background field.
    pub fn is_none(&self) -> bool {
        matches!(self, Background::None)
    }
}
