//! Plain-text view of the current slide.
//!
//! Collects everything a renderer needs for the current position into a
//! [`SlideView`] and formats it as text, one block per slide.

use crate::navigation::{ControlState, NavigationController};
use crate::resolve::{ResourceResolver, ValidImage};
use serde::{Deserialize, Serialize};

/// Everything shown for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideView {
    pub project: String,
    /// "title, year" label.
    pub heading: String,
    pub paragraphs: Vec<String>,
    /// "X/Y" counter.
    pub counter: String,
    pub background: Option<String>,
    pub images: Vec<ValidImage>,
    pub prev: ControlState,
    pub next: ControlState,
}

impl SlideView {
    /// Capture the view for the controller's current position.
    ///
    /// `background` is the background actually on display; pass the
    /// resolver's pick when no load check is performed.
    pub fn capture(
        nav: &NavigationController,
        resolver: &ResourceResolver,
        background: Option<String>,
    ) -> Self {
        let project = nav.current_project();
        let slide = nav.current_slide();
        let display = nav.display();

        Self {
            project: project.slug.clone(),
            heading: project.heading(),
            paragraphs: slide.paragraphs.clone(),
            counter: display.counter.to_string(),
            background,
            images: resolver.resolve_images(slide),
            prev: display.prev,
            next: display.next,
        }
    }
}

/// Formatter for text output of slide views.
#[derive(Debug, Clone)]
pub struct ViewFormatter {
    /// Whether background and image lines are included.
    show_resources: bool,
}

impl Default for ViewFormatter {
    fn default() -> Self {
        Self {
            show_resources: true,
        }
    }
}

impl ViewFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether background and image lines are printed.
    pub fn with_resources(mut self, show: bool) -> Self {
        self.show_resources = show;
        self
    }

    /// Format a view as text.
    ///
    /// # Example output
    /// ```text
    /// Casa Azul, 2018    1/3
    ///
    /// Primera planta.
    ///
    /// background: fondos/casa.jpg
    /// image: planos/a.png at 10vw 20vh (img-1)
    ///
    /// [proyecto anterior]    [siguiente página]
    /// ```
    pub fn format(&self, view: &SlideView) -> String {
        let mut blocks = vec![format!("{}    {}", view.heading, view.counter)];

        if !view.paragraphs.is_empty() {
            blocks.push(view.paragraphs.join("\n"));
        }

        if self.show_resources {
            let mut lines = Vec::new();
            if let Some(background) = &view.background {
                lines.push(format!("background: {}", background));
            }
            for image in &view.images {
                lines.push(format!(
                    "image: {} at {}vw {}vh ({})",
                    image.url, image.left, image.top, image.alt
                ));
            }
            if !lines.is_empty() {
                blocks.push(lines.join("\n"));
            }
        }

        blocks.push(format!(
            "{}    {}",
            format_control(&view.prev),
            format_control(&view.next)
        ));

        blocks.join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, view: &SlideView) -> String {
        format!("{}\n", self.format(view))
    }
}

fn format_control(control: &ControlState) -> String {
    if control.disabled {
        format!("({})", control.label)
    } else {
        format!("[{}]", control.label)
    }
}
