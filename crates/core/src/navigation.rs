//! Slide navigation state machine.
//!
//! [`NavigationController`] owns the normalized projects and the current
//! `(project, slide)` position. The position only changes through
//! [`go_prev`](NavigationController::go_prev) and
//! [`go_next`](NavigationController::go_next), and every reachable position
//! points at an existing slide.

use crate::error::{Error, Result};
use crate::input::Command;
use crate::types::{Project, Slide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens at the first/last slide of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationPolicy {
    /// Wrap across project boundaries, cycling through every project.
    #[default]
    Looping,
    /// Stay within the current project; the extremes are dead ends.
    Bounded,
}

/// Labels for the two navigation controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLabels {
    pub prev_slide: String,
    pub prev_project: String,
    pub next_slide: String,
    pub next_project: String,
}

impl Default for NavLabels {
    fn default() -> Self {
        Self {
            prev_slide: "página anterior".to_string(),
            prev_project: "proyecto anterior".to_string(),
            next_slide: "siguiente página".to_string(),
            next_project: "siguiente proyecto".to_string(),
        }
    }
}

/// 1-based slide counter for the active project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Label and availability of one navigation control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub label: String,
    pub disabled: bool,
}

/// Values derived from the current position, recomputed after every move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub counter: Counter,
    pub prev: ControlState,
    pub next: ControlState,
}

/// Owner of the navigation state.
#[derive(Debug, Clone)]
pub struct NavigationController {
    projects: Vec<Project>,
    policy: NavigationPolicy,
    labels: NavLabels,
    project_index: usize,
    slide_index: usize,
    /// Bumped on every position change.
    generation: u64,
}

impl NavigationController {
    /// Start navigation at the first slide of the first project.
    ///
    /// Projects without slides are skipped: they can never be shown, and
    /// keeping them would leave positions that point at nothing.
    ///
    /// # Errors
    /// Returns [`Error::NoSlides`] when no project has a slide.
    pub fn new(projects: Vec<Project>, policy: NavigationPolicy) -> Result<Self> {
        let total = projects.len();
        let projects: Vec<Project> = projects
            .into_iter()
            .filter(|project| {
                let keep = !project.slides.is_empty();
                if !keep {
                    log::warn!("Skipping project '{}': it has no slides", project.slug);
                }
                keep
            })
            .collect();

        if projects.is_empty() {
            return Err(Error::NoSlides);
        }

        log::debug!(
            "Navigation ready: {} of {} projects, {:?} policy",
            projects.len(),
            total,
            policy
        );

        Ok(Self {
            projects,
            policy,
            labels: NavLabels::default(),
            project_index: 0,
            slide_index: 0,
            generation: 0,
        })
    }

    /// Use custom control labels.
    pub fn with_labels(mut self, labels: NavLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Jump to a project by slug and an optional starting slide.
    ///
    /// An absent or unknown slug selects the first project. The slide index
    /// is clamped into the project's slide range.
    pub fn select(&mut self, slug: Option<&str>, start_slide: Option<i64>) {
        let project_index = slug
            .and_then(|slug| self.projects.iter().position(|p| p.slug == slug))
            .unwrap_or_else(|| {
                if let Some(slug) = slug {
                    log::warn!("Unknown project '{}', showing the first one", slug);
                }
                0
            });

        let last = self.projects[project_index].slides.len() - 1;
        let requested = start_slide.unwrap_or(0).max(0);
        let slide_index = usize::try_from(requested).unwrap_or(usize::MAX).min(last);

        self.move_to(project_index, slide_index);
    }

    /// Step back one slide. Returns whether the position changed.
    pub fn go_prev(&mut self) -> bool {
        if self.slide_index > 0 {
            return self.move_to(self.project_index, self.slide_index - 1);
        }

        match self.policy {
            NavigationPolicy::Looping => {
                let count = self.projects.len();
                let prev = (self.project_index + count - 1) % count;
                let last = self.projects[prev].slides.len() - 1;
                self.move_to(prev, last)
            }
            NavigationPolicy::Bounded => false,
        }
    }

    /// Step forward one slide. Returns whether the position changed.
    pub fn go_next(&mut self) -> bool {
        if !self.is_last_slide() {
            return self.move_to(self.project_index, self.slide_index + 1);
        }

        match self.policy {
            NavigationPolicy::Looping => {
                let next = (self.project_index + 1) % self.projects.len();
                self.move_to(next, 0)
            }
            NavigationPolicy::Bounded => false,
        }
    }

    /// Apply an input command.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Previous => self.go_prev(),
            Command::Next => self.go_next(),
        }
    }

    fn move_to(&mut self, project_index: usize, slide_index: usize) -> bool {
        if (project_index, slide_index) == self.position() {
            return false;
        }

        log::debug!(
            "Navigate ({}, {}) -> ({}, {})",
            self.project_index,
            self.slide_index,
            project_index,
            slide_index
        );
        self.project_index = project_index;
        self.slide_index = slide_index;
        self.generation += 1;
        true
    }

    fn is_first_slide(&self) -> bool {
        self.slide_index == 0
    }

    fn is_last_slide(&self) -> bool {
        self.slide_index + 1 >= self.current_project().slides.len()
    }

    /// Counter and control states for the current position.
    ///
    /// Under [`NavigationPolicy::Bounded`] the controls never cross projects,
    /// so they keep the within-project labels and are disabled at the
    /// extremes instead.
    pub fn display(&self) -> Display {
        let bounded = self.policy == NavigationPolicy::Bounded;
        let first = self.is_first_slide();
        let last = self.is_last_slide();

        let prev_label = if first && !bounded {
            &self.labels.prev_project
        } else {
            &self.labels.prev_slide
        };
        let next_label = if last && !bounded {
            &self.labels.next_project
        } else {
            &self.labels.next_slide
        };

        Display {
            counter: Counter {
                current: self.slide_index + 1,
                total: self.current_project().slides.len(),
            },
            prev: ControlState {
                label: prev_label.clone(),
                disabled: bounded && first,
            },
            next: ControlState {
                label: next_label.clone(),
                disabled: bounded && last,
            },
        }
    }

    /// Current `(project, slide)` indices, zero-based.
    pub fn position(&self) -> (usize, usize) {
        (self.project_index, self.slide_index)
    }

    pub fn current_project(&self) -> &Project {
        &self.projects[self.project_index]
    }

    pub fn current_slide(&self) -> &Slide {
        &self.current_project().slides[self.slide_index]
    }

    /// Token identifying the current position; changes on every move.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Navigable projects, in order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(slug: &str, slides: usize) -> Project {
        let mut project = Project::new(slug, slug);
        project.slides = (0..slides)
            .map(|i| Slide {
                paragraphs: vec![format!("{}-{}", slug, i + 1)],
                ..Slide::default()
            })
            .collect();
        project
    }

    fn controller(counts: &[usize], policy: NavigationPolicy) -> NavigationController {
        let projects = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| project(&format!("p{}", i), n))
            .collect();
        NavigationController::new(projects, policy).unwrap()
    }

    #[test]
    fn test_starts_at_origin() {
        let nav = controller(&[3], NavigationPolicy::Looping);
        assert_eq!(nav.position(), (0, 0));
        assert_eq!(nav.current_slide().paragraphs[0], "p0-1");
        assert_eq!(nav.generation(), 0);
    }

    #[test]
    fn test_looping_next_wraps_across_projects() {
        let mut nav = controller(&[2, 1], NavigationPolicy::Looping);
        nav.select(None, Some(1));
        assert_eq!(nav.position(), (0, 1));

        assert!(nav.go_next());
        assert_eq!(nav.position(), (1, 0));

        assert!(nav.go_next());
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_looping_prev_wraps_to_last_slide() {
        let mut nav = controller(&[2, 3], NavigationPolicy::Looping);
        assert!(nav.go_prev());
        assert_eq!(nav.position(), (1, 2));

        assert!(nav.go_prev());
        assert_eq!(nav.position(), (1, 1));
    }

    #[test]
    fn test_looping_full_cycle_returns_home() {
        let mut nav = controller(&[2, 1, 3], NavigationPolicy::Looping);
        for _ in 0..6 {
            assert!(nav.go_next());
        }
        assert_eq!(nav.position(), (0, 0));
        for _ in 0..6 {
            assert!(nav.go_prev());
        }
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_bounded_extremes_are_no_ops() {
        let mut nav = controller(&[3, 2], NavigationPolicy::Bounded);
        assert!(!nav.go_prev());
        assert_eq!(nav.position(), (0, 0));

        assert!(nav.go_next());
        assert!(nav.go_next());
        assert_eq!(nav.position(), (0, 2));
        assert!(!nav.go_next());
        assert_eq!(nav.position(), (0, 2));
        assert_eq!(nav.generation(), 2);
    }

    #[test]
    fn test_bounded_disabled_flags() {
        let mut nav = controller(&[3], NavigationPolicy::Bounded);
        let display = nav.display();
        assert!(display.prev.disabled);
        assert!(!display.next.disabled);

        nav.go_next();
        let display = nav.display();
        assert!(!display.prev.disabled);
        assert!(!display.next.disabled);

        nav.go_next();
        let display = nav.display();
        assert!(!display.prev.disabled);
        assert!(display.next.disabled);
    }

    #[test]
    fn test_bounded_keeps_slide_labels_at_extremes() {
        let mut nav = controller(&[2, 3], NavigationPolicy::Bounded);
        let display = nav.display();
        assert_eq!(display.prev.label, "página anterior");
        assert!(display.prev.disabled);

        nav.go_next();
        let display = nav.display();
        assert_eq!(display.next.label, "siguiente página");
        assert!(display.next.disabled);
    }

    #[test]
    fn test_single_slide_bounded_is_inert() {
        let mut nav = controller(&[1], NavigationPolicy::Bounded);
        assert!(!nav.go_prev());
        assert!(!nav.go_next());
        let display = nav.display();
        assert!(display.prev.disabled && display.next.disabled);
    }

    #[test]
    fn test_single_slide_looping_reports_unchanged() {
        let mut nav = controller(&[1], NavigationPolicy::Looping);
        assert!(!nav.go_next());
        assert!(!nav.go_prev());
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_looping_never_disables() {
        let nav = controller(&[1, 1], NavigationPolicy::Looping);
        let display = nav.display();
        assert!(!display.prev.disabled);
        assert!(!display.next.disabled);
    }

    #[test]
    fn test_labels_follow_slide_position() {
        let mut nav = controller(&[3, 1], NavigationPolicy::Looping);
        let display = nav.display();
        assert_eq!(display.prev.label, "proyecto anterior");
        assert_eq!(display.next.label, "siguiente página");
        assert_eq!(display.counter.to_string(), "1/3");

        nav.go_next();
        let display = nav.display();
        assert_eq!(display.prev.label, "página anterior");
        assert_eq!(display.next.label, "siguiente página");

        nav.go_next();
        let display = nav.display();
        assert_eq!(display.next.label, "siguiente proyecto");
        assert_eq!(display.counter, Counter { current: 3, total: 3 });

        nav.go_next();
        let display = nav.display();
        assert_eq!(display.prev.label, "proyecto anterior");
        assert_eq!(display.next.label, "siguiente proyecto");
        assert_eq!(display.counter.to_string(), "1/1");
    }

    #[test]
    fn test_custom_labels() {
        let labels = NavLabels {
            prev_slide: "back".into(),
            prev_project: "previous project".into(),
            next_slide: "forward".into(),
            next_project: "next project".into(),
        };
        let nav = controller(&[2], NavigationPolicy::Looping).with_labels(labels);
        let display = nav.display();
        assert_eq!(display.prev.label, "previous project");
        assert_eq!(display.next.label, "forward");
    }

    #[test]
    fn test_empty_projects_are_skipped() {
        let projects = vec![project("empty", 0), project("full", 2), project("void", 0)];
        let mut nav = NavigationController::new(projects, NavigationPolicy::Looping).unwrap();
        assert_eq!(nav.projects().len(), 1);
        assert_eq!(nav.current_project().slug, "full");

        nav.go_next();
        assert!(nav.go_next());
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_no_slides_is_an_error() {
        let result = NavigationController::new(vec![project("empty", 0)], NavigationPolicy::Looping);
        assert!(matches!(result, Err(Error::NoSlides)));

        let result = NavigationController::new(Vec::new(), NavigationPolicy::Bounded);
        assert!(matches!(result, Err(Error::NoSlides)));
    }

    #[test]
    fn test_select_by_slug() {
        let mut nav = controller(&[2, 4], NavigationPolicy::Bounded);
        nav.select(Some("p1"), Some(2));
        assert_eq!(nav.position(), (1, 2));
        assert_eq!(nav.display().counter.to_string(), "3/4");
    }

    #[test]
    fn test_select_unknown_slug_falls_back_to_first() {
        let mut nav = controller(&[2, 4], NavigationPolicy::Bounded);
        nav.select(Some("p1"), None);
        nav.select(Some("missing"), None);
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_select_clamps_slide() {
        let mut nav = controller(&[3], NavigationPolicy::Bounded);
        nav.select(None, Some(99));
        assert_eq!(nav.position(), (0, 2));
        nav.select(None, Some(-4));
        assert_eq!(nav.position(), (0, 0));
    }

    #[test]
    fn test_generation_bumps_only_on_change() {
        let mut nav = controller(&[2], NavigationPolicy::Bounded);
        nav.go_prev();
        assert_eq!(nav.generation(), 0);
        nav.go_next();
        assert_eq!(nav.generation(), 1);
        nav.select(None, Some(1));
        assert_eq!(nav.generation(), 1);
    }

    #[test]
    fn test_apply_commands() {
        let mut nav = controller(&[2], NavigationPolicy::Bounded);
        assert!(nav.apply(Command::Next));
        assert!(nav.apply(Command::Previous));
        assert!(!nav.apply(Command::Previous));
    }
}
