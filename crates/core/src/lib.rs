//! Normalization, resource resolution and navigation for multi-project
//! slideshows described by a single JSON document.

pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod navigation;
pub mod normalize;
pub mod resolve;
mod shape;
pub mod types;
pub mod validation;
pub mod view;

pub use config::ViewerOptions;
pub use error::{Error, Result};
pub use input::Command;
pub use navigation::{ControlState, Counter, Display, NavLabels, NavigationController, NavigationPolicy};
pub use normalize::Normalizer;
pub use resolve::{is_valid_image_path, BackgroundScope, ResourceResolver, ValidImage};
pub use types::{extract_year, Background, ImageCandidate, Project, Slide};
pub use validation::{BackgroundSlot, ValidationRequest};
pub use view::{SlideView, ViewFormatter};
