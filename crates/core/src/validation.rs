//! Generation-guarded background validation.
//!
//! Before a background is shown the host may try to load it. Loading is
//! asynchronous and a viewer can move on before it finishes, so every request
//! carries the navigation generation it was issued for. A completion is only
//! applied when its generation is still the newest one; anything older is
//! dropped.

/// A pending load check for one background URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub generation: u64,
    pub url: String,
}

/// The displayed background and the newest requested generation.
#[derive(Debug, Clone, Default)]
pub struct BackgroundSlot {
    generation: u64,
    applied: Option<String>,
}

impl BackgroundSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start validating `url` for the given navigation generation.
    ///
    /// Supersedes every earlier request. With no URL the slot is cleared
    /// right away and there is nothing to validate.
    pub fn request(&mut self, generation: u64, url: Option<String>) -> Option<ValidationRequest> {
        self.generation = generation;
        match url {
            Some(url) => Some(ValidationRequest { generation, url }),
            None => {
                self.applied = None;
                None
            }
        }
    }

    /// Finish a validation. Returns whether the result was applied.
    pub fn complete(&mut self, request: &ValidationRequest, loaded: bool) -> bool {
        if request.generation != self.generation {
            log::debug!(
                "[BG] Ignoring stale validation for {} (generation {} < {})",
                request.url,
                request.generation,
                self.generation
            );
            return false;
        }

        if loaded {
            self.applied = Some(request.url.clone());
        } else {
            log::warn!("[BG] Could not load background (discarded): {}", request.url);
            self.applied = None;
        }
        true
    }

    /// The background currently on display.
    pub fn applied(&self) -> Option<&str> {
        self.applied.as_deref()
    }
}
