//! Scroll reveal
//!
//! Elements marked for reveal animate in once their top edge scrolls above
//! a line `offset` pixels from the bottom of the viewport. A revealed element
//! stays revealed.

use rustc_hash::FxHashSet;

/// Tracks which elements have been revealed.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    offset: f64,
    revealed: FxHashSet<usize>,
}

impl ScrollReveal {
    /// Reveal elements once they are `offset` pixels inside the viewport.
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            revealed: FxHashSet::default(),
        }
    }

    /// Whether an element whose top is at `element_top` (relative to the
    /// viewport) is far enough in to be revealed.
    pub fn is_visible(&self, element_top: f64, viewport_height: f64) -> bool {
        element_top < viewport_height - self.offset
    }

    /// Evaluate a scroll position. `element_tops` holds each element's top,
    /// indexed by element.
    ///
    /// Returns the indexes revealed by this call, in ascending order.
    pub fn on_scroll(&mut self, element_tops: &[f64], viewport_height: f64) -> Vec<usize> {
        let mut newly_revealed = Vec::new();

        for (index, top) in element_tops.iter().enumerate() {
            if self.is_visible(*top, viewport_height) && self.revealed.insert(index) {
                newly_revealed.push(index);
            }
        }

        newly_revealed
    }

    /// Whether the element at `index` has been revealed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }
}
