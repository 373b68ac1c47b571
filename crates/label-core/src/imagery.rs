//! Base-imagery catalog.
//!
//! Tracks the ordered list of imagery descriptors and the index of the layer
//! currently selected for display. The engine does not interpret layer
//! contents; tile fetching and rendering belong to the map collaborator.

use serde::{Deserialize, Serialize};

/// One selectable base-imagery layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageryLayer {
    /// Stable layer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Inclusive start of the composite date range (ISO date string).
    pub date_start: String,
    /// Inclusive end of the composite date range (ISO date string).
    pub date_end: String,
    /// Tile source URL template, empty when not yet resolved.
    #[serde(default)]
    pub source_url: String,
}

/// Ordered imagery layers plus the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageryCatalog {
    #[serde(default)]
    layers: Vec<ImageryLayer>,
    #[serde(default)]
    current_index: usize,
}

impl ImageryCatalog {
    /// Build a catalog with the selection on the first layer.
    pub fn new(layers: Vec<ImageryLayer>) -> Self {
        Self {
            layers,
            current_index: 0,
        }
    }

    /// The ordered layer list.
    pub fn layers(&self) -> &[ImageryLayer] {
        &self.layers
    }

    /// Index of the currently selected layer.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The currently selected layer, or `None` for an empty catalog.
    pub fn current(&self) -> Option<&ImageryLayer> {
        self.layers.get(self.current_index)
    }

    /// Select the layer at `index`. Out-of-range selections are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.layers.len() {
            self.current_index = index;
        }
    }

    /// Advance the selection to the next layer, wrapping at the end.
    pub fn cycle(&mut self) {
        if !self.layers.is_empty() {
            self.current_index = (self.current_index + 1) % self.layers.len();
        }
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` when the catalog holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for ImageryCatalog {
    /// Built-in Planet monthly composites used when no configuration is
    /// supplied.
    fn default() -> Self {
        fn layer(id: &str, name: &str, start: &str, end: &str) -> ImageryLayer {
            ImageryLayer {
                id: id.to_string(),
                name: name.to_string(),
                date_start: start.to_string(),
                date_end: end.to_string(),
                source_url: String::new(),
            }
        }

        Self::new(vec![
            layer("P20240610", "Planet 2024-06-10", "2024-05-27", "2024-06-10"),
            layer("P20240710", "Planet 2024-07-10", "2024-06-27", "2024-07-10"),
            layer("P20240810", "Planet 2024-08-10", "2024-07-27", "2024-08-10"),
            layer("P20240910", "Planet 2024-09-10", "2024-08-27", "2024-09-10"),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
