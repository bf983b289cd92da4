//! Hit-test results and edit-handle tagging.
//!
//! The rendering host picks against every sub-layer. Picks that come from
//! an edit-handle sub-layer are tagged before they reach the controller so
//! cursor and drag logic can tell handle hits from geometry hits.

use geoedit_core::{EditHandle, EditHandleType, Feature};
use std::sync::Arc;

/// Sub-layer id suffix that marks an edit-handle layer.
pub const EDIT_HANDLES_SUFFIX: &str = "-edit-handles";

/// The object under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum PickedObject {
    Feature(Arc<Feature>),
    EditHandle(EditHandle),
    Empty,
}

/// A single hit-test result.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    /// Id of the sub-layer that produced the hit.
    pub layer_id: String,
    /// Index of the picked datum within that layer's data.
    pub index: Option<usize>,
    pub object: PickedObject,
    pub is_editing_handle: bool,
}

impl Pick {
    pub fn feature(layer_id: &str, index: usize, feature: Arc<Feature>) -> Self {
        Self {
            layer_id: layer_id.to_string(),
            index: Some(index),
            object: PickedObject::Feature(feature),
            is_editing_handle: false,
        }
    }

    /// A raw hit on a handle layer, not yet tagged.
    pub fn handle(layer_id: &str, index: usize, handle: EditHandle) -> Self {
        Self {
            layer_id: layer_id.to_string(),
            index: Some(index),
            object: PickedObject::EditHandle(handle),
            is_editing_handle: false,
        }
    }

    /// Handle type, for picks tagged as edit-handle hits only.
    pub fn handle_type(&self) -> Option<EditHandleType> {
        match &self.object {
            PickedObject::EditHandle(h) if self.is_editing_handle => Some(h.handle_type),
            _ => None,
        }
    }
}

/// Tag `pick` as an edit-handle hit when it came from a handle sub-layer.
#[must_use]
pub fn annotate_pick(mut pick: Pick, source_layer_id: &str) -> Pick {
    if source_layer_id.ends_with(EDIT_HANDLES_SUFFIX) {
        pick.is_editing_handle = true;
    }
    pick
}

/// First pick that hit an edit handle.
pub fn picked_edit_handle(picks: &[Pick]) -> Option<&Pick> {
    picks.iter().find(|p| p.is_editing_handle)
}
