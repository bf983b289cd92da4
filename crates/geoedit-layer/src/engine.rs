//! The feature-editing engine seam.
//!
//! The engine owns the authoritative feature collection, the mode and its
//! configuration, and every geometry algorithm (vertex insertion, handle
//! dragging, shape drawing). The controller only forwards input to it and
//! mirrors what it reports.

use crate::pick::Pick;
use geoedit_core::{EditAction, EditHandle, Feature, FeatureCollection, Mode, Position, Refresh};
use serde_json::Value;
use std::sync::Arc;

/// What the engine reports for a pointer move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerMoveOutcome {
    pub edit_action: Option<EditAction>,
    /// The move is manipulating an edit handle; the map must not pan.
    pub cancel_map_pan: bool,
}

/// Trait for engines that apply edit modes to a feature collection.
///
/// Recompute calls (`tentative_feature`, `edit_handles`) report
/// [`Refresh::Unchanged`] when the value the engine handed out last time is
/// still current.
pub trait FeatureEditingEngine {
    fn set_feature_collection(&mut self, data: Arc<FeatureCollection>);
    fn set_mode(&mut self, mode: Mode);
    fn set_mode_config(&mut self, config: Option<&Value>);
    fn set_selected_feature_indexes(&mut self, indexes: &[usize]);
    fn set_draw_at_front(&mut self, draw_at_front: bool);

    fn tentative_feature(&mut self) -> Refresh<Option<Arc<Feature>>>;
    fn edit_handles(
        &mut self,
        picks: Option<&[Pick]>,
        ground_coords: Option<&Position>,
    ) -> Refresh<Arc<[EditHandle]>>;

    fn on_click(&mut self, ground_coords: &Position, picks: &[Pick]) -> Option<EditAction>;
    fn on_start_dragging(&mut self, picks: &[Pick], ground_coords: &Position) -> Option<EditAction>;
    fn on_stop_dragging(&mut self, picks: &[Pick], ground_coords: &Position) -> Option<EditAction>;
    fn on_pointer_move(
        &mut self,
        ground_coords: &Position,
        picks: &[Pick],
        is_dragging: bool,
        drag_start_picks: Option<&[Pick]>,
        drag_start_ground_coords: Option<&Position>,
    ) -> PointerMoveOutcome;

    /// Drop any in-progress drag without committing it.
    fn cancel_dragging(&mut self) {}
}
