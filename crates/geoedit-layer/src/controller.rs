//! Interaction controller: pointer events → engine calls → derived state.
//!
//! Each handler is a transition over [`ControllerState`] that returns the
//! [`Effects`] the host must apply. Within a handler the order is fixed:
//!
//! 1. forward the event to the engine,
//! 2. refresh the tentative feature, then the edit handles,
//! 3. emit the engine's edit action, if any.
//!
//! Derived state is swapped only when the engine reports a change, so
//! repeated no-op input never invalidates the layer.

use crate::cursor::{Cursor, resolve_cursor};
use crate::engine::FeatureEditingEngine;
use crate::input::{ClickEvent, DragEvent, PointerEvent, PointerMoveEvent};
use crate::layers::{LayerDescriptor, compose_layers};
use crate::pick::{Pick, annotate_pick};
use crate::settings::LayerProps;
use geoedit_core::{EditAction, EditHandle, Feature, Position, Refresh, selected_features};
use std::sync::Arc;

/// Callback receiving every completed edit.
pub type OnEdit = Box<dyn FnMut(&EditAction)>;

/// Something that can stop propagation of the host's source input event.
pub trait SourceEvent {
    fn stop_propagation(&mut self);
}

/// Side effects of one transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// The edit reported by the engine, already delivered to `on_edit`.
    pub edit_action: Option<EditAction>,
    /// The source event must not reach the map (handle drag in progress).
    pub stop_propagation: bool,
    /// Derived state changed; the layer needs a redraw.
    pub invalidated: bool,
}

impl Effects {
    /// Apply `stop_propagation` to the host's source event.
    pub fn apply_to(&self, source: &mut impl SourceEvent) {
        if self.stop_propagation {
            source.stop_propagation();
        }
    }
}

/// A drag gesture the controller has seen start but not stop.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub start_picks: Vec<Pick>,
    pub start_ground_coords: Position,
}

/// Controller-owned derived state. Every field is replaced, never patched.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub(crate) tentative_feature: Option<Arc<Feature>>,
    pub(crate) edit_handles: Arc<[EditHandle]>,
    pub(crate) selected_features: Vec<Option<Arc<Feature>>>,
    pub(crate) pointer_move_picks: Option<Vec<Pick>>,
    pub(crate) drag: Option<DragGesture>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            tentative_feature: None,
            edit_handles: Arc::from(Vec::new()),
            selected_features: Vec::new(),
            pointer_move_picks: None,
            drag: None,
        }
    }
}

impl ControllerState {
    pub fn tentative_feature(&self) -> Option<&Arc<Feature>> {
        self.tentative_feature.as_ref()
    }

    pub fn edit_handles(&self) -> &Arc<[EditHandle]> {
        &self.edit_handles
    }

    /// One slot per selected index; `None` for out-of-range indexes.
    pub fn selected_features(&self) -> &[Option<Arc<Feature>>] {
        &self.selected_features
    }

    /// Picks from the last pointer move, kept for cursor resolution.
    pub fn pointer_move_picks(&self) -> Option<&[Pick]> {
        self.pointer_move_picks.as_deref()
    }

    pub fn drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }
}

/// Drives a [`FeatureEditingEngine`] from host pointer events.
pub struct InteractionController<E> {
    engine: E,
    props: LayerProps,
    state: ControllerState,
    on_edit: Option<OnEdit>,
}

impl<E: FeatureEditingEngine> InteractionController<E> {
    /// Create a controller and push the initial props into the engine.
    pub fn new(mut engine: E, props: LayerProps) -> Self {
        engine.set_feature_collection(Arc::clone(&props.data));
        let mut controller = Self {
            engine,
            props,
            state: ControllerState::default(),
            on_edit: None,
        };
        controller.push_props(&mut Effects::default());
        controller.state.selected_features = controller.resolve_selection();
        controller
    }

    pub fn with_on_edit(mut self, on_edit: impl FnMut(&EditAction) + 'static) -> Self {
        self.on_edit = Some(Box::new(on_edit));
        self
    }

    pub fn props(&self) -> &LayerProps {
        &self.props
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    // ─── Prop changes ────────────────────────────────────────────────────

    /// Replace the props for the next render.
    ///
    /// A new `data` collection (by identity) is handed to the engine first.
    /// Any change to data, mode, mode config, selection or draw order is
    /// then pushed into the engine and derived state refreshed.
    pub fn set_props(&mut self, props: LayerProps) -> Effects {
        let old = std::mem::replace(&mut self.props, props);
        let new = &self.props;

        let data_changed = !Arc::ptr_eq(&old.data, &new.data);
        let props_changed = data_changed
            || old.mode != new.mode
            || old.mode_config != new.mode_config
            || old.selected_feature_indexes != new.selected_feature_indexes
            || old.settings.draw_at_front != new.settings.draw_at_front;

        let mut fx = Effects::default();
        if data_changed {
            log::debug!("data replaced ({} features)", new.data.len());
            self.engine.set_feature_collection(Arc::clone(&new.data));
        }
        if props_changed {
            self.push_props(&mut fx);
            fx.invalidated = true;
        }
        if old.settings != self.props.settings {
            fx.invalidated = true;
        }
        self.state.selected_features = self.resolve_selection();
        fx
    }

    fn push_props(&mut self, fx: &mut Effects) {
        let props = &self.props;
        log::debug!(
            "pushing props: mode={} selection={:?} draw_at_front={}",
            props.mode,
            props.selected_feature_indexes,
            props.settings.draw_at_front
        );
        self.engine.set_mode(props.mode);
        self.engine.set_mode_config(props.mode_config.as_ref());
        self.engine
            .set_selected_feature_indexes(props.selected_feature_indexes.as_deref().unwrap_or(&[]));
        self.engine.set_draw_at_front(props.settings.draw_at_front);
        self.refresh_tentative_feature(fx);
        self.refresh_edit_handles(None, None, fx);
    }

    fn resolve_selection(&self) -> Vec<Option<Arc<Feature>>> {
        selected_features(
            Some(self.props.data.as_ref()),
            self.props.selected_feature_indexes.as_deref(),
        )
    }

    // ─── Pointer events ──────────────────────────────────────────────────

    /// Dispatch a normalized pointer event to its handler.
    pub fn handle(&mut self, event: &PointerEvent) -> Effects {
        match event {
            PointerEvent::Click(e) => self.on_click(e),
            PointerEvent::StartDragging(e) => self.on_start_dragging(e),
            PointerEvent::StopDragging(e) => self.on_stop_dragging(e),
            PointerEvent::PointerMove(e) => self.on_pointer_move(e),
            PointerEvent::DragCancelled => self.cancel_drag(),
        }
    }

    pub fn on_click(&mut self, event: &ClickEvent) -> Effects {
        log::trace!("click at {:?} ({} picks)", event.ground_coords, event.picks.len());
        let action = self.engine.on_click(&event.ground_coords, &event.picks);
        self.finish(action, false, None)
    }

    pub fn on_start_dragging(&mut self, event: &DragEvent) -> Effects {
        log::trace!("drag start at {:?}", event.ground_coords);
        let mut fx = Effects::default();
        if self.state.drag.is_some() {
            log::warn!("drag started while a previous drag was still active; aborting it");
            self.abort_drag(&mut fx);
        }

        let action = self.engine.on_start_dragging(&event.picks, &event.ground_coords);
        self.state.drag = Some(DragGesture {
            start_picks: event.picks.clone(),
            start_ground_coords: event.drag_start_ground_coords,
        });
        let next = self.finish(action, false, None);
        Effects {
            invalidated: fx.invalidated || next.invalidated,
            ..next
        }
    }

    pub fn on_stop_dragging(&mut self, event: &DragEvent) -> Effects {
        log::trace!("drag stop at {:?}", event.ground_coords);
        self.state.drag = None;
        let action = self.engine.on_stop_dragging(&event.picks, &event.ground_coords);
        self.finish(action, false, None)
    }

    /// Highest-frequency event. Always records the picks for the cursor.
    pub fn on_pointer_move(&mut self, event: &PointerMoveEvent) -> Effects {
        self.state.pointer_move_picks = Some(event.picks.clone());

        // A tracked gesture only stands in for missing drag-start data while
        // the host still reports a drag.
        let tracked = self.state.drag.as_ref().filter(|_| event.is_dragging);
        let drag_start_picks = event
            .drag_start_picks
            .as_deref()
            .or(tracked.map(|d| d.start_picks.as_slice()));
        let drag_start_ground_coords = event
            .drag_start_ground_coords
            .as_ref()
            .or(tracked.map(|d| &d.start_ground_coords));

        let outcome = self.engine.on_pointer_move(
            &event.ground_coords,
            &event.picks,
            event.is_dragging,
            drag_start_picks,
            drag_start_ground_coords,
        );
        if outcome.cancel_map_pan {
            log::trace!("pointer move drags an edit handle; cancelling map pan");
        }
        self.finish(
            outcome.edit_action,
            outcome.cancel_map_pan,
            Some((event.picks.as_slice(), &event.ground_coords)),
        )
    }

    /// Abort a drag the host lost without a stop event.
    ///
    /// No edit action is ever emitted. A no-op when no drag is tracked.
    pub fn cancel_drag(&mut self) -> Effects {
        let mut fx = Effects::default();
        if self.state.drag.is_some() {
            log::warn!("drag interrupted without a stop event; aborting");
            self.abort_drag(&mut fx);
        }
        fx
    }

    fn abort_drag(&mut self, fx: &mut Effects) {
        self.state.drag = None;
        self.state.pointer_move_picks = None;
        self.engine.cancel_dragging();
        self.refresh_tentative_feature(fx);
        self.refresh_edit_handles(None, None, fx);
    }

    /// Refresh derived state, then emit the edit action.
    fn finish(
        &mut self,
        action: Option<EditAction>,
        stop_propagation: bool,
        hover: Option<(&[Pick], &Position)>,
    ) -> Effects {
        let mut fx = Effects {
            stop_propagation,
            ..Effects::default()
        };
        self.refresh_tentative_feature(&mut fx);
        let (picks, ground_coords) = hover.unzip();
        self.refresh_edit_handles(picks, ground_coords, &mut fx);

        if let Some(action) = action {
            log::debug!(
                "edit: {} on features {:?}",
                action.edit_type,
                action.feature_indexes
            );
            if let Some(on_edit) = self.on_edit.as_mut() {
                on_edit(&action);
            }
            fx.edit_action = Some(action);
        }
        fx
    }

    // ─── Derived state ───────────────────────────────────────────────────

    /// Engines may report `Changed` with the value they handed out last
    /// time; only a new reference replaces the cache.
    fn refresh_tentative_feature(&mut self, fx: &mut Effects) {
        let Some(next) = self.engine.tentative_feature().changed() else {
            return;
        };
        let current = self.state.tentative_feature.as_ref();
        match Refresh::by_optional_identity(current, next.as_ref()) {
            Refresh::Changed(feature) => {
                log::trace!("tentative feature changed (present: {})", feature.is_some());
                self.state.tentative_feature = feature;
                fx.invalidated = true;
            }
            Refresh::Unchanged => log::trace!("tentative feature reported changed but identical"),
        }
    }

    fn refresh_edit_handles(
        &mut self,
        picks: Option<&[Pick]>,
        ground_coords: Option<&Position>,
        fx: &mut Effects,
    ) {
        let Some(next) = self.engine.edit_handles(picks, ground_coords).changed() else {
            return;
        };
        match Refresh::by_identity(&self.state.edit_handles, &next) {
            Refresh::Changed(handles) => {
                log::trace!("edit handles changed ({} handles)", handles.len());
                self.state.edit_handles = handles;
                fx.invalidated = true;
            }
            Refresh::Unchanged => log::trace!("edit handles reported changed but identical"),
        }
    }

    // ─── Host queries ────────────────────────────────────────────────────

    /// Cursor for the current mode and last hover picks.
    pub fn cursor(&self, is_dragging: bool) -> Cursor {
        resolve_cursor(self.props.mode, is_dragging, self.state.pointer_move_picks())
    }

    /// Sub-layers to draw for the current props and state.
    pub fn layers(&self) -> Vec<LayerDescriptor> {
        compose_layers(&self.props, &self.state)
    }

    /// Tag a raw host pick with its edit-handle flag.
    pub fn picking_info(&self, pick: Pick, source_layer_id: &str) -> Pick {
        annotate_pick(pick, source_layer_id)
    }
}
