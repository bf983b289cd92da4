//! Sub-layer composition.
//!
//! Turns the current props and controller state into an ordered list of
//! drawable layer descriptors:
//!
//! | Order | Layer | Emitted when |
//! |-------|-------|--------------|
//! | 1 | base geometry (`-geojson`) | always |
//! | 2 | tentative feature (`-tentative`) | a tentative feature exists |
//! | 3 | edit handles (`-point-edit-handles` / `-icon-edit-handles`) | handle set non-empty |
//!
//! Drawing is the rendering host's job; descriptors only carry data,
//! settings and accessors.

use crate::accessor::{
    HandleAccessor, LayerAccessor, SelectionContext, compose_selection_aware, compose_tentative,
};
use crate::controller::ControllerState;
use crate::pick::EDIT_HANDLES_SUFFIX;
use crate::settings::{EditHandleKind, LayerProps};
use geoedit_core::{EditHandle, Feature, FeatureCollection, Mode, Rgba};
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

pub const GEOJSON_LAYER: &str = "geojson";
pub const TENTATIVE_LAYER: &str = "tentative";

/// Accessors on the base layer that depend on selection and mode.
pub const SELECTION_AWARE_ACCESSORS: [&str; 5] = [
    "get_line_color",
    "get_fill_color",
    "get_radius",
    "get_line_width",
    "get_line_dash_array",
];

/// Values whose change forces the host to re-evaluate an accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTrigger {
    pub selected_feature_indexes: Option<Arc<[usize]>>,
    pub mode: Mode,
}

/// Geometry source of a GeoJSON layer.
#[derive(Debug, Clone)]
pub enum GeoJsonData {
    Collection(Arc<FeatureCollection>),
    Single(Arc<Feature>),
}

/// A GeoJSON layer (base geometry or tentative feature).
#[derive(Debug, Clone)]
pub struct GeoJsonLayer {
    pub id: String,
    pub data: GeoJsonData,
    pub pickable: bool,
    pub auto_highlight: bool,
    pub fp64: bool,
    pub filled: bool,
    pub stroked: bool,
    pub line_width_scale: f32,
    pub line_width_min_pixels: f32,
    pub line_width_max_pixels: f32,
    pub line_joint_rounded: bool,
    pub line_miter_limit: f32,
    pub point_radius_scale: f32,
    pub point_radius_min_pixels: f32,
    pub point_radius_max_pixels: f32,
    pub point_outline: bool,
    pub point_stroke_width: f32,
    pub line_dash_justified: bool,

    pub line_color: LayerAccessor<Feature, Rgba>,
    pub fill_color: LayerAccessor<Feature, Rgba>,
    pub radius: LayerAccessor<Feature, f32>,
    pub line_width: LayerAccessor<Feature, f32>,
    pub line_dash_array: LayerAccessor<Feature, [f32; 2]>,

    /// Accessor name → trigger values. Empty for the tentative layer.
    pub update_triggers: SmallVec<[(&'static str, UpdateTrigger); 5]>,
}

/// Edit handles as circle markers.
#[derive(Debug, Clone)]
pub struct PointHandleLayer {
    pub id: String,
    pub data: Arc<[EditHandle]>,
    pub pickable: bool,
    pub fp64: bool,
    pub radius_scale: f32,
    pub outline: bool,
    pub stroke_width: f32,
    pub radius_min_pixels: f32,
    pub radius_max_pixels: f32,
    pub radius: HandleAccessor<f32>,
    pub color: HandleAccessor<Rgba>,
    pub parameters: Option<Value>,
}

/// Edit handles as atlas icons.
#[derive(Debug, Clone)]
pub struct IconHandleLayer {
    pub id: String,
    pub data: Arc<[EditHandle]>,
    pub pickable: bool,
    pub fp64: bool,
    pub icon_atlas: Option<String>,
    pub icon_mapping: Option<Value>,
    pub size_scale: f32,
    pub icon: HandleAccessor<String>,
    pub size: HandleAccessor<f32>,
    pub color: HandleAccessor<Rgba>,
    pub angle: HandleAccessor<f32>,
    pub parameters: Option<Value>,
}

/// One drawable sub-layer.
#[derive(Debug, Clone)]
pub enum LayerDescriptor {
    Geometry(GeoJsonLayer),
    Tentative(GeoJsonLayer),
    PointHandles(PointHandleLayer),
    IconHandles(IconHandleLayer),
}

impl LayerDescriptor {
    pub fn id(&self) -> &str {
        match self {
            Self::Geometry(l) | Self::Tentative(l) => &l.id,
            Self::PointHandles(l) => &l.id,
            Self::IconHandles(l) => &l.id,
        }
    }
}

/// Assemble the sub-layers for the current props and state.
#[must_use]
pub fn compose_layers(props: &LayerProps, state: &ControllerState) -> Vec<LayerDescriptor> {
    let mut layers = vec![LayerDescriptor::Geometry(geometry_layer(props))];
    layers.extend(tentative_layer(props, state).map(LayerDescriptor::Tentative));
    layers.extend(edit_handle_layer(props, state));
    log::trace!(
        "composed {} layers: {:?}",
        layers.len(),
        layers.iter().map(LayerDescriptor::id).collect::<Vec<_>>()
    );
    layers
}

fn geometry_layer(props: &LayerProps) -> GeoJsonLayer {
    let s = &props.settings;
    let style = &props.style;
    let ctx = SelectionContext {
        data: Arc::clone(&props.data),
        selected_feature_indexes: props.selected_feature_indexes.clone(),
        mode: props.mode,
    };
    let trigger = UpdateTrigger {
        selected_feature_indexes: props.selected_feature_indexes.clone(),
        mode: props.mode,
    };

    GeoJsonLayer {
        id: props.sub_layer_id(GEOJSON_LAYER),
        data: GeoJsonData::Collection(Arc::clone(&props.data)),
        pickable: s.pickable,
        auto_highlight: false,
        fp64: s.fp64,
        filled: s.filled,
        stroked: s.stroked,
        line_width_scale: s.line_width_scale,
        line_width_min_pixels: s.line_width_min_pixels,
        line_width_max_pixels: s.line_width_max_pixels,
        line_joint_rounded: s.line_joint_rounded,
        line_miter_limit: s.line_miter_limit,
        point_radius_scale: s.point_radius_scale,
        point_radius_min_pixels: s.point_radius_min_pixels,
        point_radius_max_pixels: s.point_radius_max_pixels,
        point_outline: false,
        point_stroke_width: 1.0,
        line_dash_justified: s.line_dash_justified,
        line_color: compose_selection_aware(&style.line_color, &ctx),
        fill_color: compose_selection_aware(&style.fill_color, &ctx),
        radius: compose_selection_aware(&style.radius, &ctx),
        line_width: compose_selection_aware(&style.line_width, &ctx),
        line_dash_array: compose_selection_aware(&style.line_dash_array, &ctx),
        update_triggers: SELECTION_AWARE_ACCESSORS
            .iter()
            .map(|name| (*name, trigger.clone()))
            .collect(),
    }
}

fn tentative_layer(props: &LayerProps, state: &ControllerState) -> Option<GeoJsonLayer> {
    let feature = state.tentative_feature()?;
    let s = &props.settings;
    let handle = &s.edit_handle_point;
    let style = &props.style;
    let first_selected = state.selected_features().first().cloned().flatten();
    let mode = props.mode;

    Some(GeoJsonLayer {
        id: props.sub_layer_id(TENTATIVE_LAYER),
        data: GeoJsonData::Single(Arc::clone(feature)),
        pickable: false,
        auto_highlight: false,
        fp64: s.fp64,
        filled: true,
        stroked: true,
        line_width_scale: s.line_width_scale,
        line_width_min_pixels: s.line_width_min_pixels,
        line_width_max_pixels: s.line_width_max_pixels,
        line_joint_rounded: s.line_joint_rounded,
        line_miter_limit: s.line_miter_limit,
        point_radius_scale: handle.radius_scale,
        point_radius_min_pixels: handle.radius_min_pixels,
        point_radius_max_pixels: handle.radius_max_pixels,
        point_outline: handle.outline,
        point_stroke_width: handle.stroke_width,
        line_dash_justified: false,
        line_color: compose_tentative(&style.tentative_line_color, first_selected.clone(), mode),
        fill_color: compose_tentative(&style.tentative_fill_color, first_selected.clone(), mode),
        radius: compose_tentative(&style.tentative_radius, first_selected.clone(), mode),
        line_width: compose_tentative(&style.tentative_line_width, first_selected.clone(), mode),
        line_dash_array: compose_tentative(&style.tentative_line_dash_array, first_selected, mode),
        update_triggers: SmallVec::new(),
    })
}

fn edit_handle_layer(props: &LayerProps, state: &ControllerState) -> Option<LayerDescriptor> {
    let handles = state.edit_handles();
    if handles.is_empty() {
        return None;
    }
    let s = &props.settings;
    let style = &props.style;
    let kind = s.edit_handle_type;
    let id = props.sub_layer_id(&format!("{kind}{EDIT_HANDLES_SUFFIX}"));

    Some(match kind {
        EditHandleKind::Point => {
            let p = &s.edit_handle_point;
            LayerDescriptor::PointHandles(PointHandleLayer {
                id,
                data: Arc::clone(handles),
                pickable: s.pickable,
                fp64: s.fp64,
                radius_scale: p.radius_scale,
                outline: p.outline,
                stroke_width: p.stroke_width,
                radius_min_pixels: p.radius_min_pixels,
                radius_max_pixels: p.radius_max_pixels,
                radius: style.edit_handle_point_radius.clone(),
                color: style.edit_handle_point_color.clone(),
                parameters: s.edit_handle_parameters.clone(),
            })
        }
        EditHandleKind::Icon => {
            let i = &s.edit_handle_icon;
            LayerDescriptor::IconHandles(IconHandleLayer {
                id,
                data: Arc::clone(handles),
                pickable: s.pickable,
                fp64: s.fp64,
                icon_atlas: i.atlas.clone(),
                icon_mapping: i.mapping.clone(),
                size_scale: i.size_scale,
                icon: style.edit_handle_icon.clone(),
                size: style.edit_handle_icon_size.clone(),
                color: style.edit_handle_icon_color.clone(),
                angle: style.edit_handle_icon_angle.clone(),
                parameters: s.edit_handle_parameters.clone(),
            })
        }
    })
}
