//! Layer configuration.
//!
//! Split in two: [`LayerSettings`] holds plain values and loads from JSON;
//! [`LayerStyle`] holds the accessor set, resolved once when the
//! application configures the layer. [`LayerProps`] bundles both with the
//! data, mode and selection for one render.

use crate::accessor::{Accessor, HandleAccessor, LayerAccessor, TentativeAccessor};
use geoedit_core::color::*;
use geoedit_core::{EditHandle, EditHandleType, Error, Feature, FeatureCollection, Mode, Result, Rgba};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DASH: [f32; 2] = [7.0, 4.0];
pub const SOLID: [f32; 2] = [0.0, 0.0];

// ─── Settings ────────────────────────────────────────────────────────────

/// How edit handles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EditHandleKind {
    /// Colored circle markers.
    #[default]
    Point,
    /// Markers from an image atlas.
    Icon,
}

impl EditHandleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Icon => "icon",
        }
    }
}

impl fmt::Display for EditHandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditHandleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "point" => Ok(Self::Point),
            "icon" => Ok(Self::Icon),
            other => Err(Error::UnknownHandleType(other.to_string())),
        }
    }
}

impl TryFrom<String> for EditHandleKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<EditHandleKind> for String {
    fn from(k: EditHandleKind) -> Self {
        k.as_str().to_string()
    }
}

/// Point-marker handle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointHandleSettings {
    pub radius_scale: f32,
    pub outline: bool,
    pub stroke_width: f32,
    pub radius_min_pixels: f32,
    pub radius_max_pixels: f32,
}

impl Default for PointHandleSettings {
    fn default() -> Self {
        Self {
            radius_scale: 1.0,
            outline: false,
            stroke_width: 1.0,
            radius_min_pixels: 4.0,
            radius_max_pixels: 8.0,
        }
    }
}

/// Icon-marker handle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconHandleSettings {
    /// Atlas image location, resolved by the rendering host.
    pub atlas: Option<String>,
    /// Icon name → atlas frame mapping, opaque to this crate.
    pub mapping: Option<Value>,
    pub size_scale: f32,
}

impl Default for IconHandleSettings {
    fn default() -> Self {
        Self {
            atlas: None,
            mapping: None,
            size_scale: 1.0,
        }
    }
}

/// Plain-value layer settings.
///
/// Every field has a default, so a settings file only lists overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerSettings {
    pub pickable: bool,
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
    pub line_dash_justified: bool,
    /// Ask the engine to place newly drawn features on top.
    pub draw_at_front: bool,

    pub edit_handle_type: EditHandleKind,
    /// Render parameters forwarded untouched to the handle layer.
    pub edit_handle_parameters: Option<Value>,
    pub edit_handle_point: PointHandleSettings,
    pub edit_handle_icon: IconHandleSettings,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            pickable: true,
            fp64: false,
            filled: true,
            stroked: true,
            line_width_scale: 1.0,
            line_width_min_pixels: 1.0,
            line_width_max_pixels: f32::MAX,
            line_joint_rounded: false,
            line_miter_limit: 4.0,
            point_radius_scale: 1.0,
            point_radius_min_pixels: 2.0,
            point_radius_max_pixels: f32::MAX,
            line_dash_justified: false,
            draw_at_front: false,
            edit_handle_type: EditHandleKind::default(),
            edit_handle_parameters: None,
            edit_handle_point: PointHandleSettings::default(),
            edit_handle_icon: IconHandleSettings::default(),
        }
    }
}

impl LayerSettings {
    /// Load settings from JSON text. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`Error::Json`] for malformed JSON, wrong value types or an
    /// unknown `editHandleType`.
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        log::debug!(
            "loaded layer settings (edit handles: {})",
            settings.edit_handle_type
        );
        Ok(settings)
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

fn handle_color(handle: &EditHandle) -> Rgba {
    match handle.handle_type {
        EditHandleType::Existing => DEFAULT_EDITING_EXISTING_POINT_COLOR,
        EditHandleType::Intermediate => DEFAULT_EDITING_INTERMEDIATE_POINT_COLOR,
    }
}

fn feature_line_width(f: &Feature) -> f32 {
    f.number_property("lineWidth").unwrap_or(1.0) as f32
}

/// The accessor set for every sub-layer.
#[derive(Debug, Clone)]
pub struct LayerStyle {
    pub line_color: Accessor<Rgba>,
    pub fill_color: Accessor<Rgba>,
    pub radius: Accessor<f32>,
    pub line_width: Accessor<f32>,
    pub line_dash_array: Accessor<[f32; 2]>,

    pub tentative_line_dash_array: TentativeAccessor<[f32; 2]>,
    pub tentative_line_color: TentativeAccessor<Rgba>,
    pub tentative_fill_color: TentativeAccessor<Rgba>,
    pub tentative_line_width: TentativeAccessor<f32>,
    pub tentative_radius: TentativeAccessor<f32>,

    pub edit_handle_point_color: HandleAccessor<Rgba>,
    pub edit_handle_point_radius: HandleAccessor<f32>,

    pub edit_handle_icon: HandleAccessor<String>,
    pub edit_handle_icon_size: HandleAccessor<f32>,
    pub edit_handle_icon_color: HandleAccessor<Rgba>,
    pub edit_handle_icon_angle: HandleAccessor<f32>,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            line_color: Accessor::selection_aware(|_, selected, _| {
                if selected {
                    DEFAULT_SELECTED_LINE_COLOR
                } else {
                    DEFAULT_LINE_COLOR
                }
            }),
            fill_color: Accessor::selection_aware(|_, selected, _| {
                if selected {
                    DEFAULT_SELECTED_FILL_COLOR
                } else {
                    DEFAULT_FILL_COLOR
                }
            }),
            radius: Accessor::feature(|f| {
                f.number_property("radius")
                    .or_else(|| f.number_property("size"))
                    .unwrap_or(1.0) as f32
            }),
            line_width: Accessor::feature(feature_line_width),
            line_dash_array: Accessor::selection_aware(|_, selected, mode| {
                if selected && mode != Mode::View {
                    DEFAULT_DASH
                } else {
                    SOLID
                }
            }),

            tentative_line_dash_array: TentativeAccessor::Constant(DEFAULT_DASH),
            tentative_line_color: TentativeAccessor::Constant(DEFAULT_SELECTED_LINE_COLOR),
            tentative_fill_color: TentativeAccessor::Constant(DEFAULT_SELECTED_FILL_COLOR),
            tentative_line_width: TentativeAccessor::function(|f, _, _| feature_line_width(f)),
            tentative_radius: TentativeAccessor::Constant(3.0),

            edit_handle_point_color: LayerAccessor::function(handle_color),
            edit_handle_point_radius: LayerAccessor::function(|h: &EditHandle| match h.handle_type {
                EditHandleType::Existing => 5.0,
                EditHandleType::Intermediate => 3.0,
            }),

            edit_handle_icon: LayerAccessor::function(|h: &EditHandle| h.handle_type.as_str().to_string()),
            edit_handle_icon_size: LayerAccessor::Constant(10.0),
            edit_handle_icon_color: LayerAccessor::function(handle_color),
            edit_handle_icon_angle: LayerAccessor::Constant(0.0),
        }
    }
}

// ─── Props ───────────────────────────────────────────────────────────────

/// Everything the application passes for one render of the editable layer.
#[derive(Debug, Clone)]
pub struct LayerProps {
    pub id: String,
    pub data: Arc<FeatureCollection>,
    pub mode: Mode,
    /// Mode-specific options, interpreted by the engine only.
    pub mode_config: Option<Value>,
    pub selected_feature_indexes: Option<Arc<[usize]>>,
    pub settings: LayerSettings,
    pub style: LayerStyle,
}

impl LayerProps {
    pub fn new(id: impl Into<String>, data: Arc<FeatureCollection>) -> Self {
        Self {
            id: id.into(),
            data,
            mode: Mode::default(),
            mode_config: None,
            selected_feature_indexes: None,
            settings: LayerSettings::default(),
            style: LayerStyle::default(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_selection(mut self, indexes: &[usize]) -> Self {
        self.selected_feature_indexes = Some(Arc::from(indexes));
        self
    }

    pub fn with_settings(mut self, settings: LayerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = style;
        self
    }

    /// Sub-layer id: `<id>-<suffix>`.
    pub fn sub_layer_id(&self, suffix: &str) -> String {
        format!("{}-{}", self.id, suffix)
    }
}
