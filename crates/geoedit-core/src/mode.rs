//! Editing modes.
//!
//! The mode selects which editing behavior the feature-editing engine
//! applies to pointer input. The interaction layer only inspects it for
//! cursor selection and style accessors.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active editing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    View,
    #[default]
    Modify,
    Translate,
    Rotate,
    Scale,
    Extrude,
    SplitPolygon,
    Duplicate,
    DrawPoint,
    DrawLineString,
    DrawPolygon,
    Draw90DegreePolygon,
    DrawRectangle,
    DrawRectangleUsing3Points,
    DrawCircleFromCenter,
    DrawCircleByBoundingBox,
    DrawEllipseByBoundingBox,
    DrawEllipseUsing3Points,
}

const DRAW_PREFIX: &str = "draw";

impl Mode {
    pub const ALL: [Mode; 18] = [
        Mode::View,
        Mode::Modify,
        Mode::Translate,
        Mode::Rotate,
        Mode::Scale,
        Mode::Extrude,
        Mode::SplitPolygon,
        Mode::Duplicate,
        Mode::DrawPoint,
        Mode::DrawLineString,
        Mode::DrawPolygon,
        Mode::Draw90DegreePolygon,
        Mode::DrawRectangle,
        Mode::DrawRectangleUsing3Points,
        Mode::DrawCircleFromCenter,
        Mode::DrawCircleByBoundingBox,
        Mode::DrawEllipseByBoundingBox,
        Mode::DrawEllipseUsing3Points,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Modify => "modify",
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Extrude => "extrude",
            Self::SplitPolygon => "split_polygon",
            Self::Duplicate => "duplicate",
            Self::DrawPoint => "draw_point",
            Self::DrawLineString => "draw_line_string",
            Self::DrawPolygon => "draw_polygon",
            Self::Draw90DegreePolygon => "draw_90degree_polygon",
            Self::DrawRectangle => "draw_rectangle",
            Self::DrawRectangleUsing3Points => "draw_rectangle_using_3_points",
            Self::DrawCircleFromCenter => "draw_circle_from_center",
            Self::DrawCircleByBoundingBox => "draw_circle_by_bounding_box",
            Self::DrawEllipseByBoundingBox => "draw_ellipse_by_bounding_box",
            Self::DrawEllipseUsing3Points => "draw_ellipse_using_3_points",
        }
    }

    /// Whether this mode belongs to the draw family (name starts with `draw`).
    pub fn is_draw(&self) -> bool {
        self.as_str().starts_with(DRAW_PREFIX)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(m: Mode) -> Self {
        m.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn draw_family_is_detected_by_prefix() {
        assert!(Mode::DrawPoint.is_draw());
        assert!(Mode::Draw90DegreePolygon.is_draw());
        assert!(!Mode::Modify.is_draw());
        assert!(!Mode::View.is_draw());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "paint".parse::<Mode>().unwrap_err();
        assert!(matches!(err, Error::UnknownMode(ref s) if s == "paint"));
        assert!(serde_json::from_str::<Mode>("\"drawPoint\"").is_err());
    }

    #[test]
    fn default_is_modify() {
        assert_eq!(Mode::default(), Mode::Modify);
    }
}
