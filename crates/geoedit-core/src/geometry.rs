//! GeoJSON geometry primitives.
//!
//! Only the shapes the editor draws are modelled: points, lines and
//! polygons plus their multi-part forms. Coordinates are map-space
//! positions; projection is the rendering host's concern.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A position in map space. Serialized as a GeoJSON coordinate array
/// (`[x, y]` or `[x, y, z]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl From<Position> for Vec<f64> {
    fn from(p: Position) -> Self {
        match p.z {
            Some(z) => vec![p.x, p.y, z],
            None => vec![p.x, p.y],
        }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = Error;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            [x, y] => Ok(Self::new(*x, *y)),
            [x, y, z] => Ok(Self::with_z(*x, *y, *z)),
            other => Err(Error::InvalidPosition(other.len())),
        }
    }
}

/// A GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    /// Outer ring first, then holes. Rings are closed (first == last).
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// The GeoJSON `type` name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }
}
