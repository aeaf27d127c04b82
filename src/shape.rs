//! `GeoJSON`-style geometry values produced by the decoder.
//!
//! A [`Shape`] serializes to the familiar `{"type": ..., "coordinates": ...}` layout, or
//! `{"type": "GeometryCollection", "geometries": [...]}` for collections. Positions keep the
//! `(latitude, longitude)` order of the encoded input.
//!
//! ```rust
//! use polyshape::{decode, LatLon, Shape};
//!
//! let shape = decode("0_x}aR_pR").unwrap();
//! assert_eq!(
//!     shape,
//!     Shape::Point {
//!         coordinates: LatLon(100.1, 0.1)
//!     }
//! );
//! assert_eq!(
//!     shape.to_geojson_string().unwrap(),
//!     r#"{"type":"Point","coordinates":[100.1,0.1]}"#
//! );
//! ```
use std::fmt::{Display, Formatter};

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A decoded `(latitude, longitude)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self(lat, lon)
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.1
    }
}

/// Longitude maps to `x`, latitude to `y`.
impl From<LatLon> for Coord {
    fn from(position: LatLon) -> Self {
        Coord {
            x: position.lon(),
            y: position.lat(),
        }
    }
}

impl From<LatLon> for Point {
    fn from(position: LatLon) -> Self {
        Point(Coord::from(position))
    }
}

/// One closed coordinate sequence of a polygon. The first ring of a polygon is the outer
/// boundary, every following ring is a hole.
pub type Ring = Vec<LatLon>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Point { coordinates: LatLon },
    LineString { coordinates: Vec<LatLon> },
    Polygon { coordinates: Vec<Ring> },
    MultiPoint { coordinates: Vec<LatLon> },
    MultiLineString { coordinates: Vec<Vec<LatLon>> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    GeometryCollection { geometries: Vec<Shape> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl ShapeType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShapeType::Point => "Point",
            ShapeType::LineString => "LineString",
            ShapeType::Polygon => "Polygon",
            ShapeType::MultiPoint => "MultiPoint",
            ShapeType::MultiLineString => "MultiLineString",
            ShapeType::MultiPolygon => "MultiPolygon",
            ShapeType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl Display for ShapeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Shape {
    #[must_use]
    pub const fn kind(&self) -> ShapeType {
        match self {
            Shape::Point { .. } => ShapeType::Point,
            Shape::LineString { .. } => ShapeType::LineString,
            Shape::Polygon { .. } => ShapeType::Polygon,
            Shape::MultiPoint { .. } => ShapeType::MultiPoint,
            Shape::MultiLineString { .. } => ShapeType::MultiLineString,
            Shape::MultiPolygon { .. } => ShapeType::MultiPolygon,
            Shape::GeometryCollection { .. } => ShapeType::GeometryCollection,
        }
    }

    /// Converts the shape into a `serde_json` value in its `GeoJSON`-style layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerdeError`] if a coordinate cannot be represented in JSON
    /// (non-finite values).
    pub fn to_geojson_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::SerdeError)
    }

    /// Serializes the shape into a compact `GeoJSON`-style string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerdeError`] if serialization fails.
    pub fn to_geojson_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::SerdeError)
    }

    /// Parses a shape back from its `GeoJSON`-style string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerdeError`] if the string is not a valid shape.
    pub fn from_geojson_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::SerdeError)
    }
}
