//! Feeding decoded shapes into [`geozero`] processors.
//!
//! Both [`Shape`] and [`Polyshape`] implement [`GeozeroGeometry`], so every geozero conversion
//! (`ToGeo`, and `ToJson`/`ToWkt` with the matching geozero features) works on them directly.
//! Longitude is written as `x` and latitude as `y`.
//!
//! ```rust
//! use geo::Geometry;
//! use geozero::ToGeo;
//! use polyshape::Polyshape;
//!
//! let geometry = Polyshape::new("1_x}aR_pR_ibE_ibE").to_geo().unwrap();
//! assert!(matches!(geometry, Geometry::LineString(_)));
//! ```
use geo::Coord;
use geozero::{error::Result as GeozeroResult, GeomProcessor, GeozeroGeometry};

use crate::{
    de::Decoder,
    error::Result,
    shape::{LatLon, Ring, Shape},
};

impl GeozeroGeometry for Shape {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_shape(self, 0, processor)
    }
}

/// An encoded polyshape string, decoded when processed.
#[derive(Debug, Clone, Copy)]
pub struct Polyshape<'a> {
    input: &'a str,
    decoder: Decoder,
}

impl<'a> Polyshape<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_decoder(input, Decoder::default())
    }

    #[must_use]
    pub fn with_decoder(input: &'a str, decoder: Decoder) -> Self {
        Self { input, decoder }
    }

    /// Decodes the wrapped input.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn decode(&self) -> Result<Shape> {
        self.decoder.decode(self.input)
    }
}

impl GeozeroGeometry for Polyshape<'_> {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        self.decode()?.process_geom(processor)
    }
}

fn process_shape<P: GeomProcessor>(
    shape: &Shape,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match shape {
        Shape::Point { coordinates } => {
            processor.point_begin(idx)?;
            process_coord(*coordinates, 0, processor)?;
            processor.point_end(idx)
        }
        Shape::LineString { coordinates } => process_line(coordinates, true, idx, processor),
        Shape::Polygon { coordinates } => process_polygon(coordinates, true, idx, processor),
        Shape::MultiPoint { coordinates } => {
            processor.multipoint_begin(coordinates.len(), idx)?;
            for (i, coord) in coordinates.iter().enumerate() {
                process_coord(*coord, i, processor)?;
            }
            processor.multipoint_end(idx)
        }
        Shape::MultiLineString { coordinates } => {
            processor.multilinestring_begin(coordinates.len(), idx)?;
            for (i, line) in coordinates.iter().enumerate() {
                process_line(line, false, i, processor)?;
            }
            processor.multilinestring_end(idx)
        }
        Shape::MultiPolygon { coordinates } => {
            processor.multipolygon_begin(coordinates.len(), idx)?;
            for (i, polygon) in coordinates.iter().enumerate() {
                process_polygon(polygon, false, i, processor)?;
            }
            processor.multipolygon_end(idx)
        }
        Shape::GeometryCollection { geometries } => {
            processor.geometrycollection_begin(geometries.len(), idx)?;
            for (i, geometry) in geometries.iter().enumerate() {
                process_shape(geometry, i, processor)?;
            }
            processor.geometrycollection_end(idx)
        }
    }
}

fn process_coord<P: GeomProcessor>(
    position: LatLon,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    let coord = Coord::from(position);
    processor.xy(coord.x, coord.y, idx)
}

fn process_line<P: GeomProcessor>(
    line: &[LatLon],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.linestring_begin(tagged, line.len(), idx)?;
    for (i, coord) in line.iter().enumerate() {
        process_coord(*coord, i, processor)?;
    }
    processor.linestring_end(tagged, idx)
}

fn process_polygon<P: GeomProcessor>(
    rings: &[Ring],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.polygon_begin(tagged, rings.len(), idx)?;
    for (i, ring) in rings.iter().enumerate() {
        process_line(ring, false, i, processor)?;
    }
    processor.polygon_end(tagged, idx)
}
