//! # polyshape
//!
//! A library for decoding polyshape strings into `GeoJSON`-style geometries.
//!
//! Polyshape is a compact text encoding of points, lines, polygons, their multi forms and
//! geometry collections. Coordinates are delta coded against the previous coordinate and
//! written as variable-length integers in printable ASCII, the same way as in encoded
//! polylines. Single characters select the geometry that follows:
//!
//! | key | meaning |
//! |---|---|
//! | `0` | Point |
//! | `1` | `LineString` |
//! | `2` | Polygon |
//! | `3` | `MultiPoint` |
//! | `(` | next ring of the current polygon |
//! | ` ` | separator |
//!
//! `4` (circle), `5` (box) and `)` are reserved and rejected.
//!
//! Consecutive geometries of the same type are merged into their multi form, mixed types
//! produce a `GeometryCollection`.
//!
//! ## Features
//!
//! - Decode into [`Shape`], which serializes to the `GeoJSON` geometry layout with serde
//! - Configurable coordinate precision through [`Decoder`]
//! - Process decoded geometries with any [`geozero`] processor, e.g. into [`geo`] types
//!
//! ## Example
//!
//! ```rust
//! use polyshape::{decode, LatLon, Shape};
//!
//! let shape = decode("1_x}aR_pR_ibE_ibE 1_ldnR_dyK_ibE_ibE").unwrap();
//! assert_eq!(
//!     shape,
//!     Shape::MultiLineString {
//!         coordinates: vec![
//!             vec![LatLon(100.1, 0.1), LatLon(101.1, 1.1)],
//!             vec![LatLon(102.1, 2.1), LatLon(103.1, 3.1)],
//!         ]
//!     }
//! );
//!
//! let geojson = shape.to_geojson_string().unwrap();
//! assert_eq!(
//!     geojson,
//!     r#"{"type":"MultiLineString","coordinates":[[[100.1,0.1],[101.1,1.1]],[[102.1,2.1],[103.1,3.1]]]}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`de`] - The decoder and its configuration
//! - [`ser`] - `geozero` integration
//! - [`shape`] - Decoded geometry values
//! - [`error`] - Error types and handling

mod cursor;
pub mod de;
#[allow(clippy::module_name_repetitions)]
pub mod error;
pub mod ser;
#[allow(clippy::module_name_repetitions)]
pub mod shape;

pub use cursor::Key;
pub use de::{Decoder, DEFAULT_PRECISION, MAX_PRECISION};
pub use error::{Error, FormatError, Result};
pub use ser::Polyshape;
pub use shape::{LatLon, Ring, Shape, ShapeType};

use geozero::ToGeo;

/// Decodes a polyshape string encoded with [`DEFAULT_PRECISION`] decimal places.
///
/// # Examples
///
/// ```
/// use polyshape::{decode, LatLon, Shape};
///
/// assert_eq!(
///     decode("0_x}aR_pR").unwrap(),
///     Shape::Point {
///         coordinates: LatLon(100.1, 0.1)
///     }
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] if the input is not a valid polyshape string.
pub fn decode(input: &str) -> Result<Shape> {
    Decoder::default().decode(input)
}

/// Decodes a polyshape string encoded with `precision` decimal places.
///
/// # Errors
///
/// Returns [`Error::Precision`] if `precision` exceeds [`MAX_PRECISION`], and
/// [`Error::Format`] if the input is not a valid polyshape string.
pub fn decode_with_precision(input: &str, precision: u32) -> Result<Shape> {
    Decoder::with_precision(precision)?.decode(input)
}

/// Decodes a polyshape string straight into a [`geo::Geometry`].
///
/// Longitude becomes `x` and latitude `y`.
///
/// ```
/// use geo::Geometry;
/// use polyshape::decode_to_geo;
///
/// let geometry = decode_to_geo("0_x}aR_pR", 5).unwrap();
/// let Geometry::Point(point) = geometry else { panic!("Expected Point") };
/// assert_eq!((point.x(), point.y()), (0.1, 100.1));
/// ```
///
/// # Errors
///
/// Fails like [`decode_with_precision`], or with [`Error::GeozeroError`] if the geometry
/// cannot be built.
pub fn decode_to_geo(input: &str, precision: u32) -> Result<geo::Geometry> {
    let shape = decode_with_precision(input, precision)?;
    Ok(shape.to_geo()?)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::{json, Value};

    fn geojson(input: &str) -> Result<Value> {
        decode(input)?.to_geojson_value()
    }

    #[test]
    fn test_point() -> Result<()> {
        assert_eq!(
            geojson("0_x}aR_pR")?,
            json!({"type": "Point", "coordinates": [100.1, 0.1]})
        );
        Ok(())
    }

    #[test]
    fn test_line() -> Result<()> {
        assert_eq!(
            geojson("1_x}aR_pR_ibE_ibE")?,
            json!({"type": "LineString", "coordinates": [[100.1, 0.1], [101.1, 1.1]]})
        );
        Ok(())
    }

    #[test]
    fn test_polygon() -> Result<()> {
        assert_eq!(
            geojson("2_x}aR_pR_ibE??_ibE~hbE??~hbE")?,
            json!({
                "type": "Polygon",
                "coordinates": [[[100.1, 0.1], [101.1, 0.1], [101.1, 1.1], [100.1, 1.1], [100.1, 0.1]]]
            })
        );
        Ok(())
    }

    #[test]
    fn test_polygon_with_inner_ring() -> Result<()> {
        assert_eq!(
            geojson("2_x}aR_pR_ibE??_ibE~hbE??~hbE(_iqbR_af@_etB??_etB~dtB??~dtB")?,
            json!({
                "type": "Polygon",
                "coordinates": [
                    [[100.1, 0.1], [101.1, 0.1], [101.1, 1.1], [100.1, 1.1], [100.1, 0.1]],
                    [[100.2, 0.2], [100.8, 0.2], [100.8, 0.8], [100.2, 0.8], [100.2, 0.2]]
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_multi_point() -> Result<()> {
        assert_eq!(
            geojson("3_x}aR_pR_ibE_ibE")?,
            json!({"type": "MultiPoint", "coordinates": [[100.1, 0.1], [101.1, 1.1]]})
        );
        Ok(())
    }

    #[test]
    fn test_multi_line() -> Result<()> {
        assert_eq!(
            geojson("1_x}aR_pR_ibE_ibE 1_ldnR_dyK_ibE_ibE")?,
            json!({
                "type": "MultiLineString",
                "coordinates": [
                    [[100.1, 0.1], [101.1, 1.1]],
                    [[102.1, 2.1], [103.1, 3.1]]
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_multi_polygon() -> Result<()> {
        assert_eq!(
            geojson(
                "2_ldnR_dyK_ibE??_ibE~hbE??~hbE 2_x}aR_pR_ibE??_ibE~hbE??~hbE(_iqbR_af@_etB??_etB~dtB??~dtB"
            )?,
            json!({
                "type": "MultiPolygon",
                "coordinates": [
                    [
                        [[102.1, 2.1], [103.1, 2.1], [103.1, 3.1], [102.1, 3.1], [102.1, 2.1]]
                    ],
                    [
                        [[100.1, 0.1], [101.1, 0.1], [101.1, 1.1], [100.1, 1.1], [100.1, 0.1]],
                        [[100.2, 0.2], [100.8, 0.2], [100.8, 0.8], [100.2, 0.8], [100.2, 0.2]]
                    ]
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_geometry_collection() -> Result<()> {
        assert_eq!(
            geojson("0_x}aR_pR 1_x}aR_pR_ibE_ibE 2_x}aR_pR_ibE??_ibE~hbE??~hbE")?,
            json!({
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Point", "coordinates": [100.1, 0.1]},
                    {"type": "LineString", "coordinates": [[100.1, 0.1], [101.1, 1.1]]},
                    {
                        "type": "Polygon",
                        "coordinates": [[[100.1, 0.1], [101.1, 0.1], [101.1, 1.1], [100.1, 1.1], [100.1, 0.1]]]
                    }
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_unsupported_key() {
        match decode("9_x}aR_pR") {
            Err(Error::Format(FormatError::UnsupportedKey { key, position })) => {
                assert_eq!(key, '9');
                assert_eq!(position, 0);
            }
            other => panic!("Expected unsupported key, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_with_precision() -> Result<()> {
        match decode_with_precision("0_x}aR_pR", 7)? {
            Shape::Point { coordinates } => {
                assert_relative_eq!(coordinates.lat(), 1.001);
                assert_relative_eq!(coordinates.lon(), 0.001);
            }
            other => panic!("Expected Point, got {other:?}"),
        }
        assert!(matches!(
            decode_with_precision("0_x}aR_pR", 99),
            Err(Error::Precision(99))
        ));
        Ok(())
    }

    #[test]
    fn test_decode_to_geo() -> Result<()> {
        match decode_to_geo("3_x}aR_pR_ibE_ibE", DEFAULT_PRECISION)? {
            geo::Geometry::MultiPoint(points) => {
                assert_eq!(points.0.len(), 2);
                assert_relative_eq!(points.0[1].x(), 1.1);
                assert_relative_eq!(points.0[1].y(), 101.1);
            }
            other => panic!("Expected MultiPoint, got {other:?}"),
        }
        assert!(matches!(
            decode_to_geo("0_x}aR", DEFAULT_PRECISION),
            Err(Error::Format(FormatError::Truncated { position: 6 }))
        ));
        Ok(())
    }
}
