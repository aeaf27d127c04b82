//! Decoding of polyshape strings into [`Shape`]s.
//!
//! The decoder reads the input once, front to back. Every geometry key reads a `Part`,
//! which is folded into the pending geometry by `Pending::accept`:
//!
//! - a Point, `LineString` or Polygon directly following the same type promotes the pending
//!   geometry to its multi form, and later parts of that type are appended to it,
//! - a `MultiPoint` key extends a pending `MultiPoint`,
//! - any other part finishes the pending geometry and starts a new one.
//!
//! Once more than one geometry has been finished the result is a `GeometryCollection`.
use serde::{Deserialize, Serialize};

use crate::{
    cursor::{Cursor, Key, Token},
    error::{Error, FormatError, Result},
    shape::{LatLon, Ring, Shape, ShapeType},
};

/// Decimal places used when none are given.
pub const DEFAULT_PRECISION: u32 = 5;

/// Largest supported precision. Up to `10^15` every accumulated integer of a valid
/// coordinate is exact in an `f64`.
pub const MAX_PRECISION: u32 = 15;

/// Decoder configuration.
///
/// ```
/// use polyshape::{Decoder, LatLon, Shape};
///
/// let decoder = Decoder::with_precision(6).unwrap();
/// assert_eq!(
///     decoder.decode("0_x}aR_pR").unwrap(),
///     Shape::Point {
///         coordinates: LatLon(10.01, 0.01)
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decoder {
    precision: u32,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder for input encoded with `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precision`] if `precision` exceeds [`MAX_PRECISION`].
    pub fn with_precision(precision: u32) -> Result<Self> {
        let decoder = Self { precision };
        decoder.scale()?;
        Ok(decoder)
    }

    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The divisor applied to accumulated integers, `10^precision`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precision`] if the precision exceeds [`MAX_PRECISION`].
    pub fn scale(&self) -> Result<f64> {
        if self.precision > MAX_PRECISION {
            return Err(Error::Precision(self.precision));
        }
        Ok((0..self.precision).fold(1.0, |scale, _| scale * 10.0))
    }

    /// Decodes `input` into a single shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for malformed input:
    /// - [`FormatError::UnsupportedKey`] for an unknown or reserved key,
    /// - [`FormatError::Truncated`] if the input ends inside a coordinate,
    /// - [`FormatError::UnexpectedKey`] for a key inside a coordinate,
    /// - [`FormatError::InvalidCharacter`] for bytes outside the encoding alphabet,
    /// - [`FormatError::Overflow`] for integers that do not fit in 64 bits,
    /// - [`FormatError::Empty`] if the input holds no geometry.
    ///
    /// Returns [`Error::Precision`] if the configured precision is out of range.
    pub fn decode(&self, input: &str) -> Result<Shape> {
        let mut cursor = Cursor::new(input, self.scale()?);
        let mut state = State::default();

        loop {
            let position = cursor.position();
            let Some(token) = cursor.next_token() else {
                break;
            };
            let byte = match token {
                Token::Key(byte) => byte,
                Token::Data(byte) => return Err(unsupported_key(byte, position)),
            };
            let part = match Key::from_byte(byte) {
                Some(Key::Point) => Part::Point(cursor.read_coord()?),
                Some(Key::LineString) => Part::LineString(cursor.read_coords()?),
                Some(Key::Polygon) => Part::Polygon(read_rings(&mut cursor)?),
                Some(Key::MultiPoint) => Part::MultiPoint(cursor.read_coords()?),
                Some(Key::Separator) => continue,
                _ => return Err(unsupported_key(byte, position)),
            };
            state.push(part);
        }

        let shape = state.finish()?;
        log::debug!("decoded {} from {} bytes", shape.kind(), input.len());
        Ok(shape)
    }
}

fn unsupported_key(byte: u8, position: usize) -> Error {
    FormatError::UnsupportedKey {
        key: char::from(byte),
        position,
    }
    .into()
}

/// Reads the rings of one polygon. Every ring after the first is introduced by
/// [`Key::RingStart`] and must hold at least one coordinate.
fn read_rings(cursor: &mut Cursor<'_>) -> std::result::Result<Vec<Ring>, FormatError> {
    let mut rings = vec![cursor.read_coords()?];
    while cursor.next_is(Key::RingStart) {
        cursor.next_token();
        let mut ring = vec![cursor.read_coord()?];
        ring.extend(cursor.read_coords()?);
        rings.push(ring);
    }
    Ok(rings)
}

/// A geometry as read right after its key.
#[derive(Debug, Clone, PartialEq)]
enum Part {
    Point(LatLon),
    LineString(Vec<LatLon>),
    Polygon(Vec<Ring>),
    MultiPoint(Vec<LatLon>),
}

/// The geometry currently being accumulated.
#[derive(Debug, Clone, Default, PartialEq)]
enum Pending {
    #[default]
    Empty,
    Point(LatLon),
    LineString(Vec<LatLon>),
    Polygon(Vec<Ring>),
    MultiPoint(Vec<LatLon>),
    MultiLineString(Vec<Vec<LatLon>>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl From<Part> for Pending {
    fn from(part: Part) -> Self {
        match part {
            Part::Point(point) => Pending::Point(point),
            Part::LineString(line) => Pending::LineString(line),
            Part::Polygon(rings) => Pending::Polygon(rings),
            Part::MultiPoint(points) => Pending::MultiPoint(points),
        }
    }
}

impl Pending {
    /// Folds `part` into the pending geometry. Returns the new pending geometry and the
    /// geometry finished by this step, if any.
    fn accept(self, part: Part) -> (Pending, Option<Shape>) {
        match (self, part) {
            (Pending::Point(first), Part::Point(next)) => {
                (Pending::MultiPoint(vec![first, next]), None)
            }
            (Pending::MultiPoint(mut points), Part::Point(next)) => {
                points.push(next);
                (Pending::MultiPoint(points), None)
            }
            (Pending::MultiPoint(mut points), Part::MultiPoint(next)) => {
                points.extend(next);
                (Pending::MultiPoint(points), None)
            }
            (Pending::LineString(first), Part::LineString(next)) => {
                (Pending::MultiLineString(vec![first, next]), None)
            }
            (Pending::MultiLineString(mut lines), Part::LineString(next)) => {
                lines.push(next);
                (Pending::MultiLineString(lines), None)
            }
            (Pending::Polygon(first), Part::Polygon(next)) => {
                (Pending::MultiPolygon(vec![first, next]), None)
            }
            (Pending::MultiPolygon(mut polygons), Part::Polygon(next)) => {
                polygons.push(next);
                (Pending::MultiPolygon(polygons), None)
            }
            (previous, part) => (Pending::from(part), previous.into_shape()),
        }
    }

    fn kind(&self) -> Option<ShapeType> {
        match self {
            Pending::Empty => None,
            Pending::Point(_) => Some(ShapeType::Point),
            Pending::LineString(_) => Some(ShapeType::LineString),
            Pending::Polygon(_) => Some(ShapeType::Polygon),
            Pending::MultiPoint(_) => Some(ShapeType::MultiPoint),
            Pending::MultiLineString(_) => Some(ShapeType::MultiLineString),
            Pending::MultiPolygon(_) => Some(ShapeType::MultiPolygon),
        }
    }

    fn into_shape(self) -> Option<Shape> {
        let shape = match self {
            Pending::Empty => return None,
            Pending::Point(coordinates) => Shape::Point { coordinates },
            Pending::LineString(coordinates) => Shape::LineString { coordinates },
            Pending::Polygon(coordinates) => Shape::Polygon { coordinates },
            Pending::MultiPoint(coordinates) => Shape::MultiPoint { coordinates },
            Pending::MultiLineString(coordinates) => Shape::MultiLineString { coordinates },
            Pending::MultiPolygon(coordinates) => Shape::MultiPolygon { coordinates },
        };
        Some(shape)
    }
}

#[derive(Debug, Default)]
struct State {
    pending: Pending,
    completed: Vec<Shape>,
}

impl State {
    fn push(&mut self, part: Part) {
        let before = self.pending.kind();
        let (pending, finished) = std::mem::take(&mut self.pending).accept(part);

        if let Some(shape) = finished {
            log::trace!(
                "finished {} as geometry #{}",
                shape.kind(),
                self.completed.len()
            );
            self.completed.push(shape);
        } else if let (Some(before), Some(after)) = (before, pending.kind()) {
            if before != after {
                log::trace!("promoted {before} to {after}");
            }
        }

        self.pending = pending;
    }

    fn finish(mut self) -> std::result::Result<Shape, FormatError> {
        let last = self.pending.into_shape().ok_or(FormatError::Empty)?;
        if self.completed.is_empty() {
            return Ok(last);
        }

        self.completed.push(last);
        Ok(Shape::GeometryCollection {
            geometries: self.completed,
        })
    }
}
