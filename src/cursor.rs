//! Token-level reading of encoded polyshape strings.
#![allow(clippy::cast_precision_loss)]
use crate::{error::FormatError, shape::LatLon};

/// `?`, the first data character. Everything below it is a key.
const DATA_START: u8 = 63;
/// `~`, the last data character.
const DATA_END: u8 = 126;
/// Chunks at or above this value are followed by another chunk.
const CONTINUATION: i128 = 0x1f;
/// Shift of the thirteenth chunk. An integer needing more chunks is rejected.
const MAX_SHIFT: u32 = 60;

/// Single-character keys selecting what is read next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    /// Reserved, rejected by the decoder.
    Circle,
    /// Reserved, rejected by the decoder.
    Box,
    /// Starts another ring of the current polygon.
    RingStart,
    /// Reserved, never matched while decoding.
    RingEnd,
    /// Separates geometries, carries no data.
    Separator,
}

impl Key {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(Key::Point),
            b'1' => Some(Key::LineString),
            b'2' => Some(Key::Polygon),
            b'3' => Some(Key::MultiPoint),
            b'4' => Some(Key::Circle),
            b'5' => Some(Key::Box),
            b'(' => Some(Key::RingStart),
            b')' => Some(Key::RingEnd),
            b' ' => Some(Key::Separator),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Key::Point => b'0',
            Key::LineString => b'1',
            Key::Polygon => b'2',
            Key::MultiPoint => b'3',
            Key::Circle => b'4',
            Key::Box => b'5',
            Key::RingStart => b'(',
            Key::RingEnd => b')',
            Key::Separator => b' ',
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Key(u8),
    Data(u8),
}

impl Token {
    const fn classify(byte: u8) -> Self {
        if byte < DATA_START {
            Token::Key(byte)
        } else {
            Token::Data(byte)
        }
    }
}

/// Forward-only cursor holding the running latitude and longitude of the coordinates
/// read since the last key.
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
    scale: f64,
    lat: i64,
    lon: i64,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str, scale: f64) -> Self {
        Self {
            input: input.as_bytes(),
            position: 0,
            scale,
            lat: 0,
            lon: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn peek(&self) -> Option<Token> {
        self.input.get(self.position).copied().map(Token::classify)
    }

    pub fn next_is(&self, key: Key) -> bool {
        self.peek() == Some(Token::Key(key.as_byte()))
    }

    /// Consumes one token. Consuming a key resets both accumulators.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.position += 1;
        if let Token::Key(_) = token {
            self.lat = 0;
            self.lon = 0;
        }
        Some(token)
    }

    /// Consumes one data character and returns its chunk value (code point minus 64).
    fn next_chunk(&mut self) -> Result<i128, FormatError> {
        let position = self.position;
        match self.input.get(position).copied() {
            None => Err(FormatError::Truncated { position }),
            Some(byte) if byte < DATA_START => Err(FormatError::UnexpectedKey {
                key: char::from(byte),
                position,
            }),
            Some(byte) if byte > DATA_END => {
                Err(FormatError::InvalidCharacter { byte, position })
            }
            Some(byte) => {
                self.position += 1;
                Ok(i128::from(byte) - i128::from(DATA_START) - 1)
            }
        }
    }

    /// Reads one signed variable-length integer.
    ///
    /// Chunks are summed little-endian on top of a sentinel `1`, which cancels the bias of
    /// the continuation chunks. The low bit of the sum is the sign.
    pub fn read_int(&mut self) -> Result<i64, FormatError> {
        let start = self.position;
        let mut result: i128 = 1;
        let mut shift = 0;
        loop {
            let chunk = self.next_chunk()?;
            result += chunk << shift;
            if chunk < CONTINUATION {
                break;
            }
            shift += 5;
            if shift > MAX_SHIFT {
                return Err(FormatError::Overflow { position: start });
            }
        }

        let value = if result & 1 == 1 {
            !(result >> 1)
        } else {
            result >> 1
        };
        i64::try_from(value).map_err(|_| FormatError::Overflow { position: start })
    }

    pub fn read_lat(&mut self) -> Result<f64, FormatError> {
        let position = self.position;
        self.lat = self
            .lat
            .checked_add(self.read_int()?)
            .ok_or(FormatError::Overflow { position })?;
        Ok(self.lat as f64 / self.scale)
    }

    pub fn read_lon(&mut self) -> Result<f64, FormatError> {
        let position = self.position;
        self.lon = self
            .lon
            .checked_add(self.read_int()?)
            .ok_or(FormatError::Overflow { position })?;
        Ok(self.lon as f64 / self.scale)
    }

    pub fn read_coord(&mut self) -> Result<LatLon, FormatError> {
        let lat = self.read_lat()?;
        let lon = self.read_lon()?;
        Ok(LatLon(lat, lon))
    }

    /// Reads coordinates until the input ends or a key follows.
    pub fn read_coords(&mut self) -> Result<Vec<LatLon>, FormatError> {
        let mut coords = Vec::new();
        while let Some(Token::Data(_)) = self.peek() {
            coords.push(self.read_coord()?);
        }
        Ok(coords)
    }
}
