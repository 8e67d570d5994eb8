//! Map text parser.

use std::fmt;
use std::str::FromStr;

use super::{Map, Polygon};
use crate::geom2::Point;

/// Fatal input errors. Line numbers are 1-based; end of input reports the
/// line after the last one.
#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    BadFormat {
        line: usize,
        reason: String,
    },
    InvalidPolygon {
        polygon: usize,
        line: usize,
        vertices: usize,
    },
}

impl MapError {
    fn bad_format(line: usize, reason: impl Into<String>) -> Self {
        Self::BadFormat {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadFormat { line, reason } => write!(f, "bad map format (line {line}): {reason}"),
            Self::InvalidPolygon {
                polygon,
                line,
                vertices,
            } => write!(
                f,
                "invalid polygon {polygon} (line {line}): {vertices} vertices, need at least 3"
            ),
        }
    }
}

impl std::error::Error for MapError {}

impl FromStr for Map {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let eof = s.lines().count() + 1;
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (line, text) = lines
            .next()
            .ok_or_else(|| MapError::bad_format(eof, "missing start point"))?;
        let start = parse_point(text, line)?;
        let (line, text) = lines
            .next()
            .ok_or_else(|| MapError::bad_format(eof, "missing end point"))?;
        let end = parse_point(text, line)?;

        let mut polygons = Vec::new();
        while let Some((line, text)) = lines.next() {
            let polygon = polygons.len();
            let count: usize = text.parse().map_err(|_| {
                MapError::bad_format(line, format!("expected vertex count, found {text:?}"))
            })?;
            if count < 3 {
                return Err(MapError::InvalidPolygon {
                    polygon,
                    line,
                    vertices: count,
                });
            }
            let mut vertices = Vec::new();
            for _ in 0..count {
                let (vline, vtext) = lines.next().ok_or_else(|| {
                    MapError::bad_format(
                        eof,
                        format!(
                            "polygon {polygon} declares {count} vertices, found {}",
                            vertices.len()
                        ),
                    )
                })?;
                vertices.push(parse_point(vtext, vline)?);
            }
            // count >= 3 was checked above.
            if let Some(p) = Polygon::new(vertices) {
                polygons.push(p);
            }
        }
        Ok(Map::new(start, end, polygons))
    }
}

/// `x, y` with optional whitespace around the comma; both finite.
fn parse_point(text: &str, line: usize) -> Result<Point, MapError> {
    let mut parts = text.split(',').map(str::trim);
    let (Some(xs), Some(ys), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MapError::bad_format(
            line,
            format!("expected `x, y`, found {text:?}"),
        ));
    };
    let coord = |s: &str| -> Result<f64, MapError> {
        let v: f64 = s
            .parse()
            .map_err(|_| MapError::bad_format(line, format!("non-numeric coordinate {s:?}")))?;
        if !v.is_finite() {
            return Err(MapError::bad_format(
                line,
                format!("non-finite coordinate {s:?}"),
            ));
        }
        Ok(v)
    };
    Ok(Point::new(coord(xs)?, coord(ys)?))
}
