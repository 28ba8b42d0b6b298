use super::types::{Point, RawPoint};

/// Raw cut-file coordinates to SVG millimeters: scale by the unit factor and
/// flip Y against the canvas height.
///
/// Equivalent to the affine matrix `| s 0 0 |  | 0 -s h |`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub scale: f64,
    pub height_mm: f64,
}

impl CoordinateTransform {
    pub fn new(scale: f64, height_mm: f64) -> Self {
        Self { scale, height_mm }
    }

    pub fn apply(&self, p: RawPoint) -> Point {
        Point {
            x: p.x * self.scale,
            y: self.height_mm - p.y * self.scale,
        }
    }
}

/// Raw coordinate attribute that could not be used
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCoordinate {
    pub value: Option<String>,
}

/// Largest magnitude a value may have once scaled to mm. Keeps `h - y` in
/// the Y flip finite.
const MAX_SCALED: f64 = f64::MAX / 2.0;

/// Whether `value` scaled to mm is still a usable finite number
pub fn scaled_in_range(value: f64, scale: f64) -> bool {
    let scaled = value * scale;
    scaled.is_finite() && scaled.abs() <= MAX_SCALED
}

/// Parse one raw coordinate attribute. Missing, non-numeric and non-finite
/// values are rejected.
pub fn parse_coordinate(value: Option<&str>) -> Result<f64, InvalidCoordinate> {
    let invalid = || InvalidCoordinate {
        value: value.map(str::to_string),
    };
    let n: f64 = value.ok_or_else(invalid)?.trim().parse().map_err(|_| invalid())?;
    if n.is_finite() { Ok(n) } else { Err(invalid()) }
}

/// Like [`parse_coordinate`], but also rejects values that overflow once
/// multiplied by the unit `scale`. Returns the raw value.
pub fn parse_scaled_coordinate(value: Option<&str>, scale: f64) -> Result<f64, InvalidCoordinate> {
    let n = parse_coordinate(value)?;
    if scaled_in_range(n, scale) {
        Ok(n)
    } else {
        Err(InvalidCoordinate {
            value: value.map(str::to_string),
        })
    }
}
