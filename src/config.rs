//! Conversion options

/// How the drawing is placed on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Y-flipped source coordinates, no further transform
    #[default]
    Upright,
    /// Rotate the drawing 90 degrees clockwise about its own center and
    /// recenter it on the canvas
    Rotate90,
}

/// Options for a single file conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Decimal places for emitted coordinates
    pub precision: usize,

    pub orientation: Orientation,

    /// Side length of a registration-mark square, in mm
    pub reg_mark_size: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            orientation: Orientation::Upright,
            reg_mark_size: 3.0,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_reg_mark_size(mut self, size: f64) -> Self {
        self.reg_mark_size = size;
        self
    }

    /// Format a number with the configured precision, treating -0 as 0
    pub fn fmt(&self, n: f64) -> String {
        let s = format!("{:.*}", self.precision, n);
        // "-0.0000" after rounding
        if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
            s[1..].to_string()
        } else {
            s
        }
    }
}
