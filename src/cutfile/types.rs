use super::units::Unit;

/// Coordinate pair as written in the cut file, in raw units with a
/// bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

impl RawPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Transformed point in millimeters, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Registration mark, rendered as a square centered on `center`
#[derive(Debug, Clone, PartialEq)]
pub struct RegMark {
    pub center: RawPoint,
}

/// One child of a `<cut-path>`
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// From `<point x y>`
    LineTo(RawPoint),
    /// From `<spline x1 y1 x2 y2 x3 y3>`: two control points and the end point
    CurveTo {
        c1: RawPoint,
        c2: RawPoint,
        end: RawPoint,
    },
}

impl PathSegment {
    /// The on-curve coordinate the segment arrives at. A path starting with
    /// this segment moves here.
    pub fn anchor(&self) -> RawPoint {
        match self {
            PathSegment::LineTo(p) => *p,
            PathSegment::CurveTo { end, .. } => *end,
        }
    }
}

/// An ordered run of segments rendered as one closed path
#[derive(Debug, Clone, PartialEq)]
pub struct CutPath {
    /// 1-based position among the document's cut-paths
    pub index: usize,
    pub segments: Vec<PathSegment>,
}

/// Parsed cut file
#[derive(Debug, Clone)]
pub struct CutDocument {
    pub unit: Unit,
    pub width_raw: f64,
    pub height_raw: f64,
    pub marks: Vec<RegMark>,
    pub paths: Vec<CutPath>,
}

impl CutDocument {
    /// Millimeters per raw unit
    pub fn unit_scale(&self) -> f64 {
        self.unit.scale()
    }

    pub fn width_mm(&self) -> f64 {
        self.width_raw * self.unit_scale()
    }

    pub fn height_mm(&self) -> f64 {
        self.height_raw * self.unit_scale()
    }
}
