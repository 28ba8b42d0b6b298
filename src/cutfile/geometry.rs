use tracing::{debug, trace};

use super::path::{PathCommand, build_path_commands};
use super::transform::CoordinateTransform;
use super::types::{CutDocument, PathSegment, RegMark};
use crate::config::ConvertOptions;
use crate::error::Warning;

/// Registration-mark square, positioned by its top-left corner (mm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkSquare {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// A cut-path ready to be written as `<path d=...>`
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    /// 1-based index of the source cut-path
    pub index: usize,
    pub commands: Vec<PathCommand>,
}

/// Everything drawn on top of the background, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub marks: Vec<MarkSquare>,
    pub paths: Vec<PathGeometry>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.paths.is_empty()
    }
}

fn mark_square(mark: &RegMark, t: &CoordinateTransform, size: f64) -> MarkSquare {
    let center = t.apply(mark.center);
    MarkSquare {
        x: center.x - size / 2.0,
        y: center.y - size / 2.0,
        size,
    }
}

/// Build renderable primitives from a parsed document. Cut-paths without
/// any segment are dropped with an `EmptyPath` warning. A cut-path opening
/// with a spline only moves to its end point, so that curve is not drawn.
pub fn build_geometry(doc: &CutDocument, opts: &ConvertOptions) -> (Geometry, Vec<Warning>) {
    let t = CoordinateTransform::new(doc.unit_scale(), doc.height_mm());
    let mut warnings = Vec::new();

    let marks = doc
        .marks
        .iter()
        .map(|m| mark_square(m, &t, opts.reg_mark_size))
        .collect();

    let mut paths = Vec::with_capacity(doc.paths.len());
    for path in &doc.paths {
        if let Some(PathSegment::CurveTo { .. }) = path.segments.first() {
            debug!(index = path.index, "cut-path starts with a spline, its curve is not drawn");
        }
        match build_path_commands(path, &t) {
            Some(commands) => paths.push(PathGeometry {
                index: path.index,
                commands,
            }),
            None => {
                trace!(index = path.index, "dropping empty cut-path");
                warnings.push(Warning::EmptyPath { path: path.index });
            }
        }
    }

    (Geometry { marks, paths }, warnings)
}
