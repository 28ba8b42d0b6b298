//! Cut file to SVG conversion module
//!
//! This module parses XML cut files (registration marks and cut-paths made
//! of points and cubic splines) and converts them to SVG at their physical
//! size in millimeters.

pub mod bounds;
pub mod geometry;
pub mod parser;
pub mod path;
pub mod style;
pub mod svg;
pub mod transform;
pub mod types;
pub mod units;

// Re-export main public API
pub use geometry::{Geometry, build_geometry};
pub use parser::{ParsedDocument, parse_cut_document};
pub use svg::assemble_svg;
pub use transform::{CoordinateTransform, parse_coordinate, parse_scaled_coordinate};
pub use types::*;
pub use units::{Unit, resolve_unit};
