//! Per-file conversion driver: parse, transform, build, serialize, write.
//!
//! Whole-file failures come back as `Err`; element-level problems ride along
//! with the SVG in [`Conversion::warnings`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ConvertOptions;
use crate::cutfile::{ParsedDocument, assemble_svg, build_geometry, parse_cut_document};
use crate::error::{ConvertError, FileError, Warning};

/// A converted document
#[derive(Debug, Clone)]
pub struct Conversion {
    pub svg: String,
    pub warnings: Vec<Warning>,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Registration marks drawn
    pub marks: usize,
    /// Cut-paths drawn
    pub paths: usize,
}

/// Convert one cut file's XML text to SVG text
pub fn convert_str(xml: &str, opts: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let ParsedDocument {
        document,
        mut warnings,
    } = parse_cut_document(xml)?;

    let width_mm = document.width_mm();
    let height_mm = document.height_mm();
    debug!(width_mm, height_mm, "transformed dimensions");

    let (geometry, build_warnings) = build_geometry(&document, opts);
    warnings.extend(build_warnings);
    if geometry.is_empty() {
        debug!("no drawable elements");
    }

    let svg = assemble_svg(&geometry, width_mm, height_mm, opts);
    debug!(bytes = svg.len(), "assembled svg");

    Ok(Conversion {
        svg,
        warnings,
        width_mm,
        height_mm,
        marks: geometry.marks.len(),
        paths: geometry.paths.len(),
    })
}

/// Convert XML text and write the SVG to `output`. Nothing is written
/// unless the conversion succeeds.
pub fn convert_to_path(
    xml: &str,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    let conversion = convert_str(xml, opts)?;
    fs::write(output, &conversion.svg).map_err(ConvertError::Write)?;
    debug!(output = %output.display(), "wrote svg");
    Ok(conversion)
}

/// Read `input`, convert it and write the SVG to `output`
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<Conversion, FileError> {
    let xml = fs::read_to_string(input).map_err(|e| FileError::new(input, ConvertError::Read(e)))?;
    convert_to_path(&xml, output, opts).map_err(|e| FileError::new(input, e))
}
