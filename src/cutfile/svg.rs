use super::bounds::geometry_bounds;
use super::geometry::{Geometry, MarkSquare, PathGeometry};
use super::path::generate_path_data;
use super::style::{background_style, cut_path_style, mark_style};
use super::types::Point;
use crate::config::{ConvertOptions, Orientation};

fn mark_to_svg_element(mark: &MarkSquare, opts: &ConvertOptions) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
        opts.fmt(mark.x),
        opts.fmt(mark.y),
        opts.fmt(mark.size),
        opts.fmt(mark.size),
        mark_style()
    )
}

fn path_to_svg_element(path: &PathGeometry, opts: &ConvertOptions) -> String {
    format!(
        "<path d=\"{}\" {}/>",
        generate_path_data(&path.commands, opts),
        cut_path_style()
    )
}

/// `translate(canvas center) rotate(90) translate(-drawing center)`, so the
/// drawing turns clockwise about its own center and lands centered on the
/// canvas
fn rotate_transform(geometry: &Geometry, width: f64, height: f64, opts: &ConvertOptions) -> String {
    let canvas_center = Point::new(width / 2.0, height / 2.0);
    let drawing_center = geometry_bounds(geometry)
        .map(|b| b.center())
        .unwrap_or(canvas_center);

    format!(
        "translate({}, {}) rotate(90) translate({}, {})",
        opts.fmt(canvas_center.x),
        opts.fmt(canvas_center.y),
        opts.fmt(-drawing_center.x),
        opts.fmt(-drawing_center.y)
    )
}

/// Assemble the SVG document: background, then marks, then cut-paths.
/// `width` and `height` are the canvas size in mm.
pub fn assemble_svg(geometry: &Geometry, width: f64, height: f64, opts: &ConvertOptions) -> String {
    // Canvas size keeps full precision; only drawn coordinates are rounded
    let w = width.to_string();
    let h = height.to_string();

    let mut elements: Vec<String> = Vec::with_capacity(geometry.marks.len() + geometry.paths.len());
    elements.extend(geometry.marks.iter().map(|m| mark_to_svg_element(m, opts)));
    elements.extend(geometry.paths.iter().map(|p| path_to_svg_element(p, opts)));

    let background = format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" {}/>",
        w,
        h,
        background_style()
    );

    let content = match opts.orientation {
        Orientation::Upright => elements
            .iter()
            .map(|e| format!("\n    {}", e))
            .collect::<String>(),
        Orientation::Rotate90 => format!(
            "\n    <g transform=\"{}\">{}\n    </g>",
            rotate_transform(geometry, width, height, opts),
            elements
                .iter()
                .map(|e| format!("\n        {}", e))
                .collect::<String>()
        ),
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">
    {background}{content}
</svg>
"#
    )
}
