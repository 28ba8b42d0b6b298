//! Fixed presentation attributes of the generated SVG

pub const BACKGROUND_FILL: &str = "white";
pub const BACKGROUND_STROKE: &str = "gray";
pub const BACKGROUND_STROKE_WIDTH: &str = "1";

pub const MARK_FILL: &str = "black";

pub const CUT_STROKE: &str = "red";
pub const CUT_STROKE_WIDTH: &str = "0.1mm";

/// Attributes for the full-canvas background rect
pub fn background_style() -> String {
    format!(
        "fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
        BACKGROUND_FILL, BACKGROUND_STROKE, BACKGROUND_STROKE_WIDTH
    )
}

/// Attributes for a registration-mark square
pub fn mark_style() -> String {
    format!("fill=\"{}\" stroke=\"none\"", MARK_FILL)
}

/// Attributes for a cut-path
pub fn cut_path_style() -> String {
    format!(
        "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
        CUT_STROKE, CUT_STROKE_WIDTH
    )
}
