use super::transform::CoordinateTransform;
use super::types::{CutPath, PathSegment, Point};
use crate::config::ConvertOptions;

/// One SVG path command in millimeter coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo { c1: Point, c2: Point, end: Point },
    Close,
}

/// Turn a cut-path into drawing commands.
///
/// The first segment only moves to its anchor; the rest connect from there
/// and the path is always closed. Returns `None` for a path with no
/// segments.
pub fn build_path_commands(path: &CutPath, t: &CoordinateTransform) -> Option<Vec<PathCommand>> {
    let (first, rest) = path.segments.split_first()?;

    let mut commands = Vec::with_capacity(path.segments.len() + 1);
    commands.push(PathCommand::MoveTo(t.apply(first.anchor())));

    for seg in rest {
        commands.push(match seg {
            PathSegment::LineTo(p) => PathCommand::LineTo(t.apply(*p)),
            PathSegment::CurveTo { c1, c2, end } => PathCommand::CurveTo {
                c1: t.apply(*c1),
                c2: t.apply(*c2),
                end: t.apply(*end),
            },
        });
    }

    commands.push(PathCommand::Close);
    Some(commands)
}

/// Generate SVG path data (d attribute) from drawing commands
pub fn generate_path_data(commands: &[PathCommand], opts: &ConvertOptions) -> String {
    let f = |n: f64| opts.fmt(n);

    commands
        .iter()
        .map(|cmd| match cmd {
            PathCommand::MoveTo(p) => format!("M {} {}", f(p.x), f(p.y)),
            PathCommand::LineTo(p) => format!("L {} {}", f(p.x), f(p.y)),
            PathCommand::CurveTo { c1, c2, end } => format!(
                "C {} {}, {} {}, {} {}",
                f(c1.x),
                f(c1.y),
                f(c2.x),
                f(c2.y),
                f(end.x),
                f(end.y)
            ),
            PathCommand::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
