use super::geometry::{Geometry, MarkSquare};
use super::path::PathCommand;
use super::types::Point;

/// Bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Parameter values in (0, 1) where one axis of a cubic Bezier has a zero
/// derivative
fn axis_extrema(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    let mut res = Vec::new();
    let aa = -a + 3.0 * b - 3.0 * c + d;
    let bb = 2.0 * (a - 2.0 * b + c);
    let cc = b - a;

    if aa.abs() < 1e-8 {
        if bb.abs() > 1e-8 {
            let t = -cc / bb;
            if t > 0.0 && t < 1.0 {
                res.push(t);
            }
        }
    } else {
        let disc = bb * bb - 4.0 * aa * cc;
        if disc >= 0.0 {
            let sqrt_d = disc.sqrt();
            for t in [(-bb + sqrt_d) / (2.0 * aa), (-bb - sqrt_d) / (2.0 * aa)] {
                if t > 0.0 && t < 1.0 {
                    res.push(t);
                }
            }
        }
    }
    res
}

/// Evaluate a cubic Bezier curve at parameter t
fn bezier_point(t: f64, p0: Point, c1: Point, c2: Point, p1: Point) -> Point {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;
    let t2 = t * t;
    let t3 = t2 * t;

    Point::new(
        mt3 * p0.x + 3.0 * mt2 * t * c1.x + 3.0 * mt * t2 * c2.x + t3 * p1.x,
        mt3 * p0.y + 3.0 * mt2 * t * c1.y + 3.0 * mt * t2 * c2.y + t3 * p1.y,
    )
}

fn mark_corners(mark: &MarkSquare) -> [Point; 2] {
    [
        Point::new(mark.x, mark.y),
        Point::new(mark.x + mark.size, mark.y + mark.size),
    ]
}

/// Tight bounds of everything drawn: mark squares plus path geometry, with
/// curves bounded by their extrema rather than their control points.
/// `None` when nothing is drawn.
pub fn geometry_bounds(geometry: &Geometry) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    let mut include = |p: Point| {
        bounds = Some(match bounds {
            None => Bounds::from_point(p),
            Some(mut b) => {
                b.include(p);
                b
            }
        });
    };

    for mark in &geometry.marks {
        for corner in mark_corners(mark) {
            include(corner);
        }
    }

    for path in &geometry.paths {
        let mut current: Option<Point> = None;
        for cmd in &path.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    include(p);
                    current = Some(p);
                }
                PathCommand::CurveTo { c1, c2, end } => {
                    include(end);
                    if let Some(start) = current {
                        let mut ts = axis_extrema(start.x, c1.x, c2.x, end.x);
                        ts.extend(axis_extrema(start.y, c1.y, c2.y, end.y));
                        for t in ts {
                            include(bezier_point(t, start, c1, c2, end));
                        }
                    }
                    current = Some(end);
                }
                PathCommand::Close => {}
            }
        }
    }

    bounds
}
