use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use super::transform::{InvalidCoordinate, parse_coordinate, parse_scaled_coordinate, scaled_in_range};
use super::types::*;
use super::units::Unit;
use crate::error::{ConvertError, ElementKind, Warning};

/// A parsed cut file plus everything that was skipped along the way
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document: CutDocument,
    pub warnings: Vec<Warning>,
}

/// Attributes of one element as (name, unescaped value) pairs
#[derive(Debug, Default)]
struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn read(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Self, ConvertError> {
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| syntax_error(reader, err))?;
            let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|err| syntax_error(reader, err))?;
            attrs.push((key.to_string(), value.into_owned()));
        }
        Ok(Attrs(attrs))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn coordinate(
        &self,
        key: &'static str,
        scale: f64,
    ) -> Result<f64, (&'static str, InvalidCoordinate)> {
        parse_scaled_coordinate(self.get(key), scale).map_err(|err| (key, err))
    }

    fn point(
        &self,
        x: &'static str,
        y: &'static str,
        scale: f64,
    ) -> Result<RawPoint, (&'static str, InvalidCoordinate)> {
        Ok(RawPoint::new(
            self.coordinate(x, scale)?,
            self.coordinate(y, scale)?,
        ))
    }
}

/// Root children collected so far
#[derive(Debug, Default)]
struct Contents {
    marks: Vec<RegMark>,
    paths: Vec<CutPath>,
    warnings: Vec<Warning>,
}

fn syntax_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> ConvertError {
    ConvertError::XmlSyntax {
        position: reader.buffer_position() as u64,
        message: err.to_string(),
    }
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Parse a cut file. Fails on malformed XML and on unusable root
/// dimensions; bad elements are skipped and reported as warnings.
pub fn parse_cut_document(xml: &str) -> Result<ParsedDocument, ConvertError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Attrs> = None;
    let mut root_closed = false;
    let mut unit = Unit::Unrecognized(None);
    let mut contents = Contents::default();

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if root_closed {
                    return Err(syntax_error(&reader, "junk after document element"));
                } else if root.is_none() {
                    debug!(root = %element_name(e), "reading cut file root");
                    let attrs = Attrs::read(&reader, e)?;
                    unit = Unit::from_attr(attrs.get("units"));
                    root = Some(attrs);
                } else {
                    parse_root_child(&mut reader, e, true, unit.scale(), &mut contents)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if root_closed {
                    return Err(syntax_error(&reader, "junk after document element"));
                } else if root.is_none() {
                    let attrs = Attrs::read(&reader, e)?;
                    unit = Unit::from_attr(attrs.get("units"));
                    root = Some(attrs);
                    root_closed = true;
                } else {
                    parse_root_child(&mut reader, e, false, unit.scale(), &mut contents)?;
                }
            }
            // Children consume their own end tags, so this is the root closing
            Ok(Event::End(_)) => root_closed = true,
            Ok(Event::Text(_)) | Ok(Event::CData(_)) => {
                if root.is_none() || root_closed {
                    return Err(syntax_error(&reader, "text outside the root element"));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(syntax_error(&reader, e)),
            _ => {}
        }
        buf.clear();
    }

    let root = match root {
        Some(attrs) => attrs,
        None => return Err(syntax_error(&reader, "no element found")),
    };
    if !root_closed {
        return Err(syntax_error(&reader, "unexpected end of document"));
    }

    let Contents {
        marks,
        paths,
        mut warnings,
    } = contents;
    if let Some(w) = unit.warning() {
        warnings.insert(0, w);
    }
    let width_raw = dimension(&root, "width", unit.scale())?;
    let height_raw = dimension(&root, "height", unit.scale())?;

    debug!(
        ?unit,
        width_raw,
        height_raw,
        marks = marks.len(),
        paths = paths.len(),
        warnings = warnings.len(),
        "parsed cut file"
    );

    Ok(ParsedDocument {
        document: CutDocument {
            unit,
            width_raw,
            height_raw,
            marks,
            paths,
        },
        warnings,
    })
}

/// Read a canvas dimension off the root. It must be a number that is still
/// finite and positive once scaled to millimeters.
fn dimension(root: &Attrs, attribute: &'static str, scale: f64) -> Result<f64, ConvertError> {
    let missing = |reason: String| ConvertError::MissingDimensions { attribute, reason };

    let raw = root
        .get(attribute)
        .ok_or_else(|| missing("attribute is missing".to_string()))?;
    let value =
        parse_coordinate(Some(raw)).map_err(|_| missing(format!("\"{}\" is not a number", raw)))?;
    if !scaled_in_range(value, scale) {
        return Err(missing(format!("\"{}\" is out of range", raw)));
    }
    if value * scale <= 0.0 {
        return Err(missing(format!("\"{}\" must be greater than zero", raw)));
    }
    Ok(value)
}

/// Handle one direct child of the root whose start tag was just read.
/// `has_content` is false for a self-closing element, which has no end tag
/// left to consume.
fn parse_root_child(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart,
    has_content: bool,
    scale: f64,
    contents: &mut Contents,
) -> Result<(), ConvertError> {
    match element_name(e).as_str() {
        "reg-mark" => {
            let attrs = Attrs::read(reader, e)?;
            if let Some(mark) = parse_reg_mark(&attrs, scale, &mut contents.warnings) {
                contents.marks.push(mark);
            }
        }
        "cut-path" => {
            let index = contents.paths.len() + 1;
            let segments = if has_content {
                parse_cut_path(reader, index, scale, &mut contents.warnings)?
            } else {
                Vec::new()
            };
            trace!(index, segments = segments.len(), "parsed cut-path");
            contents.paths.push(CutPath { index, segments });
            return Ok(());
        }
        other => trace!(element = other, "ignoring unknown element"),
    }

    if has_content {
        skip_element(reader)?;
    }
    Ok(())
}

fn parse_reg_mark(attrs: &Attrs, scale: f64, warnings: &mut Vec<Warning>) -> Option<RegMark> {
    match attrs.point("x", "y", scale) {
        Ok(center) => Some(RegMark { center }),
        Err((attribute, err)) => {
            trace!(attribute, value = ?err.value, "skipping reg-mark");
            warnings.push(Warning::InvalidCoordinate {
                element: ElementKind::RegMark,
                path: None,
                attribute,
                value: err.value,
            });
            None
        }
    }
}

/// Parse the children of a `<cut-path>` whose start tag was just read, up to
/// and including its end tag
fn parse_cut_path(
    reader: &mut Reader<&[u8]>,
    index: usize,
    scale: f64,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<PathSegment>, ConvertError> {
    let mut segments = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let attrs = Attrs::read(reader, e)?;
                segments.extend(parse_segment(&element_name(e), &attrs, index, scale, warnings));
                skip_element(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let attrs = Attrs::read(reader, e)?;
                segments.extend(parse_segment(&element_name(e), &attrs, index, scale, warnings));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(syntax_error(reader, "unexpected end of document")),
            Err(e) => return Err(syntax_error(reader, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(segments)
}

fn parse_segment(
    name: &str,
    attrs: &Attrs,
    path: usize,
    scale: f64,
    warnings: &mut Vec<Warning>,
) -> Option<PathSegment> {
    let (element, segment) = match name {
        "point" => (
            ElementKind::Point,
            attrs.point("x", "y", scale).map(PathSegment::LineTo),
        ),
        "spline" => (ElementKind::Spline, read_spline(attrs, scale)),
        _ => return None,
    };

    match segment {
        Ok(seg) => Some(seg),
        Err((attribute, err)) => {
            trace!(%element, path, attribute, value = ?err.value, "skipping segment");
            warnings.push(Warning::InvalidCoordinate {
                element,
                path: Some(path),
                attribute,
                value: err.value,
            });
            None
        }
    }
}

fn read_spline(attrs: &Attrs, scale: f64) -> Result<PathSegment, (&'static str, InvalidCoordinate)> {
    Ok(PathSegment::CurveTo {
        c1: attrs.point("x1", "y1", scale)?,
        c2: attrs.point("x2", "y2", scale)?,
        end: attrs.point("x3", "y3", scale)?,
    })
}

/// Consume events up to and including the end tag of an element whose start
/// tag was just read
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), ConvertError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Ok(Event::Eof) => return Err(syntax_error(reader, "unexpected end of document")),
            Err(e) => return Err(syntax_error(reader, e)),
            _ => {}
        }
        buf.clear();
    }
}
