//! Error and warning types for cut file conversion

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: any of these aborts the conversion of one file.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("XML syntax error at byte {position}: {message}")]
    XmlSyntax { position: u64, message: String },

    #[error("could not read '{attribute}' attribute on root element: {reason}")]
    MissingDimensions {
        attribute: &'static str,
        reason: String,
    },

    #[error("could not read input file: {0}")]
    Read(#[source] std::io::Error),

    #[error("could not write output file: {0}")]
    Write(#[source] std::io::Error),

    #[error("output '{}' is already written by '{}'", .output.display(), .claimed_by.display())]
    OutputConflict { output: PathBuf, claimed_by: PathBuf },
}

/// Pipeline stage at which a file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Parse,
    Dimensions,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Parse => "parse",
            Stage::Dimensions => "dimensions",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

impl ConvertError {
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::Read(_) => Stage::Read,
            ConvertError::XmlSyntax { .. } => Stage::Parse,
            ConvertError::MissingDimensions { .. } => Stage::Dimensions,
            ConvertError::Write(_) | ConvertError::OutputConflict { .. } => Stage::Write,
        }
    }
}

/// A fatal error tied to the file it happened in
#[derive(Error, Debug)]
#[error("{} ({stage} stage): {source}", .file.display())]
pub struct FileError {
    pub file: PathBuf,
    pub stage: Stage,
    #[source]
    pub source: ConvertError,
}

impl FileError {
    pub fn new(file: impl Into<PathBuf>, source: ConvertError) -> Self {
        Self {
            file: file.into(),
            stage: source.stage(),
            source,
        }
    }
}

/// The element a coordinate warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    RegMark,
    Point,
    Spline,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::RegMark => "reg-mark",
            ElementKind::Point => "point",
            ElementKind::Spline => "spline",
        };
        f.write_str(name)
    }
}

/// Recoverable problems. The conversion keeps going and reports these
/// alongside the SVG.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("unrecognized units {}, assuming 1:1 scale", display_unit(.unit))]
    UnrecognizedUnit { unit: Option<String> },

    #[error("skipping {element}{} with invalid '{attribute}' coordinate {}", display_path(.path), display_value(.value))]
    InvalidCoordinate {
        element: ElementKind,
        /// 1-based index of the owning cut-path, if any
        path: Option<usize>,
        attribute: &'static str,
        value: Option<String>,
    },

    #[error("cut-path {path} has no usable segments, omitting it")]
    EmptyPath { path: usize },
}

fn display_unit(unit: &Option<String>) -> String {
    match unit {
        Some(u) => format!("'{}'", u),
        None => "(none)".to_string(),
    }
}

fn display_path(path: &Option<usize>) -> String {
    match path {
        Some(p) => format!(" in cut-path {}", p),
        None => String::new(),
    }
}

fn display_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v),
        None => "(missing)".to_string(),
    }
}
