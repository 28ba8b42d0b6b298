//! # cutfile-svg
//!
//! A Rust library for converting XML cut files (registration marks and
//! cut-paths of points and cubic splines) into SVG drawings at physical
//! size.
//!
//! ## Features
//!
//! - **Unit normalization**: `hundredths_mm` and `inches` to millimeters
//! - **Y-axis flip**: bottom-left cut-file origin to top-left SVG origin
//! - **Skip and continue**: bad elements become warnings, not failures
//! - **Batch conversion**: a folder of cut files, optionally in parallel
//!
//! ## Example
//!
//! ```rust,ignore
//! use cutfile_svg::{ConvertOptions, convert_str};
//!
//! let xml = std::fs::read_to_string("job.xml").unwrap();
//! let conversion = convert_str(&xml, &ConvertOptions::default()).unwrap();
//! for warning in &conversion.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! std::fs::write("job.svg", conversion.svg).unwrap();
//! ```

pub mod batch;
pub mod config;
pub mod convert;
pub mod cutfile;
pub mod error;

// Re-export commonly used items
pub use batch::{BatchReport, FileOutcome, convert_batch, find_xml_files, output_path_for};
pub use config::{ConvertOptions, Orientation};
pub use convert::{Conversion, convert_file, convert_str, convert_to_path};
pub use cutfile::{CutDocument, parse_cut_document};
pub use error::{ConvertError, ElementKind, FileError, Stage, Warning};
