//! Folder-level glue: find cut files, pick output paths, convert many files.
//!
//! Every file is converted independently, so a batch can run on a worker
//! pool; a failure in one file never affects another.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ConvertOptions;
use crate::convert::{Conversion, convert_file};
use crate::error::{ConvertError, FileError};

/// List `.xml` files directly inside `dir` (no recursion), sorted by path
pub fn find_xml_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `<output_dir>/<input stem>.svg`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".svg");
    output_dir.join(name)
}

/// What happened to one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<Conversion, FileError>,
}

/// Outcomes of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Total warnings across converted files
    pub fn warnings(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|c| c.warnings.len())
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// One input with its resolved output path
struct Job<'a> {
    input: &'a Path,
    output: PathBuf,
    /// Earlier input that already maps to the same output
    claimed_by: Option<&'a Path>,
}

/// Resolve every output path up front. Inputs whose names differ only in
/// the case of the extension (`job.xml`, `job.XML`) share an output, and
/// only the first of them gets to write it.
fn plan_jobs<'a>(inputs: &'a [PathBuf], output_dir: &Path) -> Vec<Job<'a>> {
    let mut claimed: HashMap<PathBuf, &'a Path> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let output = output_path_for(input, output_dir);
            let claimed_by = match claimed.entry(output.clone()) {
                Entry::Occupied(first) => Some(*first.get()),
                Entry::Vacant(slot) => {
                    slot.insert(input.as_path());
                    None
                }
            };
            Job {
                input: input.as_path(),
                output,
                claimed_by,
            }
        })
        .collect()
}

fn convert_one(job: &Job<'_>, opts: &ConvertOptions) -> FileOutcome {
    let result = match job.claimed_by {
        Some(first) => {
            warn!(input = %job.input.display(), first = %first.display(), "output path conflict");
            Err(FileError::new(
                job.input,
                ConvertError::OutputConflict {
                    output: job.output.clone(),
                    claimed_by: first.to_path_buf(),
                },
            ))
        }
        None => {
            debug!(input = %job.input.display(), output = %job.output.display(), "converting");
            convert_file(job.input, &job.output, opts)
        }
    };
    FileOutcome {
        input: job.input.to_path_buf(),
        output: job.output.clone(),
        result,
    }
}

/// Convert every input into `output_dir`. Runs sequentially for
/// `jobs <= 1`, otherwise on a pool of `jobs` threads. An input whose output
/// path is taken by an earlier input fails with
/// [`ConvertError::OutputConflict`] instead of overwriting it.
pub fn convert_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    opts: &ConvertOptions,
    jobs: usize,
) -> Result<BatchReport, rayon::ThreadPoolBuildError> {
    let planned = plan_jobs(inputs, output_dir);

    let outcomes: Vec<FileOutcome> = if jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(|| planned.par_iter().map(|job| convert_one(job, opts)).collect())
    } else {
        planned.iter().map(|job| convert_one(job, opts)).collect()
    };

    Ok(BatchReport { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("in/job.xml"), Path::new("out")),
            PathBuf::from("out/job.svg")
        );
        assert_eq!(
            output_path_for(Path::new("in/job.v2.xml"), Path::new("in")),
            PathBuf::from("in/job.v2.svg")
        );
    }

    #[test]
    fn test_find_xml_files_is_sorted_and_flat() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xml"), "").unwrap();
        fs::write(dir.path().join("a.XML"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.xml")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.xml"), "").unwrap();

        let files = find_xml_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.XML", "b.xml"]);
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport::default();
        assert!(report.is_success());
        assert_eq!(report.failed(), 0);
        assert_eq!(report.warnings(), 0);
    }

    #[test]
    fn test_extension_case_conflict_fails_later_file() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let xml = r#"<cut-list units="hundredths_mm" width="1000" height="800"/>"#;
        fs::write(input.path().join("job.XML"), xml).unwrap();
        fs::write(input.path().join("job.xml"), xml).unwrap();

        let inputs = find_xml_files(input.path()).unwrap();
        assert_eq!(inputs.len(), 2);

        for jobs in [1, 2] {
            let report =
                convert_batch(&inputs, output.path(), &ConvertOptions::default(), jobs).unwrap();
            assert_eq!(report.succeeded(), 1);
            assert!(report.outcomes[0].result.is_ok());

            let err = report.outcomes[1].result.as_ref().unwrap_err();
            assert_eq!(err.stage, crate::error::Stage::Write);
            assert!(err.file.ends_with("job.xml"));
            match &err.source {
                ConvertError::OutputConflict { output: out, claimed_by } => {
                    assert_eq!(out, &output.path().join("job.svg"));
                    assert!(claimed_by.ends_with("job.XML"));
                }
                other => panic!("expected OutputConflict, got {:?}", other),
            }
        }
    }
}
