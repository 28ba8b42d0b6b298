use cutfile_svg::{
    ConvertError, ConvertOptions, ElementKind, Orientation, Stage, Warning, convert_batch,
    convert_file, convert_str, find_xml_files, output_path_for,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

/// Normalize numeric values in a string for comparison
fn normalize_numbers(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '-' || chars[i].is_ascii_digit() {
            let mut num_str = String::new();
            if chars[i] == '-' {
                num_str.push(chars[i]);
                i += 1;
            }
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                num_str.push(chars[i]);
                i += 1;
            }
            if let Ok(n) = num_str.parse::<f64>() {
                // 3 decimal places, trailing zeros removed
                let formatted = format!("{:.3}", n);
                let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
                result.push_str(trimmed);
            } else {
                result.push_str(&num_str);
            }
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }
    result
}

/// Normalize SVG for comparison: one element per line, numbers rounded
fn normalize_svg(svg: &str) -> String {
    svg.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .map(|line| normalize_numbers(&line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn artifacts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/artifacts")
}

fn read_artifact(file: &str) -> String {
    fs::read_to_string(artifacts_dir().join(file))
        .unwrap_or_else(|_| panic!("Failed to read {}", file))
}

fn run_conversion_test(name: &str) -> Vec<Warning> {
    let xml = read_artifact(&format!("{}.xml", name));
    let expected_svg = read_artifact(&format!("{}.svg", name));

    let conversion = convert_str(&xml, &ConvertOptions::default())
        .unwrap_or_else(|e| panic!("Failed to convert {}.xml: {}", name, e));

    assert_eq!(
        normalize_svg(&conversion.svg),
        normalize_svg(&expected_svg),
        "SVG mismatch for {}",
        name
    );
    conversion.warnings
}

#[test]
fn test_reg_mark() {
    let warnings = run_conversion_test("reg_mark");
    assert!(warnings.is_empty());
}

#[test]
fn test_tab_inches() {
    let warnings = run_conversion_test("tab_inches");
    assert!(warnings.is_empty());
}

#[test]
fn test_partial() {
    let warnings = run_conversion_test("partial");
    assert_eq!(
        warnings,
        vec![
            Warning::InvalidCoordinate {
                element: ElementKind::RegMark,
                path: None,
                attribute: "x",
                value: Some("left".to_string()),
            },
            Warning::InvalidCoordinate {
                element: ElementKind::Point,
                path: Some(1),
                attribute: "x",
                value: Some(String::new()),
            },
            Warning::InvalidCoordinate {
                element: ElementKind::Point,
                path: Some(2),
                attribute: "x",
                value: Some("a".to_string()),
            },
            Warning::EmptyPath { path: 2 },
        ]
    );
}

#[test]
fn test_every_path_is_closed() {
    for name in ["tab_inches", "partial"] {
        let conversion =
            convert_str(&read_artifact(&format!("{}.xml", name)), &ConvertOptions::default())
                .unwrap();
        for d in conversion
            .svg
            .split("d=\"")
            .skip(1)
            .map(|rest| &rest[..rest.find('"').unwrap()])
        {
            assert!(d.starts_with("M "), "{} path does not start with a move: {}", name, d);
            assert!(d.ends_with(" Z"), "{} path is not closed: {}", name, d);
        }
    }
}

#[test]
fn test_broken_xml_is_fatal() {
    let err = convert_str(&read_artifact("broken.xml"), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::XmlSyntax { .. }));
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_output_parses_with_physical_size() {
    let conversion =
        convert_str(&read_artifact("reg_mark.xml"), &ConvertOptions::default()).unwrap();
    let tree = usvg::Tree::from_str(&conversion.svg, &usvg::Options::default())
        .expect("generated SVG should parse");

    // 96 dpi
    let px_per_mm = 96.0 / 25.4;
    assert!((tree.size().width() as f64 - 10.0 * px_per_mm).abs() < 0.01);
    assert!((tree.size().height() as f64 - 8.0 * px_per_mm).abs() < 0.01);
    // Background and one mark
    assert_eq!(tree.root().children().len(), 2);
}

#[test]
fn test_canvas_keeps_physical_size_at_low_precision() {
    let xml = r#"<cut-list units="hundredths_mm" width="1050" height="850">
  <reg-mark x="525" y="425"/>
</cut-list>"#;
    let conversion = convert_str(xml, &ConvertOptions::new().with_precision(0)).unwrap();

    assert_eq!(conversion.width_mm, 10.5);
    assert!(conversion
        .svg
        .contains(r#"width="10.5mm" height="8.5mm" viewBox="0 0 10.5 8.5""#));
    // Coordinates still follow the precision setting
    assert!(conversion.svg.contains(r#"<rect x="4" y="3" width="3" height="3""#));
}

#[test]
fn test_rotated_output_parses() {
    let opts = ConvertOptions::new().with_orientation(Orientation::Rotate90);
    let conversion = convert_str(&read_artifact("tab_inches.xml"), &opts).unwrap();
    assert!(conversion.svg.contains("rotate(90)"));
    assert!(usvg::Tree::from_str(&conversion.svg, &usvg::Options::default()).is_ok());
}

#[test]
fn test_convert_file_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("reg_mark.svg");

    let conversion = convert_file(
        &artifacts_dir().join("reg_mark.xml"),
        &output,
        &ConvertOptions::default(),
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), conversion.svg);
}

#[test]
fn test_convert_file_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("out.svg");

    let err = convert_file(
        &artifacts_dir().join("reg_mark.xml"),
        &output,
        &ConvertOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.stage, Stage::Write);
    assert!(err.file.ends_with("reg_mark.xml"));
    assert!(!output.exists());
}

#[test]
fn test_convert_file_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(
        &dir.path().join("nope.xml"),
        &dir.path().join("nope.svg"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.stage, Stage::Read);
}

fn batch_folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["missing_width.xml", "reg_mark.xml", "broken.xml", "partial.xml"] {
        fs::copy(artifacts_dir().join(name), dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("readme.txt"), "not a cut file").unwrap();
    dir
}

fn check_batch(jobs: usize) {
    let input = batch_folder();
    let output = tempfile::tempdir().unwrap();

    let inputs = find_xml_files(input.path()).unwrap();
    assert_eq!(inputs.len(), 4);

    let report = convert_batch(&inputs, output.path(), &ConvertOptions::default(), jobs).unwrap();

    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.warnings(), 4);
    assert!(!report.is_success());

    // Input order is kept: broken, missing_width, partial, reg_mark
    let stages: Vec<Option<Stage>> = report
        .outcomes
        .iter()
        .map(|o| o.result.as_ref().err().map(|e| e.stage))
        .collect();
    assert_eq!(
        stages,
        vec![Some(Stage::Parse), Some(Stage::Dimensions), None, None]
    );

    assert!(!output_path_for(Path::new("broken.xml"), output.path()).exists());
    assert!(!output_path_for(Path::new("missing_width.xml"), output.path()).exists());
    assert!(output.path().join("partial.svg").exists());
    assert_eq!(
        normalize_svg(&fs::read_to_string(output.path().join("reg_mark.svg")).unwrap()),
        normalize_svg(&read_artifact("reg_mark.svg"))
    );
}

#[test]
fn test_batch_isolates_failures() {
    check_batch(1);
}

#[test]
fn test_parallel_batch_isolates_failures() {
    check_batch(3);
}
