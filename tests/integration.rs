//! Integration tests using TOML fixtures.
//!
//! This test harness loads test cases from TOML files in the `fixtures/` directory
//! and runs them against the gbt-refs library.

use std::fs;
use std::path::Path;

use gbt_refs::{format_references, parse_records, InputFormat, Options};
use serde::Deserialize;

/// A test fixture loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct Fixture {
    /// Name of the test case
    name: String,
    /// Input records, in the format named by `format`
    input: String,
    /// Input format: "csv", "tsv" or "json"
    #[serde(default = "default_format")]
    format: String,
    /// Author truncation threshold
    #[serde(default)]
    truncate: Option<usize>,
    /// Expected citation lines, in order
    #[serde(default)]
    expected: Vec<String>,
    /// Expected error message fragment (for error tests)
    #[serde(default)]
    expected_error: Option<String>,
}

fn default_format() -> String {
    "json".to_string()
}

/// Load all fixtures from a directory.
fn load_fixtures(dir: &Path) -> Vec<(String, Fixture)> {
    let mut fixtures = Vec::new();

    if !dir.exists() {
        return fixtures;
    }

    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().is_some_and(|e| e == "toml") {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: Fixture = toml::from_str(&content).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            fixtures.push((name, fixture));
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

fn input_format(name: &str, fixture: &Fixture) -> InputFormat {
    match fixture.format.as_str() {
        "csv" => InputFormat::Csv,
        "tsv" => InputFormat::Tsv,
        "json" => InputFormat::Json,
        other => panic!("Test '{}' has unknown format '{}'", name, other),
    }
}

fn options(fixture: &Fixture) -> Options {
    fixture
        .truncate
        .map(|truncate| Options { truncate })
        .unwrap_or_default()
}

/// Run citation tests - format records and compare every line.
fn run_citation_test(name: &str, fixture: &Fixture) {
    let table = parse_records(&fixture.input, input_format(name, fixture))
        .unwrap_or_else(|e| panic!("Test '{}' input did not parse: {}", name, e));

    let lines = format_references(&table, &options(fixture))
        .unwrap_or_else(|e| panic!("Test '{}' failed with unexpected error: {}", name, e));

    assert_eq!(
        lines.len(),
        fixture.expected.len(),
        "Test '{}' line count mismatch: {:#?}",
        name,
        lines
    );
    for (i, (actual, expected)) in lines.iter().zip(&fixture.expected).enumerate() {
        assert_eq!(
            actual,
            expected,
            "Test '{}' mismatch at line {}",
            name,
            i + 1
        );
    }
}

/// Run error tests - verify proper error handling.
fn run_error_test(name: &str, fixture: &Fixture) {
    let table = parse_records(&fixture.input, input_format(name, fixture))
        .unwrap_or_else(|e| panic!("Test '{}' input did not parse: {}", name, e));
    let result = format_references(&table, &options(fixture));

    match result {
        Ok(lines) => panic!("Test '{}' expected an error but got {:?}", name, lines),
        Err(e) => {
            let expected_error = fixture
                .expected_error
                .as_deref()
                .unwrap_or_else(|| panic!("Test '{}' has no expected_error", name));
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected_error),
                "Test '{}' error mismatch: expected '{}', got '{}'",
                name,
                expected_error,
                error_msg
            );
        }
    }
}

#[test]
fn test_citation_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/citations");
    let fixtures = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "no citation fixtures found");

    for (name, fixture) in fixtures {
        println!("Running citation test: {}", fixture.name);
        run_citation_test(&name, &fixture);
    }
}

#[test]
fn test_error_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/errors");
    let fixtures = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "no error fixtures found");

    for (name, fixture) in fixtures {
        println!("Running error test: {}", fixture.name);
        run_error_test(&name, &fixture);
    }
}
