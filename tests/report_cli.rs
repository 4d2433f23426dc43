//! Rendering saved results

use mod_api_tester::generate_report;
use mod_api_tester::report::json::write_results;
use mod_api_tester::runner::{TestResult, TestStep};
use tempfile::tempdir;

#[test]
fn test_saved_results_render_as_junit() {
    let temp = tempdir().unwrap();
    let results_path = temp.path().join("test_results.json");
    let output = temp.path().join("junit.xml");

    let results = vec![
        TestResult::new(TestStep::DatabaseSetup, true, "Status code: 200", None),
        TestResult::new(TestStep::ModUpload, false, "Error: connection refused", None),
    ];
    write_results(&results, &results_path).unwrap();

    generate_report(&results_path, "junit", Some(&output)).unwrap();

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"tests="2""#));
    assert!(xml.contains(r#"failures="1""#));
    assert!(xml.contains(r#"<testcase name="Mod Upload""#));
}

#[test]
fn test_unknown_format_is_rejected() {
    let temp = tempdir().unwrap();
    let results_path = temp.path().join("test_results.json");
    write_results(&[], &results_path).unwrap();

    let err = generate_report(&results_path, "html", None).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}

#[test]
fn test_missing_results_file_is_an_error() {
    let temp = tempdir().unwrap();
    assert!(generate_report(&temp.path().join("absent.json"), "json", None).is_err());
}
