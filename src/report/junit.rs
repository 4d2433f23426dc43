use crate::runner::state::{RunSummary, TestResult};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from a run's results
pub fn generate_junit_xml(results: &[TestResult]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let summary = RunSummary::from_results(results);
    let tests = summary.total.to_string();
    let failures = summary.failed.to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "mod-api-tester-run"));
    suites_start.push_attribute(("tests", tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // One suite per run; steps are the cases
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "mod-api"));
    suite_start.push_attribute(("tests", tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("skipped", "0"));
    if let Some(first) = results.first() {
        suite_start.push_attribute(("timestamp", first.timestamp.as_str()));
    }
    writer.write_event(Event::Start(suite_start))?;

    for result in results {
        write_test_case(&mut writer, result)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, result: &TestResult) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", result.test.as_str()));
    case_start.push_attribute(("classname", "mod_api"));

    if result.success {
        writer.write_event(Event::Empty(case_start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(case_start))?;

    let mut fail_start = BytesStart::new("failure");
    fail_start.push_attribute(("message", result.message.as_str()));
    fail_start.push_attribute(("type", "StepFailure"));
    writer.write_event(Event::Start(fail_start))?;
    if let Some(data) = &result.response_data {
        let body = serde_json::to_string_pretty(data)?;
        writer.write_event(Event::Text(BytesText::new(&body)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("failure")))?;

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Write report to file
pub fn write_report(results: &[TestResult], path: &Path) -> Result<()> {
    let xml = generate_junit_xml(results)?;
    std::fs::write(path, xml)?;
    println!("    Generated JUnit report: {}", path.display());
    Ok(())
}

pub fn generate(results: &[TestResult], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_report(results, path),
        None => {
            println!("{}", generate_junit_xml(results)?);
            Ok(())
        }
    }
}
