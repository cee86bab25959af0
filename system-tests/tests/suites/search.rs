// system-tests/tests/suites/search.rs
// ============================================================================
// Module: Search Tests
// Description: Live table-driven search checks.
// Purpose: Ensure search results mention the term and misses return `[]`.
// Dependencies: system-tests helpers, patterns-contract
// ============================================================================

//! Search system tests.

use helpers::live_client;
use patterns_contract::SEARCH_CASES;
use patterns_contract::SearchOutcome;
use patterns_contract::scenarios::run_search_cases;
use system_tests::artifacts::TestReporter;

use crate::helpers;

#[test]
fn search_patterns() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("search_patterns")?;
    let client = live_client()?;

    let mut notes = Vec::new();
    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for (case, outcome) in run_search_cases(&client, SEARCH_CASES) {
        match outcome {
            SearchOutcome::Passed(report) => {
                notes.push(format!("{}: pass ({} patterns)", case.name, report.pattern_count));
                reports.push(report);
            }
            SearchOutcome::Skipped(reason) => {
                notes.push(format!("{}: skipped ({reason})", case.name));
            }
            SearchOutcome::Failed(err) => {
                notes.push(format!("{}: fail ({err})", case.name));
                failures.push(format!("{}: {err}", case.name));
            }
        }
    }

    reporter.artifacts().write_json("reports.json", &reports)?;
    let status = if failures.is_empty() { "pass" } else { "fail" };
    reporter.finish(
        status,
        notes,
        vec!["summary.json".to_string(), "summary.md".to_string(), "reports.json".to_string()],
    )?;
    drop(reporter);
    if !failures.is_empty() {
        return Err(failures.join("; ").into());
    }
    Ok(())
}
