// system-tests/src/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Artifact helpers for contract system tests.
// Purpose: Create per-test run roots and write deterministic summaries.
// Dependencies: patterns-contract, serde, serde_jcs
// ============================================================================

//! ## Overview
//! [`TestReporter`] owns a per-test artifact directory and writes
//! `summary.json` (canonical JSON) and `summary.md` when the test finishes,
//! or from `Drop` when it panics first.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use patterns_contract::ContractConfig;
use serde::Serialize;

/// Serialized summary of one system test.
#[derive(Debug, Serialize)]
struct TestSummary {
    /// Test name.
    test_name: String,
    /// Final status label.
    status: String,
    /// Start timestamp in milliseconds since the epoch.
    started_at_ms: u128,
    /// End timestamp in milliseconds since the epoch.
    ended_at_ms: u128,
    /// Wall-clock duration.
    duration_ms: u128,
    /// Free-form notes.
    notes: Vec<String>,
    /// Artifact file names written by the test.
    artifacts: Vec<String>,
}

/// Current time in milliseconds since the epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Default artifact root for `test_name`.
fn default_run_root(test_name: &str) -> PathBuf {
    let stamp = now_millis();
    PathBuf::from("target/system-tests").join(format!("run_{stamp}")).join(test_name)
}

/// Artifact directory for a single system test.
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    /// Directory all artifacts are written into.
    root: PathBuf,
}

impl TestArtifacts {
    /// Creates the artifact root for a test, honoring the configured run root.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration is invalid or the directory cannot
    /// be created.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let config = ContractConfig::load().map_err(io::Error::other)?;
        let root = config
            .run_root
            .map_or_else(|| default_run_root(test_name), |root| root.join(test_name));
        Self::at(root)
    }

    /// Creates an artifact root at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn at(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory for the test artifacts.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(io::Error::other)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a text artifact with UTF-8 encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }
}

/// Writes a summary for a test even when the test panics.
#[derive(Debug)]
pub struct TestReporter {
    /// Artifact directory for this test.
    artifacts: TestArtifacts,
    /// Test name.
    test_name: String,
    /// Start timestamp in milliseconds.
    started_at_ms: u128,
    /// Whether [`TestReporter::finish`] already ran.
    finalized: bool,
}

impl TestReporter {
    /// Creates a reporter for the named test.
    ///
    /// # Errors
    ///
    /// Returns an error when the artifact directory cannot be prepared.
    pub fn new(test_name: &str) -> io::Result<Self> {
        Ok(Self::with_artifacts(test_name, TestArtifacts::new(test_name)?))
    }

    /// Creates a reporter writing into `artifacts`.
    #[must_use]
    pub fn with_artifacts(test_name: &str, artifacts: TestArtifacts) -> Self {
        Self {
            artifacts,
            test_name: test_name.to_string(),
            started_at_ms: now_millis(),
            finalized: false,
        }
    }

    /// Returns the artifact manager.
    #[must_use]
    pub const fn artifacts(&self) -> &TestArtifacts {
        &self.artifacts
    }

    /// Writes the final summary for the test.
    ///
    /// # Errors
    ///
    /// Returns an error when a summary file cannot be written.
    pub fn finish(
        &mut self,
        status: &str,
        notes: Vec<String>,
        artifacts: Vec<String>,
    ) -> io::Result<()> {
        let ended_at_ms = now_millis();
        let summary = TestSummary {
            test_name: self.test_name.clone(),
            status: status.to_string(),
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            notes,
            artifacts,
        };
        self.artifacts.write_json("summary.json", &summary)?;
        self.artifacts.write_text("summary.md", &summary_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "unknown" };
        let _ = self.finish(
            status,
            vec!["test terminated without explicit summary".to_string()],
            Vec::new(),
        );
    }
}

/// Renders a summary as Markdown.
fn summary_markdown(summary: &TestSummary) -> String {
    let mut out = String::new();
    out.push_str("# System-Test Summary\n\n## Status\n\n");
    let _ = writeln!(out, "- Test: {}", summary.test_name);
    let _ = writeln!(out, "- Status: {}", summary.status);
    let _ = writeln!(out, "- Duration (ms): {}", summary.duration_ms);
    push_list(&mut out, "Notes", &summary.notes);
    push_list(&mut out, "Artifacts", &summary.artifacts);
    out
}

/// Appends a Markdown section listing `items`, or `None` when empty.
fn push_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = write!(out, "\n## {heading}\n\n");
    if items.is_empty() {
        out.push_str("- None\n");
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
