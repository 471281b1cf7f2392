//! Result accumulation and the end-of-run dump.

use crate::error::TeclaResult;
use crate::suite::TestCase;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one executed test case, in the wire form downstream
/// cross-browser comparisons consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// The combination that was injected
    pub test_args: TestCase,
    /// Whether the keystroke reached the page
    pub success: bool,
}

impl CaseRecord {
    /// Create a record
    #[must_use]
    pub const fn new(test_args: TestCase, success: bool) -> Self {
        Self { test_args, success }
    }
}

/// Accumulates records in arrival order and serializes them at run end.
#[derive(Debug, Default)]
pub struct RunRecorder {
    records: Vec<CaseRecord>,
}

impl RunRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record
    pub fn push(&mut self, record: CaseRecord) {
        self.records.push(record);
    }

    /// Records in arrival order
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Number of cases recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of successful cases
    #[must_use]
    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    /// The full sequence as one compact JSON array
    pub fn summary_json(&self) -> TeclaResult<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// One-shot pretty-printed dump to
    /// `results_<browser>_<version>_<platform>.json` in `dir`,
    /// overwriting any previous file of the same name. Returns the
    /// written path.
    pub fn write_report(
        &self,
        dir: &Path,
        browser: &str,
        version: &str,
        platform: &str,
    ) -> TeclaResult<PathBuf> {
        let path = dir.join(results_file_name(browser, version, platform));
        std::fs::write(&path, serde_json::to_string_pretty(&self.records)?)?;
        Ok(path)
    }
}

/// File name embedding browser family, browser version, and platform.
#[must_use]
pub fn results_file_name(browser: &str, version: &str, platform: &str) -> String {
    format!("results_{browser}_{version}_{platform}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::Modifier;

    fn record(key: char, success: bool) -> CaseRecord {
        CaseRecord::new(TestCase::new(key, Modifier::Control), success)
    }

    #[test]
    fn test_records_keep_arrival_order() {
        let mut recorder = RunRecorder::new();
        recorder.push(record('a', true));
        recorder.push(record('b', false));
        recorder.push(record('c', true));

        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.passed(), 2);
        let keys: Vec<char> = recorder.records().iter().map(|r| r.test_args.key).collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_record_wire_form() {
        let json = serde_json::to_string(&record('a', true)).unwrap();
        assert_eq!(
            json,
            r#"{"testArgs":{"key":"a","modifier":"control"},"success":true}"#
        );
    }

    #[test]
    fn test_summary_is_one_json_array() {
        let mut recorder = RunRecorder::new();
        recorder.push(record('a', true));
        let summary = recorder.summary_json().unwrap();
        let parsed: Vec<CaseRecord> = serde_json::from_str(&summary).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_results_file_name() {
        assert_eq!(
            results_file_name("msedge", "121.0", "darwin"),
            "results_msedge_121.0_darwin.json"
        );
    }

    #[test]
    fn test_write_report_pretty_prints_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = RunRecorder::new();
        recorder.push(record('a', false));

        let path = recorder
            .write_report(dir.path(), "msedge", "121.0", "linux")
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "results_msedge_121.0_linux.json"
        );
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains('\n'), "report should be pretty-printed");

        recorder.push(record('b', true));
        recorder
            .write_report(dir.path(), "msedge", "121.0", "linux")
            .unwrap();
        let second: Vec<CaseRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(second.len(), 2, "rewrite replaces the previous dump");
    }
}
