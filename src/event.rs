//! Records emitted by `go test -json`, one JSON object per line.
//!
//! The field set mirrors the upstream test2json format. Only the fields the
//! presentation loop needs are decoded; everything else is ignored, and
//! missing fields default so partial records still parse.

use serde::Deserialize;

/// Action value for a passing test or package.
pub const ACTION_PASS: &str = "pass";
/// Action value for a failing test or package.
pub const ACTION_FAIL: &str = "fail";
/// Action value for a line of captured test output.
pub const ACTION_OUTPUT: &str = "output";

/// Prefix identifying ordinary tests.
pub const TEST_PREFIX: &str = "Test";
/// Prefix identifying fuzz targets.
pub const FUZZ_PREFIX: &str = "Fuzz";

/// One event from the test runner's JSON stream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Event {
    pub action: String,
    pub package: String,
    pub test: String,
    pub output: String,
    /// Elapsed time in seconds.
    pub elapsed: f64,
}

impl Event {
    /// Decode a single line of runner output.
    pub fn parse_json(line: &str) -> serde_json::Result<Event> {
        serde_json::from_str(line)
    }

    /// A pass or fail outcome for an ordinary test. Benchmarks, examples,
    /// fuzz targets and package-level records are not test results.
    pub fn is_test_result(&self) -> bool {
        self.test.starts_with(TEST_PREFIX)
            && (self.action == ACTION_PASS || self.action == ACTION_FAIL)
    }

    /// A pass or fail outcome for a whole package (no test name). Marks the
    /// point where the package's buffered results can be printed.
    pub fn is_package_result(&self) -> bool {
        self.test.is_empty() && (self.action == ACTION_PASS || self.action == ACTION_FAIL)
    }

    /// A failing fuzz target. Fuzz case names carry no sentence worth
    /// rendering, so these trigger raw output passthrough instead.
    pub fn is_fuzz_fail(&self) -> bool {
        self.action == ACTION_FAIL && self.test.starts_with(FUZZ_PREFIX)
    }

    /// A line of captured output, buffered in case a fuzz target fails.
    pub fn is_output(&self) -> bool {
        self.action == ACTION_OUTPUT
    }

    /// Status glyph for a result line.
    pub fn status(&self) -> &'static str {
        if self.action == ACTION_PASS {
            "✔"
        } else {
            "x"
        }
    }
}
