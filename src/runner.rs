//! Invocation of the external test runner and exit-status propagation.

use std::io::{BufReader, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::filter::{EventFilter, FilterConfig};

/// Configuration for launching the test runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Test runner binary; tests substitute a stub here.
    pub program: String,
    /// Colorize status glyphs in the rendered output.
    pub color: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            program: "go".to_string(),
            color: false,
        }
    }
}

/// Run `<program> test -json <args…>`, stream its stdout through the event
/// filter, and fold the exit status into the returned flag. The runner's
/// stderr passes through untouched so build errors stay visible.
pub fn run_tests<W: Write>(config: &RunnerConfig, args: &[String], out: W) -> Result<bool> {
    let mut command = Command::new(&config.program);
    command
        .arg("test")
        .arg("-json")
        .args(args)
        .stdout(Stdio::piped());

    debug!(program = %config.program, ?args, "spawning test runner");
    let mut child = command
        .spawn()
        .with_context(|| format!("failed to launch test runner '{}'", config.program))?;
    let stdout = child
        .stdout
        .take()
        .context("test runner spawned without a stdout pipe")?;

    let mut filter = EventFilter::new(FilterConfig { color: config.color }, out);
    let filtered_ok = filter.run(BufReader::new(stdout))?;

    let status = child.wait().context("waiting for test runner")?;
    if !status.success() {
        debug!(%status, "test runner exited with failure");
    }
    Ok(filtered_ok && status.success())
}
