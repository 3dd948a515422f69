//! The presentation loop: consumes runner events in arrival order, groups
//! results by package, and prints one sentence per relevant record.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::event::{Event, ACTION_FAIL, ACTION_PASS};
use crate::prettifier::{prettify_with_observer, TraceObserver};

/// Configuration for event filtering and rendering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Colorize status glyphs (green pass, red fail).
    pub color: bool,
}

/// Streams test-runner events to rendered output.
///
/// Test results and captured output are buffered per package; when the
/// package's own result record arrives, the buffered block is printed under
/// a package header and the buffers are dropped, so memory stays bounded by
/// the largest in-flight package.
pub struct EventFilter<W: Write> {
    config: FilterConfig,
    out: W,
    results: HashMap<String, Vec<String>>,
    outputs: HashMap<String, Vec<String>>,
    ok: bool,
}

impl<W: Write> EventFilter<W> {
    pub fn new(config: FilterConfig, out: W) -> Self {
        EventFilter {
            config,
            out,
            results: HashMap::new(),
            outputs: HashMap::new(),
            ok: true,
        }
    }

    /// Consume the event stream to exhaustion. Returns true if every package
    /// passed and no fuzz target failed. Malformed lines are skipped with a
    /// warning; they never abort the stream.
    pub fn run(&mut self, input: impl BufRead) -> Result<bool> {
        self.ok = true;
        for line in input.lines() {
            let line = line.context("reading event stream")?;
            match Event::parse_json(&line) {
                Ok(event) => self.handle(event)?,
                Err(err) => {
                    warn!(%err, line = %line, "skipping malformed event line");
                }
            }
        }
        self.out.flush().context("flushing output")?;
        Ok(self.ok)
    }

    fn handle(&mut self, event: Event) -> Result<()> {
        if event.is_package_result() {
            writeln!(self.out, "{}:", event.package)?;
            for line in self.results.remove(&event.package).unwrap_or_default() {
                writeln!(self.out, "{line}")?;
            }
            writeln!(self.out)?;
            self.outputs.remove(&event.package);
            if event.action == ACTION_FAIL {
                self.ok = false;
            }
        } else if event.is_fuzz_fail() {
            // Fuzz case names carry no sentence; replay the raw output so
            // the failing input is not lost.
            self.ok = false;
            for line in self.outputs.remove(&event.package).unwrap_or_default() {
                write!(self.out, "{line}")?;
            }
        } else if event.is_output() {
            self.outputs
                .entry(event.package.clone())
                .or_default()
                .push(event.output);
        } else if event.is_test_result() {
            let line = self.format_result(&event);
            self.results
                .entry(event.package.clone())
                .or_default()
                .push(line);
        }
        Ok(())
    }

    fn format_result(&self, event: &Event) -> String {
        let sentence = prettify_with_observer(&event.test, &mut TraceObserver);
        let glyph = if !self.config.color {
            event.status().to_string()
        } else if event.action == ACTION_PASS {
            event.status().green().to_string()
        } else {
            event.status().red().to_string()
        };
        format!(" {} {} ({:.2}s)", glyph, sentence, event.elapsed)
    }
}
