//! Console reporting of verification events: human text or JSON lines.

use serde::Serialize;
use std::io::{self, Write};

use super::{EntryOutcome, RunSummary};
use crate::config::OutputFormat;
use crate::manifest::LineError;

/// Sink for verification events, called in manifest order.
pub trait Reporter {
    fn invalid_line(&mut self, line_no: usize, err: &LineError) -> io::Result<()>;

    /// Called right before an existing file is hashed.
    fn checking(&mut self, _path: &str) -> io::Result<()> {
        Ok(())
    }

    fn outcome(&mut self, outcome: &EntryOutcome) -> io::Result<()>;

    fn summary(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Build the reporter for an output format.
pub fn reporter_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn Reporter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(out)),
        OutputFormat::Jsonl => Box::new(JsonLinesReporter::new(out)),
    }
}

/// Human-readable output.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn invalid_line(&mut self, _line_no: usize, err: &LineError) -> io::Result<()> {
        writeln!(self.out, "Invalid line format: {}", err.line())
    }

    fn checking(&mut self, path: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Checking: {}", path)
    }

    fn outcome(&mut self, outcome: &EntryOutcome) -> io::Result<()> {
        match outcome {
            EntryOutcome::Verified(r) if r.matched => {
                writeln!(self.out, "OK: {} integrity verified.", r.path)
            }
            EntryOutcome::Verified(r) => {
                writeln!(self.out, "FAILED: {} integrity check failed.", r.path)?;
                writeln!(self.out, "   Expected:   {}", r.expected)?;
                writeln!(self.out, "   Calculated: {}", r.computed)
            }
            EntryOutcome::Missing { path } => writeln!(self.out, "File not found: {}", path),
            EntryOutcome::Unreadable { path, error } => {
                writeln!(self.out, "FAILED: {} could not be read: {}", path, error)
            }
        }
    }

    fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Summary:")?;
        writeln!(self.out, "  Passed: {}", summary.passed)?;
        writeln!(self.out, "  Failed: {}", summary.failed)?;
        writeln!(self.out, "  Total: {}", summary.total())?;
        self.out.flush()
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum Event<'a> {
    Invalid {
        line: usize,
        text: &'a str,
    },
    Missing {
        path: &'a str,
    },
    Verified {
        path: &'a str,
        expected: &'a str,
        computed: &'a str,
        matched: bool,
    },
    Unreadable {
        path: &'a str,
        error: &'a str,
    },
    Summary {
        passed: u64,
        failed: u64,
        total: u64,
    },
}

/// One JSON object per line, for automation.
pub struct JsonLinesReporter<W> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &Event<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn invalid_line(&mut self, line_no: usize, err: &LineError) -> io::Result<()> {
        self.emit(&Event::Invalid {
            line: line_no,
            text: err.line(),
        })
    }

    fn outcome(&mut self, outcome: &EntryOutcome) -> io::Result<()> {
        let event = match outcome {
            EntryOutcome::Verified(r) => Event::Verified {
                path: &r.path,
                expected: &r.expected,
                computed: &r.computed,
                matched: r.matched,
            },
            EntryOutcome::Missing { path } => Event::Missing { path },
            EntryOutcome::Unreadable { path, error } => Event::Unreadable { path, error },
        };
        self.emit(&event)
    }

    fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.emit(&Event::Summary {
            passed: summary.passed,
            failed: summary.failed,
            total: summary.total(),
        })?;
        self.out.flush()
    }
}
