//! Output sinks: the destinations that receive finished bytes.
//!
//! The [`Console`](crate::Console) engine never touches a terminal directly.
//! It writes through the [`OutputSink`] capability, which any destination can
//! implement: [`StreamSink`] appends to an open stream (stdout, stderr, a
//! file), [`BufferSink`] accumulates into memory for capture and tests. The
//! sink also answers the two capability questions the engine asks at
//! construction time: does the destination render color, and how wide does
//! the terminal claim to be.

use std::env;
use std::fs::File;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

use crossterm::tty::IsTty;
use tracing::debug;

/// Width reported when the environment gives no usable hint.
pub const DEFAULT_COLUMNS: usize = 78;

/// Destination capability for finished output bytes.
///
/// Implementations append raw text with no added framing. Write failures
/// surface as `io::Error` and pass through the engine unchanged; any retry
/// policy belongs to the sink itself.
pub trait OutputSink {
    /// Append raw bytes; the write completes before the call returns.
    fn write_raw(&mut self, text: &str) -> io::Result<()>;

    /// Emit `count` line terminators.
    fn write_empty_lines(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.write_raw("\n")?;
        }
        Ok(())
    }

    /// Whether the destination renders ANSI color sequences.
    fn supports_color(&self) -> bool;

    /// Terminal width guess, independent of any configured wrap point.
    fn columns_hint(&self) -> usize;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        (**self).write_raw(text)
    }

    fn write_empty_lines(&mut self, count: usize) -> io::Result<()> {
        (**self).write_empty_lines(count)
    }

    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }

    fn columns_hint(&self) -> usize {
        (**self).columns_hint()
    }
}

/// Sink that appends to an open stream.
///
/// Color support is derived from terminal detection on the stream, gated by
/// the usual environment opt-outs (`NO_COLOR`, `TERM=dumb`). The
/// [`force_tty`](Self::force_tty) hook overrides detection for
/// deterministic behavior in tests and pipelines.
#[derive(Debug)]
pub struct StreamSink<W> {
    stream: W,
    force_tty: bool,
}

impl StreamSink<Stdout> {
    /// Sink over the process standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<Stderr> {
    /// Sink over the process standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl StreamSink<File> {
    /// Sink over a newly created (or truncated) file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W> StreamSink<W> {
    /// Wrap an open stream.
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            force_tty: false,
        }
    }

    /// Treat the stream as a terminal regardless of what it really is.
    pub fn force_tty(&mut self) {
        debug!("stream sink forced to report a terminal");
        self.force_tty = true;
    }

    /// Give the underlying stream back.
    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl<W: IsTty> StreamSink<W> {
    fn is_tty(&self) -> bool {
        self.force_tty || self.stream.is_tty()
    }
}

impl<W: Write + IsTty> OutputSink for StreamSink<W> {
    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.stream.write_all(text.as_bytes())?;
        self.stream.flush()
    }

    fn supports_color(&self) -> bool {
        self.is_tty() && color_allowed(env::var_os("NO_COLOR").is_some(), env::var("TERM").ok())
    }

    fn columns_hint(&self) -> usize {
        parse_columns(env::var("COLUMNS").ok().as_deref()).unwrap_or(DEFAULT_COLUMNS)
    }
}

/// In-memory sink: accumulates everything written into a growable buffer.
///
/// Capabilities are fixed at construction, so engine behavior is fully
/// deterministic. This is the dependency-injected stand-in for a real
/// terminal stream in test harnesses.
#[derive(Debug, Clone)]
pub struct BufferSink {
    buffer: String,
    color: bool,
    columns: usize,
}

impl BufferSink {
    /// Color-less sink with the default width.
    pub fn new() -> Self {
        Self::with_color(false)
    }

    /// Sink reporting the given color support.
    pub fn with_color(color: bool) -> Self {
        Self {
            buffer: String::new(),
            color,
            columns: DEFAULT_COLUMNS,
        }
    }

    /// Override the fixed width hint.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Everything written so far.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Drain the accumulated output, leaving the sink empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Discard the accumulated output.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// True if nothing has been written since the last drain.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for BufferSink {
    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn columns_hint(&self) -> usize {
        self.columns
    }
}

/// Environment gate for color output: `NO_COLOR` wins, then `TERM=dumb`.
fn color_allowed(no_color: bool, term: Option<String>) -> bool {
    if no_color {
        return false;
    }
    term.as_deref() != Some("dumb")
}

/// Parse a `COLUMNS`-style width value. Absent, non-numeric, and
/// non-positive values yield `None`.
fn parse_columns(raw: Option<&str>) -> Option<usize> {
    let columns = raw?.trim().parse::<usize>().ok()?;
    (columns > 0).then_some(columns)
}
