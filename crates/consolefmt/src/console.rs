//! The stateful line-wrap engine.
//!
//! [`Console`] accepts arbitrary text, with or without embedded line
//! terminators, and emits indented lines of at most `wrap_at` content
//! columns to its sink. Column accounting persists across calls, so text can
//! be trickle-fed one chunk at a time and still wrap exactly as if it had
//! arrived in one piece.
//!
//! # Example
//!
//! ```rust
//! use consolefmt::{BufferSink, Console};
//!
//! let mut console = Console::new(BufferSink::new());
//! console.set_wrap_at(10).unwrap();
//! console.output_line(&[], "this is a long string to be wrapped").unwrap();
//! assert_eq!(
//!     console.sink().contents(),
//!     "this is a\nlong\nstring to\nbe wrapped\n"
//! );
//! ```

use tracing::trace;

use crate::error::{Error, Result};
use crate::sink::{DEFAULT_COLUMNS, OutputSink};
use crate::style::{Encoder, Style};

/// Line terminator written between and after output lines.
pub const EOL: &str = "\n";

/// Stateful writer that indents, wraps, and styles text on its way to a sink.
///
/// One instance owns one logical output stream. The wrap point defaults to
/// 78 content columns; the indent prefix is written at the start of every
/// physical line and does not count against the wrap budget. Whether color
/// is emitted is fixed at construction, from the sink's capability or an
/// explicit override.
#[derive(Debug)]
pub struct Console<S> {
    sink: S,
    indent: usize,
    wrap_at: usize,
    /// Content columns already written on the open line. Includes columns
    /// held back in `held`.
    pending: usize,
    /// Trailing whitespace of the open line, accounted in `pending` but not
    /// yet handed to the sink. Flushed before further content on the same
    /// line or an explicit terminator; dropped at a wrap-inserted break.
    held: String,
    color: bool,
}

impl<S: OutputSink> Console<S> {
    /// Create an engine whose color support comes from the sink.
    pub fn new(sink: S) -> Self {
        let color = sink.supports_color();
        Self::with_color(sink, color)
    }

    /// Create an engine with an explicit color override, ignoring what the
    /// sink reports.
    pub fn with_color(sink: S, color: bool) -> Self {
        Self {
            sink,
            indent: 0,
            wrap_at: DEFAULT_COLUMNS,
            pending: 0,
            held: String::new(),
            color,
        }
    }

    /// Whether styled output is emitted.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Current indent, in leading spaces per line.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Set the indent applied to every newly started line.
    pub fn set_indent(&mut self, columns: usize) {
        self.indent = columns;
    }

    /// Increase the indent.
    pub fn add_indent(&mut self, columns: usize) {
        self.indent += columns;
    }

    /// Current wrap point, in content columns.
    pub fn wrap_at(&self) -> usize {
        self.wrap_at
    }

    /// Set the wrap point. Fails fast on a width that would leave no room
    /// for content.
    pub fn set_wrap_at(&mut self, columns: usize) -> Result<()> {
        if columns == 0 {
            return Err(Error::InvalidWrapWidth(columns));
        }
        self.wrap_at = columns;
        Ok(())
    }

    /// Shared access to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Exclusive access to the sink, e.g. to drain a
    /// [`BufferSink`](crate::BufferSink) between assertions.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give the sink back, consuming the engine.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Append `text`, styled with `styles`, without forcing a terminator.
    ///
    /// Wrapping may still insert line breaks of its own. An empty `styles`
    /// slice means no styling; with color disabled the byte stream is
    /// identical to the unstyled one.
    pub fn output(&mut self, styles: &[Style], text: &str) -> Result<()> {
        self.write_chunk(styles, text, false)
    }

    /// Append `text` like [`output`](Self::output), then close the line with
    /// exactly one terminator.
    pub fn output_line(&mut self, styles: &[Style], text: &str) -> Result<()> {
        self.write_chunk(styles, text, true)
    }

    /// Emit a blank line. An open partial line is closed first, producing
    /// two consecutive terminators in the stream.
    pub fn output_blank_line(&mut self) -> Result<()> {
        if self.pending > 0 {
            self.end_line()?;
        }
        self.sink.write_empty_lines(1)?;
        Ok(())
    }

    fn write_chunk(&mut self, styles: &[Style], text: &str, terminate: bool) -> Result<()> {
        let styled = self.color && !styles.is_empty();
        if styled {
            self.sink.write_raw(&Encoder::sequence(styles))?;
        }

        let normalized;
        let text = if text.contains('\r') {
            normalized = text.replace("\r\n", "\n");
            normalized.as_str()
        } else {
            text
        };

        let mut first = true;
        for segment in text.split('\n') {
            if !first {
                // Terminators embedded in the input are explicit, not
                // wrap-inserted: held whitespace is preserved.
                self.end_line()?;
            }
            first = false;
            self.wrap_segment(segment)?;
        }

        if styled {
            self.sink.write_raw(Encoder::RESET)?;
        }
        if terminate {
            self.end_line()?;
        }
        Ok(())
    }

    /// Wrap one terminator-free segment onto the open line and as many fresh
    /// lines as it needs.
    fn wrap_segment(&mut self, segment: &str) -> Result<()> {
        let mut rest = segment;
        loop {
            let remaining = self.wrap_at.saturating_sub(self.pending);
            if rest.len() <= remaining {
                return self.write_content(rest);
            }

            // A break exactly at column `remaining + 1` lands the line at
            // `remaining` columns, so the whitespace search window extends
            // one byte past the remaining budget.
            let window = &rest[..floor_boundary(rest, remaining + 1)];
            if let Some(run_start) = usable_break(window) {
                trace!(column = run_start, wrap_at = self.wrap_at, "soft break");
                self.write_content(&rest[..run_start])?;
                self.break_line()?;
                rest = rest[run_start..].trim_start_matches(is_break_char);
            } else if self.pending > 0 {
                // The open line leaves no room to place this chunk; close it
                // and lay the chunk out on a fresh line.
                trace!(pending = self.pending, "break before unsplittable chunk");
                self.break_line()?;
            } else {
                let cut = hard_cut(rest, remaining);
                trace!(columns = cut, "hard break");
                self.write_content(rest[..cut].trim_end_matches(is_break_char))?;
                self.break_line()?;
                rest = &rest[cut..];
            }
        }
    }

    /// Write a piece that fits on the open line: indent if the line has no
    /// physical bytes yet, flush held whitespace, hold back the piece's own
    /// trailing whitespace, and advance the column count by the full piece.
    fn write_content(&mut self, piece: &str) -> Result<()> {
        if piece.is_empty() {
            return Ok(());
        }
        let body = piece.trim_end_matches(is_break_char);
        if !body.is_empty() {
            if self.pending == self.held.len() {
                self.write_indent()?;
            }
            self.flush_held()?;
            self.sink.write_raw(body)?;
        }
        self.held.push_str(&piece[body.len()..]);
        self.pending += piece.len();
        Ok(())
    }

    fn write_indent(&mut self) -> Result<()> {
        if self.indent > 0 {
            self.sink.write_raw(&" ".repeat(self.indent))?;
        }
        Ok(())
    }

    fn flush_held(&mut self) -> Result<()> {
        if !self.held.is_empty() {
            self.sink.write_raw(&self.held)?;
            self.held.clear();
        }
        Ok(())
    }

    /// Explicit terminator: held whitespace is content, keep it.
    fn end_line(&mut self) -> Result<()> {
        self.flush_held()?;
        self.sink.write_raw(EOL)?;
        self.pending = 0;
        Ok(())
    }

    /// Wrap-inserted terminator: whitespace adjacent to the break is
    /// discarded, so no emitted line ends in trailing whitespace.
    fn break_line(&mut self) -> Result<()> {
        self.held.clear();
        self.sink.write_raw(EOL)?;
        self.pending = 0;
        Ok(())
    }
}

fn is_break_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Byte offset of the first whitespace of the last usable break run in
/// `window`, or `None` when the window holds no break point that isn't at
/// the very start.
fn usable_break(window: &str) -> Option<usize> {
    let last_ws = window.rfind(is_break_char)?;
    let run_start = window[..last_ws]
        .rfind(|c| !is_break_char(c))
        .map_or(0, |i| i + 1);
    (run_start > 0).then_some(run_start)
}

/// Largest char-boundary offset not past `at`.
fn floor_boundary(s: &str, at: usize) -> usize {
    if at >= s.len() {
        return s.len();
    }
    let mut cut = at;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

/// Hard-break offset: exactly `columns` bytes, nudged to a char boundary.
/// Column counts assume one byte per column; multi-byte input lands on the
/// nearest boundary instead of splitting a code point.
fn hard_cut(s: &str, columns: usize) -> usize {
    let cut = floor_boundary(s, columns);
    if cut == 0 {
        // Never emit an empty hard-break piece; take the first full char.
        s.chars().next().map_or(s.len(), char::len_utf8)
    } else {
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;

    fn console() -> Console<BufferSink> {
        Console::new(BufferSink::new())
    }

    #[test]
    fn test_defaults() {
        let console = console();
        assert_eq!(console.indent(), 0);
        assert_eq!(console.wrap_at(), 78);
        assert!(!console.color_enabled());
    }

    #[test]
    fn test_zero_wrap_width_fails_fast() {
        let mut console = console();
        assert!(matches!(
            console.set_wrap_at(0),
            Err(Error::InvalidWrapWidth(0))
        ));
        // The previous width survives a rejected setter call.
        assert_eq!(console.wrap_at(), 78);
    }

    #[test]
    fn test_usable_break_skips_leading_run() {
        assert_eq!(usable_break("this is a l"), Some(9));
        assert_eq!(usable_break("foo  ba"), Some(3));
        assert_eq!(usable_break("  abcdefghi"), None);
        assert_eq!(usable_break("abcdefghijk"), None);
        assert_eq!(usable_break(""), None);
    }

    #[test]
    fn test_hard_cut_never_splits_a_char() {
        assert_eq!(hard_cut("abcdef", 4), 4);
        assert_eq!(hard_cut("héllo", 2), 1);
        assert_eq!(hard_cut("é", 1), 2);
    }

    #[test]
    fn test_color_override_beats_sink_capability() {
        let muted = Console::with_color(BufferSink::with_color(true), false);
        assert!(!muted.color_enabled());
        let forced = Console::with_color(BufferSink::new(), true);
        assert!(forced.color_enabled());
    }

    #[test]
    fn test_pending_column_survives_calls() {
        let mut console = console();
        console.set_wrap_at(10).unwrap();
        console.output(&[], "12345").unwrap();
        console.output(&[], "67890").unwrap();
        console.output(&[], "x").unwrap();
        assert_eq!(console.sink().contents(), "1234567890\nx");
    }

    #[test]
    fn test_crlf_input_is_normalized() {
        let mut console = console();
        console.output_line(&[], "one\r\ntwo").unwrap();
        assert_eq!(console.sink().contents(), "one\ntwo\n");
    }
}
