#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # consolefmt
//!
//! Styled, indented, word-wrapped text output for terminal applications.
//!
//! The engine keeps column state across calls, so text can be appended one
//! chunk at a time and still wrap exactly as if it had arrived in one piece.
//! Output goes to a pluggable sink (a real terminal stream or an in-memory
//! buffer), and whether the destination actually renders color is hidden
//! from calling code: styles are pure metadata when color is off.
//!
//! ## Quick Start
//!
//! ```rust
//! use consolefmt::{AnsiColor, BufferSink, Console, Style};
//!
//! let mut console = Console::new(BufferSink::new());
//! console.set_wrap_at(40).unwrap();
//! console.set_indent(2);
//!
//! console.output_line(&[Style::Bold], "Usage:").unwrap();
//! console.output(&[], "run ").unwrap();
//! console
//!     .output_line(&[Style::Fg(AnsiColor::Cyan)], "--help")
//!     .unwrap();
//! ```
//!
//! ## Sinks
//!
//! Anything implementing [`OutputSink`] can receive output:
//!
//! ```rust
//! use consolefmt::{Console, StreamSink};
//!
//! // A terminal stream; color support is detected, wrapping stays at 78.
//! let console = Console::new(StreamSink::stdout());
//! assert_eq!(console.wrap_at(), 78);
//! ```
//!
//! ## Wrapping rules
//!
//! - Breaks land on whitespace whenever the window before the wrap point
//!   offers any; a single token longer than the wrap width is hard-broken at
//!   exactly the width.
//! - No emitted line ends in whitespace that a wrap break made trailing.
//! - The indent prefix starts every physical line and is not charged against
//!   the wrap budget.
//! - Style activation precedes a chunk's first line and the reset follows
//!   its last, however many physical lines the chunk spans.

pub mod console;
pub mod error;
pub mod sink;
pub mod style;

// Re-exports
pub use console::{Console, EOL};
pub use error::{Error, Result};
pub use sink::{BufferSink, DEFAULT_COLUMNS, OutputSink, StreamSink};
pub use style::{AnsiColor, Encoder, Style};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::console::Console;
    pub use crate::error::{Error, Result};
    pub use crate::sink::{BufferSink, OutputSink, StreamSink};
    pub use crate::style::{AnsiColor, Encoder, Style};
}
