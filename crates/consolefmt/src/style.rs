//! Style tokens and ANSI SGR encoding.
//!
//! A [`Style`] is a single semantic request such as bold or a foreground
//! color, mapped to one numeric SGR code. The [`Encoder`] turns
//! an ordered set of tokens into the literal escape bytes that activate them,
//! and composes text with activation and reset sequences.
//!
//! # Example
//!
//! ```rust
//! use consolefmt::{AnsiColor, Encoder, Style};
//!
//! let seq = Encoder::sequence(&[Style::Bold, Style::Fg(AnsiColor::Red)]);
//! assert_eq!(seq, "\x1b[1;31m");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The eight base terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl AnsiColor {
    /// Offset of this color within an SGR color block (0-7).
    pub fn index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
        }
    }

    /// Lowercase color name, as used in textual token names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// A single styling request, mapped to one SGR code.
///
/// Tokens are immutable and stateless; an ordered slice of them forms a
/// style request, and order is preserved in the emitted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Bold or increased intensity (SGR 1).
    Bold,
    /// Faint or decreased intensity (SGR 2).
    Faint,
    /// Italic (SGR 3).
    Italic,
    /// Underline (SGR 4).
    Underline,
    /// Slow blink (SGR 5).
    Blink,
    /// Reverse video (SGR 7).
    Reverse,
    /// Strikethrough (SGR 9).
    Strikethrough,
    /// Foreground color (SGR 30-37).
    Fg(AnsiColor),
    /// Background color (SGR 40-47).
    Bg(AnsiColor),
}

impl Style {
    /// The numeric SGR code for this token.
    pub fn code(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Faint => 2,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Blink => 5,
            Self::Reverse => 7,
            Self::Strikethrough => 9,
            Self::Fg(color) => 30 + color.index(),
            Self::Bg(color) => 40 + color.index(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bold => write!(f, "bold"),
            Self::Faint => write!(f, "faint"),
            Self::Italic => write!(f, "italic"),
            Self::Underline => write!(f, "underline"),
            Self::Blink => write!(f, "blink"),
            Self::Reverse => write!(f, "reverse"),
            Self::Strikethrough => write!(f, "strikethrough"),
            Self::Fg(color) => write!(f, "fg-{}", color.name()),
            Self::Bg(color) => write!(f, "bg-{}", color.name()),
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(Self::Bold),
            "faint" => Ok(Self::Faint),
            "italic" => Ok(Self::Italic),
            "underline" => Ok(Self::Underline),
            "blink" => Ok(Self::Blink),
            "reverse" => Ok(Self::Reverse),
            "strikethrough" => Ok(Self::Strikethrough),
            other => {
                let color = other
                    .strip_prefix("fg-")
                    .and_then(AnsiColor::from_name)
                    .map(Self::Fg)
                    .or_else(|| {
                        other
                            .strip_prefix("bg-")
                            .and_then(AnsiColor::from_name)
                            .map(Self::Bg)
                    });
                color.ok_or_else(|| Error::UnknownStyle(other.to_string()))
            }
        }
    }
}

/// Translates style requests into SGR escape sequences.
///
/// The encoder carries the one piece of configuration that matters to it:
/// whether styling is enabled at all. When disabled, [`Encoder::apply`]
/// returns text byte-for-byte unchanged no matter which tokens were
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    enabled: bool,
}

impl Encoder {
    /// The sequence that clears all active styling.
    pub const RESET: &'static str = "\x1b[0m";

    /// Create an encoder; `enabled` decides whether [`apply`](Self::apply)
    /// emits escape sequences or passes text through untouched.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether this encoder emits escape sequences.
    pub fn enabled(self) -> bool {
        self.enabled
    }

    /// Build the activation sequence for an ordered set of tokens.
    ///
    /// All tokens are joined into a single `ESC [ code{;code} m` envelope so
    /// they take effect simultaneously. An empty request produces an empty
    /// sequence.
    pub fn sequence(styles: &[Style]) -> String {
        if styles.is_empty() {
            return String::new();
        }
        let mut seq = String::with_capacity(3 + styles.len() * 3);
        seq.push_str("\x1b[");
        for (i, style) in styles.iter().enumerate() {
            if i > 0 {
                seq.push(';');
            }
            seq.push_str(&style.code().to_string());
        }
        seq.push('m');
        seq
    }

    /// Compose `text` with the given styles: activation, text, reset.
    ///
    /// Returns `text` unchanged when the request is empty or the encoder is
    /// disabled. The composition happens once per chunk of text, however
    /// many physical lines the chunk later spans; terminals carry SGR state
    /// across line breaks.
    pub fn apply(self, styles: &[Style], text: &str) -> String {
        if !self.enabled || styles.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", Self::sequence(styles), text, Self::RESET)
    }
}
