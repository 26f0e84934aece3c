//! Render a small help screen to stdout, wrapped and styled.
//!
//! Run with `cargo run --example usage_help`; pipe it through `cat` to see
//! the color drop away.

use consolefmt::{AnsiColor, Console, Result, StreamSink, Style};

fn main() -> Result<()> {
    let mut console = Console::new(StreamSink::stdout());

    console.output_line(&[Style::Bold], "myapp - do the thing")?;
    console.output_blank_line()?;

    console.output_line(&[Style::Underline], "Usage")?;
    console.set_indent(2);
    console.output_line(&[], "myapp [options] <target>")?;
    console.set_indent(0);
    console.output_blank_line()?;

    console.output_line(&[Style::Underline], "Options")?;
    console.set_indent(2);
    for (flag, help) in [
        ("--verbose", "explain every step taken, however small, including the ones that would otherwise be silent"),
        ("--dry-run", "plan the work and report it without touching anything"),
        ("--columns", "override the detected terminal width"),
    ] {
        console.output(&[Style::Fg(AnsiColor::Cyan)], flag)?;
        console.output(&[], "  ")?;
        console.output_line(&[], help)?;
    }

    Ok(())
}
