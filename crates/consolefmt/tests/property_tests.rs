//! Property tests for the wrap algorithm's invariants.

use consolefmt::{AnsiColor, BufferSink, Console, Style};
use proptest::prelude::*;

/// Fresh engine over a color-less buffer, with the given wrap point.
fn engine(wrap_at: usize) -> Console<BufferSink> {
    let mut console = Console::new(BufferSink::new());
    console.set_wrap_at(wrap_at).unwrap();
    console
}

proptest! {
    // Tokens never longer than the wrap point: every break lands on
    // whitespace, every line stays within budget, no line ends in
    // whitespace, and every token survives intact.
    #[test]
    fn breaks_only_at_whitespace(
        words in proptest::collection::vec("[a-z]{1,8}", 1..40),
        wrap_at in 8usize..40,
    ) {
        let input = words.join(" ");
        let mut console = engine(wrap_at);
        console.output_line(&[], &input).unwrap();
        let output = console.into_sink().take();

        let body = output.strip_suffix('\n').unwrap();
        for line in body.split('\n') {
            prop_assert!(line.len() <= wrap_at, "line {line:?} exceeds {wrap_at}");
            prop_assert_eq!(line.trim_end(), line, "trailing whitespace on {}", line);
        }
        let rejoined = body.split('\n').collect::<Vec<_>>().join(" ");
        prop_assert_eq!(rejoined, input);
    }

    // Arbitrary whitespace runs between tokens: collapsing breaks back to
    // single spaces must reproduce the token sequence exactly.
    #[test]
    fn reconstruction_preserves_tokens(
        pieces in proptest::collection::vec(("[a-z]{1,6}", 1usize..4), 1..30),
        wrap_at in 8usize..30,
    ) {
        let mut input = String::new();
        for (i, (word, gap)) in pieces.iter().enumerate() {
            if i > 0 {
                input.push_str(&" ".repeat(*gap));
            }
            input.push_str(word);
        }

        let mut console = engine(wrap_at);
        console.output_line(&[], &input).unwrap();
        let output = console.into_sink().take();

        let wrapped_tokens: Vec<&str> = output.split_whitespace().collect();
        let input_tokens: Vec<&str> = input.split_whitespace().collect();
        prop_assert_eq!(wrapped_tokens, input_tokens);
    }

    // A single unbroken token of N > wrap_at bytes splits into
    // ceil(N / wrap_at) lines, all exactly wrap_at wide except the last.
    #[test]
    fn hard_break_yields_exact_columns(
        length in 1usize..300,
        wrap_at in 1usize..40,
    ) {
        prop_assume!(length > wrap_at);
        let input = "x".repeat(length);

        let mut console = engine(wrap_at);
        console.output(&[], &input).unwrap();
        let output = console.into_sink().take();

        let lines: Vec<&str> = output.split('\n').collect();
        prop_assert_eq!(lines.len(), length.div_ceil(wrap_at));
        for line in &lines[..lines.len() - 1] {
            prop_assert_eq!(line.len(), wrap_at);
        }
        prop_assert_eq!(lines.concat(), input);
    }

    // Same text, same configuration, fresh engine: identical output.
    #[test]
    fn wrapping_is_deterministic(
        text in "[ a-z]{0,200}",
        wrap_at in 1usize..60,
        indent in 0usize..8,
    ) {
        let run = || {
            let mut console = engine(wrap_at);
            console.set_indent(indent);
            console.output_line(&[], &text).unwrap();
            console.into_sink().take()
        };
        prop_assert_eq!(run(), run());
    }

    // With color disabled, styles are pure metadata: the byte stream is
    // identical to the unstyled one.
    #[test]
    fn disabled_color_matches_unstyled_output(
        text in "[ a-z]{0,120}",
        wrap_at in 1usize..40,
    ) {
        let styles = [Style::Bold, Style::Fg(AnsiColor::Red), Style::Bg(AnsiColor::Blue)];

        let mut styled = engine(wrap_at);
        styled.output_line(&styles, &text).unwrap();

        let mut unstyled = engine(wrap_at);
        unstyled.output_line(&[], &text).unwrap();

        prop_assert_eq!(
            styled.into_sink().take(),
            unstyled.into_sink().take()
        );
    }

    // Chunked delivery wraps byte-identically to one-shot delivery when the
    // chunks preserve the original whitespace.
    #[test]
    fn trickle_feed_matches_one_shot(
        words in proptest::collection::vec("[a-z]{1,8}", 1..25),
        wrap_at in 8usize..40,
    ) {
        let input = words.join(" ");

        let mut one_shot = engine(wrap_at);
        one_shot.output_line(&[], &input).unwrap();

        let mut trickled = engine(wrap_at);
        for word in &words[..words.len() - 1] {
            trickled.output(&[], &format!("{word} ")).unwrap();
        }
        trickled.output_line(&[], &words[words.len() - 1]).unwrap();

        prop_assert_eq!(
            one_shot.into_sink().take(),
            trickled.into_sink().take()
        );
    }
}
