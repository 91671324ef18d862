//! Property-based tests for the pre-lexer
//!
//! Inputs are generated from well-formed indentation profiles, so every run is expected to
//! succeed. The properties check the structure of the output rather than exact text.

use prelex::process;
use proptest::prelude::*;

/// A word with no string, comment, escape or bracket characters in it
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_.:@]{0,10}"
}

/// Indentation depths where every step goes at most one level deeper, starting at 0
fn depth_profile_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 1..30).prop_map(|raw| {
        let mut depths = Vec::with_capacity(raw.len());
        let mut previous = 0;
        for (idx, wanted) in raw.into_iter().enumerate() {
            let depth = if idx == 0 { 0 } else { wanted.min(previous + 1) };
            depths.push(depth);
            previous = depth;
        }
        depths
    })
}

/// Depths paired with one statement each
fn document_strategy() -> impl Strategy<Value = Vec<(usize, String, String)>> {
    depth_profile_strategy().prop_flat_map(|depths| {
        let len = depths.len();
        (
            Just(depths),
            prop::collection::vec(word_strategy(), len),
            prop::collection::vec(word_strategy(), len),
        )
            .prop_map(|(depths, heads, tails)| {
                depths
                    .into_iter()
                    .zip(heads)
                    .zip(tails)
                    .map(|((depth, head), tail)| (depth, head, tail))
                    .collect()
            })
    })
}

fn render(document: &[(usize, String, String)], separator: &str) -> Vec<String> {
    document
        .iter()
        .map(|(depth, head, tail)| format!("{}{}{}{}", "    ".repeat(*depth), head, separator, tail))
        .collect()
}

fn prelex(lines: &[String]) -> Vec<String> {
    process(lines)
        .collect::<Result<Vec<_>, _>>()
        .expect("well-formed input to pre-lex")
}

fn count(lines: &[String], needle: char) -> usize {
    lines.iter().map(|line| line.matches(needle).count()).sum()
}

proptest! {
    #[test]
    fn test_flat_lines_are_separated(words in prop::collection::vec(word_strategy(), 1..20)) {
        let output = prelex(&words);
        prop_assert_eq!(output.len(), words.len());
        for (idx, (out, input)) in output.iter().zip(&words).enumerate() {
            if idx + 1 == words.len() {
                prop_assert_eq!(out, input);
            } else {
                prop_assert_eq!(out, &format!("{input};"));
            }
        }
    }

    #[test]
    fn test_output_extends_input_with_delimiters_only(document in document_strategy()) {
        let input = render(&document, " ");
        let output = prelex(&input);
        prop_assert_eq!(output.len(), input.len());
        for (out, line) in output.iter().zip(&input) {
            prop_assert!(out.starts_with(line.as_str()));
            prop_assert!(
                out[line.len()..].chars().all(|c| matches!(c, ';' | '{' | '}')),
                "only delimiters may be appended: {:?}",
                out
            );
        }
    }

    #[test]
    fn test_blocks_are_balanced(document in document_strategy()) {
        let depths: Vec<usize> = document.iter().map(|(depth, _, _)| *depth).collect();
        let output = prelex(&render(&document, " "));

        let indents = depths.windows(2).filter(|pair| pair[1] > pair[0]).count();
        let statements = depths.windows(2).filter(|pair| pair[1] <= pair[0]).count();
        prop_assert_eq!(count(&output, '{'), indents);
        prop_assert_eq!(count(&output, '}'), indents);
        prop_assert_eq!(count(&output, ';'), statements);
    }

    #[test]
    fn test_line_comments_do_not_change_structure(document in document_strategy()) {
        let plain = render(&document, " ");
        let commented: Vec<String> = plain.iter().map(|line| format!("{line}// note")).collect();
        prop_assert_eq!(prelex(&commented), prelex(&plain));
    }

    #[test]
    fn test_inline_block_comments_keep_columns(document in document_strategy()) {
        let commented = render(&document, " /* c */ ");
        let spaced = render(&document, "         ");
        prop_assert_eq!(prelex(&commented), prelex(&spaced));
    }

    #[test]
    fn test_blank_lines_pass_through(document in document_strategy(), gap in 0usize..3) {
        let mut input = Vec::new();
        for line in render(&document, " ") {
            input.push(line);
            input.extend(std::iter::repeat(String::new()).take(gap));
        }
        let output = prelex(&input);
        prop_assert_eq!(output.len(), input.len());
        for (out, line) in output.iter().zip(&input) {
            if line.is_empty() {
                prop_assert!(out.is_empty());
            }
        }
    }
}

#[test]
fn test_lazy_over_unbounded_input() {
    let lines = std::iter::successors(Some(0usize), |n| Some(n + 1)).map(|n| format!("line{n}"));
    let first: Vec<String> = process(lines)
        .take(3)
        .collect::<Result<_, _>>()
        .expect("flat lines to pre-lex");
    assert_eq!(first, vec!["line0;", "line1;", "line2;"]);
}
