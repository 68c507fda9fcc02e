//! Property-based tests for the pattern compiler.
//!
//! These pin the algebraic laws of group expansion and make sure the
//! compiler neither panics nor exceeds its instruction ceiling on arbitrary
//! input.

use pattern_turtle::{MAX_INSTRUCTIONS, parse};
use proptest::prelude::*;

/// Strategy: strings built only from atom glyphs (no grouping punctuation).
fn atom_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        proptest::sample::select(vec![
            'o', 'x', '+', '|', '-', '^', 'v', '>', '<', '!', 'i', '?', '*',
        ]),
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = parse(&input);
    }

    #[test]
    fn parse_is_deterministic(input in ".*") {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn successful_parses_respect_the_ceiling(input in ".*") {
        if let Ok(program) = parse(&input) {
            prop_assert!(program.len() <= MAX_INSTRUCTIONS);
        }
    }

    #[test]
    fn unsuffixed_group_is_transparent(atoms in atom_string()) {
        prop_assert_eq!(parse(&format!("({atoms})")), parse(&atoms));
    }

    #[test]
    fn dot_suffix_adds_copies(atoms in atom_string(), dots in 0usize..4) {
        let suffix = ".".repeat(dots);
        let expanded = parse(&format!("({atoms}){suffix}")).unwrap();
        let base = parse(&atoms).unwrap();
        prop_assert_eq!(expanded.len(), base.len() * (dots + 1));
    }

    #[test]
    fn comma_suffix_multiplies_by_five(atoms in atom_string()) {
        let expanded = parse(&format!("({atoms}),")).unwrap();
        let base = parse(&atoms).unwrap();
        prop_assert_eq!(expanded, base.repeat(5));
    }
}
