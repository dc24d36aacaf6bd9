// Rust guideline compliant 2026-10-19

//! Property-based tests for the sequence matcher and the word diff.
//!
//! These tests validate properties that should hold for any pair of inputs:
//! opcodes tile both sequences, equal ranges hold equal elements, and the
//! rendered diff is empty exactly when the inputs are identical.

use direq_core::wdiff::{split_lines, unified_wdiff, DEFAULT_CONTEXT};
use direq_core::{DiffLine, SequenceMatcher, Span, Tag};
use proptest::prelude::*;

/// Generates short lines from a small alphabet so matches are frequent.
fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ab ]{0,4}\n", 0..12)
}

fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..40)
}

proptest! {
    /// Property: opcodes cover both sequences contiguously, in order.
    #[test]
    fn prop_opcodes_tile_both_sequences(a in arb_bytes(), b in arb_bytes()) {
        let matcher = SequenceMatcher::new(&a, &b);
        let (mut i, mut j) = (0, 0);
        for code in matcher.opcodes() {
            prop_assert_eq!(code.a_start, i);
            prop_assert_eq!(code.b_start, j);
            i = code.a_end;
            j = code.b_end;
        }
        prop_assert_eq!(i, a.len());
        prop_assert_eq!(j, b.len());
    }

    /// Property: equal opcodes hold equal content, other tags do not repeat it.
    #[test]
    fn prop_equal_ranges_match(a in arb_bytes(), b in arb_bytes()) {
        let matcher = SequenceMatcher::new(&a, &b);
        for code in matcher.opcodes() {
            match code.tag {
                Tag::Equal => prop_assert_eq!(
                    &a[code.a_start..code.a_end],
                    &b[code.b_start..code.b_end]
                ),
                Tag::Delete => prop_assert_eq!(code.b_start, code.b_end),
                Tag::Insert => prop_assert_eq!(code.a_start, code.a_end),
                Tag::Replace => {
                    prop_assert!(code.a_start < code.a_end);
                    prop_assert!(code.b_start < code.b_end);
                }
            }
        }
    }

    /// Property: applying the opcodes to `a` rebuilds `b`.
    #[test]
    fn prop_opcodes_rebuild_target(a in arb_bytes(), b in arb_bytes()) {
        let matcher = SequenceMatcher::new(&a, &b);
        let mut rebuilt = Vec::with_capacity(b.len());
        for code in matcher.opcodes() {
            match code.tag {
                Tag::Equal => rebuilt.extend_from_slice(&a[code.a_start..code.a_end]),
                Tag::Insert | Tag::Replace => {
                    rebuilt.extend_from_slice(&b[code.b_start..code.b_end])
                }
                Tag::Delete => {}
            }
        }
        prop_assert_eq!(rebuilt, b);
    }

    /// Property: the ratio stays in range and is 1.0 for identical inputs.
    #[test]
    fn prop_ratio_bounds(a in arb_bytes(), b in arb_bytes()) {
        let ratio = SequenceMatcher::new(&a, &b).ratio();
        prop_assert!((0.0..=1.0).contains(&ratio));
        prop_assert_eq!(SequenceMatcher::new(&a, &a).ratio(), 1.0);
    }

    /// Property: the word diff is empty iff both sides are identical.
    #[test]
    fn prop_wdiff_empty_iff_identical(a in arb_lines(), b in arb_lines()) {
        let (a_text, b_text) = (a.concat(), b.concat());
        let lines = unified_wdiff(
            &split_lines(&a_text),
            &split_lines(&b_text),
            "s",
            "r",
            DEFAULT_CONTEXT,
        );
        prop_assert_eq!(lines.is_empty(), a_text == b_text);
    }

    /// Property: with full context, every line of both sides shows up once.
    #[test]
    fn prop_wdiff_line_counts(a in arb_lines(), b in arb_lines()) {
        let (a_text, b_text) = (a.concat(), b.concat());
        let (a_lines, b_lines) = (split_lines(&a_text), split_lines(&b_text));
        let lines = unified_wdiff(&a_lines, &b_lines, "s", "r", a_lines.len() + b_lines.len());

        let from_side = lines
            .iter()
            .filter(|line| matches!(line, DiffLine::Context(_) | DiffLine::Deleted(_)))
            .count();
        let to_side = lines
            .iter()
            .filter(|line| matches!(line, DiffLine::Context(_) | DiffLine::Inserted(_)))
            .count();
        if !lines.is_empty() {
            prop_assert_eq!(from_side, a_lines.len());
            prop_assert_eq!(to_side, b_lines.len());
        }
    }

    /// Property: deleted lines never carry added spans and vice versa.
    #[test]
    fn prop_wdiff_span_sides(a in arb_lines(), b in arb_lines()) {
        let (a_text, b_text) = (a.concat(), b.concat());
        let lines = unified_wdiff(
            &split_lines(&a_text),
            &split_lines(&b_text),
            "s",
            "r",
            DEFAULT_CONTEXT,
        );
        for line in &lines {
            match line {
                DiffLine::Deleted(spans) => {
                    prop_assert!(!spans.iter().any(|s| matches!(s, Span::Added(_))))
                }
                DiffLine::Inserted(spans) => {
                    prop_assert!(!spans.iter().any(|s| matches!(s, Span::Removed(_))))
                }
                _ => {}
            }
        }
    }
}
