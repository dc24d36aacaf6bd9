// Rust guideline compliant 2026-10-19

//! Unified diffs with inline word-level markers.
//!
//! Lines are matched first; each pair of lines inside a replaced block is
//! then matched character by character. Removed characters are marked
//! `[-…-]` on the deleted line and added characters `{+…+}` on the inserted
//! line.

use crate::matcher::{Opcode, SequenceMatcher, Tag};
use std::fmt;

/// Default number of context lines around a hunk.
pub const DEFAULT_CONTEXT: usize = 3;

/// A run of characters within a diff line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Text present on both sides.
    Same(String),
    /// Text only present on the snapshot side.
    Removed(String),
    /// Text only present on the received side.
    Added(String),
}

impl Span {
    /// Returns the raw text of the span, without markers.
    pub fn text(&self) -> &str {
        match self {
            Span::Same(text) | Span::Removed(text) | Span::Added(text) => text,
        }
    }

    /// Returns whether the span is a change.
    pub fn is_change(&self) -> bool {
        !matches!(self, Span::Same(_))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Same(text) => f.write_str(text),
            Span::Removed(text) => write!(f, "[-{}-]", escape_terminators(text)),
            Span::Added(text) => write!(f, "{{+{}+}}", escape_terminators(text)),
        }
    }
}

/// One line of a unified word diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `--- <label>` header.
    FromFile(String),
    /// `+++ <label>` header.
    ToFile(String),
    /// `@@ -<range> +<range> @@` hunk header.
    Hunk {
        /// Range in the snapshot side.
        from: String,
        /// Range in the received side.
        to: String,
    },
    /// Unchanged line.
    Context(String),
    /// Line only present (or changed) on the snapshot side.
    Deleted(Vec<Span>),
    /// Line only present (or changed) on the received side.
    Inserted(Vec<Span>),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::FromFile(label) => write!(f, "--- {}", label),
            DiffLine::ToFile(label) => write!(f, "+++ {}", label),
            DiffLine::Hunk { from, to } => write!(f, "@@ -{} +{} @@", from, to),
            DiffLine::Context(line) => write!(f, " {}", strip_terminator(line)),
            DiffLine::Deleted(spans) => write_spans(f, "- ", spans),
            DiffLine::Inserted(spans) => write_spans(f, "+ ", spans),
        }
    }
}

fn write_spans(f: &mut fmt::Formatter<'_>, prefix: &str, spans: &[Span]) -> fmt::Result {
    f.write_str(prefix)?;
    let last = spans.len().saturating_sub(1);
    for (i, span) in spans.iter().enumerate() {
        match span {
            Span::Same(text) if i == last => f.write_str(strip_terminator(text))?,
            other => write!(f, "{}", other)?,
        }
    }
    Ok(())
}

/// Replaces line terminators with visible glyphs so a changed span never
/// breaks its diff line.
pub(crate) fn escape_terminators(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' => '↵',
            '\r' => '␍',
            other => other,
        })
        .collect()
}

/// Removes one trailing `\n` from a line.
pub(crate) fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Splits text into lines, keeping the `\n` terminators.
///
/// A carriage return stays part of its line so CRLF/LF changes show up as
/// whitespace differences.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Formats a hunk range the way unified diffs do.
///
/// A single line is `start`, an empty range points at the line before it.
pub fn format_range_unified(start: usize, stop: usize) -> String {
    let mut beginning = start + 1;
    let length = stop - start;
    if length == 1 {
        return beginning.to_string();
    }
    if length == 0 {
        beginning -= 1;
    }
    format!("{},{}", beginning, length)
}

/// Computes the spans of the snapshot-side line `a` against `b`.
///
/// Characters of `a` missing from `b` become [`Span::Removed`]; characters
/// only in `b` are dropped.
pub fn removed_line_wdiff(a: &str, b: &str) -> Vec<Span> {
    line_wdiff(a, b, Side::Removed)
}

/// Computes the spans of the received-side line `b` against `a`.
///
/// Characters of `b` missing from `a` become [`Span::Added`]; characters
/// only in `a` are dropped.
pub fn added_line_wdiff(a: &str, b: &str) -> Vec<Span> {
    line_wdiff(a, b, Side::Added)
}

#[derive(Clone, Copy)]
enum Side {
    Removed,
    Added,
}

fn line_wdiff(a: &str, b: &str, side: Side) -> Vec<Span> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let matcher = SequenceMatcher::new(&a_chars, &b_chars);

    let mut spans: Vec<Span> = Vec::new();
    for code in matcher.opcodes() {
        let a_text = || a_chars[code.a_start..code.a_end].iter().collect::<String>();
        let b_text = || b_chars[code.b_start..code.b_end].iter().collect::<String>();
        let span = match (code.tag, side) {
            (Tag::Equal, _) => Span::Same(a_text()),
            (Tag::Replace | Tag::Delete, Side::Removed) => Span::Removed(a_text()),
            (Tag::Replace | Tag::Insert, Side::Added) => Span::Added(b_text()),
            (Tag::Insert, Side::Removed) | (Tag::Delete, Side::Added) => continue,
        };
        push_span(&mut spans, span);
    }
    spans
}

fn push_span(spans: &mut Vec<Span>, span: Span) {
    if span.text().is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if std::mem::discriminant(last) == std::mem::discriminant(&span) {
            match last {
                Span::Same(text) | Span::Removed(text) | Span::Added(text) => {
                    text.push_str(span.text())
                }
            }
            return;
        }
    }
    spans.push(span);
}

/// Produces a unified word diff from snapshot lines `a` to received lines `b`.
///
/// `from` and `to` label the header lines, `n` bounds the context lines of
/// each hunk. Identical inputs produce no lines.
pub fn unified_wdiff(a: &[&str], b: &[&str], from: &str, to: &str, n: usize) -> Vec<DiffLine> {
    let matcher = SequenceMatcher::new(a, b);
    let mut lines = Vec::new();

    for (index, group) in matcher.grouped_opcodes(n).iter().enumerate() {
        if index == 0 {
            lines.push(DiffLine::FromFile(from.to_string()));
            lines.push(DiffLine::ToFile(to.to_string()));
        }
        let (first, last) = match (group.first(), group.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };
        lines.push(DiffLine::Hunk {
            from: format_range_unified(first.a_start, last.a_end),
            to: format_range_unified(first.b_start, last.b_end),
        });

        for code in group {
            push_opcode_lines(&mut lines, code, a, b);
        }
    }
    lines
}

fn push_opcode_lines(lines: &mut Vec<DiffLine>, code: &Opcode, a: &[&str], b: &[&str]) {
    let old = &a[code.a_start..code.a_end];
    let new = &b[code.b_start..code.b_end];
    let whole = |line: &str| vec![Span::Same(line.to_string())];

    match code.tag {
        Tag::Equal => {
            lines.extend(old.iter().map(|line| DiffLine::Context(line.to_string())));
        }
        Tag::Delete => {
            lines.extend(old.iter().map(|line| DiffLine::Deleted(whole(line))));
        }
        Tag::Insert => {
            lines.extend(new.iter().map(|line| DiffLine::Inserted(whole(line))));
        }
        Tag::Replace => {
            let pairs = old.len().min(new.len());
            for (line_a, line_b) in old.iter().zip(new.iter()) {
                lines.push(DiffLine::Deleted(removed_line_wdiff(line_a, line_b)));
            }
            lines.extend(old[pairs..].iter().map(|line| DiffLine::Deleted(whole(line))));
            for (line_a, line_b) in old.iter().zip(new.iter()) {
                lines.push(DiffLine::Inserted(added_line_wdiff(line_a, line_b)));
            }
            lines.extend(new[pairs..].iter().map(|line| DiffLine::Inserted(whole(line))));
        }
    }
}
