// Rust guideline compliant 2026-10-19

//! Terminal rendering of diff lines and entry notices.
//!
//! Colored output drops the textual `[-…-]`/`{+…+}` markers and highlights
//! changed spans with a darker background instead. Plain output keeps the
//! markers so the diff stays readable without colors.

use crate::config::{ColorMode, Config};
use crate::wdiff::{escape_terminators, strip_terminator, DiffLine, Span};
use std::io::Write;
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// xterm-256 colors of the diff palette.
mod palette {
    /// `#d7ffff`
    pub const INSERTED: u8 = 195;
    /// `#005f5f`
    pub const INSERTED_DARKER: u8 = 23;
    /// `#ffd7ff`
    pub const DELETED: u8 = 225;
    /// `#870087`
    pub const DELETED_DARKER: u8 = 90;
}

/// Returns whether the environment asks for colorless output.
pub fn color_disabled_by_env() -> bool {
    std::env::var_os("NO_COLOR").is_some() || std::env::var_os("ANSI_COLORS_DISABLED").is_some()
}

/// Renders diffs either as plain text or with ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    color: bool,
    visible_whitespace: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::plain()
    }
}

impl Renderer {
    /// Creates a renderer.
    pub fn new(color: bool, visible_whitespace: bool) -> Self {
        Self {
            color,
            visible_whitespace,
        }
    }

    /// Plain renderer with visible whitespace.
    pub fn plain() -> Self {
        Self::new(false, true)
    }

    /// Builds a renderer from configuration.
    ///
    /// `is_terminal` tells whether output goes to a terminal; it only matters
    /// in [`ColorMode::Auto`], where the `NO_COLOR` and
    /// `ANSI_COLORS_DISABLED` variables also turn colors off.
    pub fn from_config(config: &Config, is_terminal: bool) -> Self {
        let color = match config.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal && !color_disabled_by_env(),
        };
        Self::new(color, config.visible_whitespace)
    }

    /// Returns whether ANSI colors are emitted.
    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Renders one diff line without trailing newline.
    pub fn render_line(&self, line: &DiffLine) -> String {
        if !self.color && !self.visible_whitespace {
            return line.to_string();
        }
        match line {
            DiffLine::FromFile(_) => self.snapshot_style(&line.to_string()),
            DiffLine::ToFile(_) => self.received_style(&line.to_string()),
            DiffLine::Hunk { .. } => self.paint(&line.to_string(), &hunk_spec()),
            DiffLine::Context(_) => line.to_string(),
            DiffLine::Deleted(spans) => self.render_spans("- ", spans, Side::Deleted),
            DiffLine::Inserted(spans) => self.render_spans("+ ", spans, Side::Inserted),
        }
    }

    /// Renders a sequence of diff lines.
    pub fn render_lines(&self, lines: &[DiffLine]) -> Vec<String> {
        lines.iter().map(|line| self.render_line(line)).collect()
    }

    fn render_spans(&self, prefix: &str, spans: &[Span], side: Side) -> String {
        let (line_spec, span_spec) = match side {
            Side::Deleted => (snapshot_spec(), snapshot_diff_spec()),
            Side::Inserted => (received_spec(), received_diff_spec()),
        };

        let mut out = self.paint(prefix, &line_spec);
        let last = spans.len().saturating_sub(1);
        for (i, span) in spans.iter().enumerate() {
            match span {
                Span::Same(text) => {
                    let text = if i == last { strip_terminator(text) } else { text };
                    out.push_str(&self.paint(text, &line_spec));
                }
                changed => {
                    let text = self.show_whitespace(changed.text());
                    if self.color {
                        out.push_str(&self.paint(&text, &span_spec));
                    } else {
                        out.push_str(&marked(changed, &text));
                    }
                }
            }
        }
        out
    }

    /// Makes whitespace in a changed span visible.
    ///
    /// Line terminators are always substituted; spaces and tabs only when the
    /// whole span is whitespace and visible whitespace is on.
    fn show_whitespace(&self, text: &str) -> String {
        if !self.visible_whitespace {
            return escape_terminators(text);
        }
        let whitespace_only = text.chars().all(char::is_whitespace);
        text.chars()
            .map(|c| match c {
                '\n' => '↵',
                '\r' => '␍',
                ' ' if whitespace_only => '·',
                '\t' if whitespace_only => '→',
                other => other,
            })
            .collect()
    }

    fn paint(&self, text: &str, spec: &ColorSpec) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        let mut out = Ansi::new(Vec::new());
        let _ = out.set_color(spec);
        let _ = out.write_all(text.as_bytes());
        let _ = out.reset();
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Appends a reset sequence when colored.
    pub fn reset(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut out = Ansi::new(text.as_bytes().to_vec());
        let _ = out.reset();
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Style for whole lines describing the received side.
    pub fn received_style(&self, text: &str) -> String {
        self.paint(text, &received_spec())
    }

    /// Style for the highlighted part of a received-side line.
    pub fn received_diff_style(&self, text: &str) -> String {
        self.paint(text, &received_diff_spec())
    }

    /// Style for whole lines describing the snapshot side.
    pub fn snapshot_style(&self, text: &str) -> String {
        self.paint(text, &snapshot_spec())
    }

    /// Style for the highlighted part of a snapshot-side line.
    pub fn snapshot_diff_style(&self, text: &str) -> String {
        self.paint(text, &snapshot_diff_spec())
    }
}

#[derive(Clone, Copy)]
enum Side {
    Deleted,
    Inserted,
}

fn marked(span: &Span, text: &str) -> String {
    match span {
        Span::Removed(_) => format!("[-{}-]", text),
        Span::Added(_) => format!("{{+{}+}}", text),
        Span::Same(_) => text.to_string(),
    }
}

fn spec(fg: u8, bg: u8) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Ansi256(fg)))
        .set_bg(Some(Color::Ansi256(bg)));
    spec
}

fn received_spec() -> ColorSpec {
    spec(palette::INSERTED_DARKER, palette::INSERTED)
}

fn received_diff_spec() -> ColorSpec {
    spec(palette::INSERTED, palette::INSERTED_DARKER)
}

fn snapshot_spec() -> ColorSpec {
    spec(palette::DELETED_DARKER, palette::DELETED)
}

fn snapshot_diff_spec() -> ColorSpec {
    spec(palette::DELETED, palette::DELETED_DARKER)
}

fn hunk_spec() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Magenta)).set_bold(true);
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wdiff::{split_lines, unified_wdiff, DEFAULT_CONTEXT};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn diff(a: &str, b: &str) -> Vec<DiffLine> {
        unified_wdiff(
            &split_lines(a),
            &split_lines(b),
            "<snapshot>/f",
            "<received>/f",
            DEFAULT_CONTEXT,
        )
    }

    #[test]
    fn test_plain_keeps_markers() {
        let lines = Renderer::plain().render_lines(&diff("a b\n", "a c\n"));
        assert_eq!(lines[3], "- a [-b-]");
        assert_eq!(lines[4], "+ a {+c+}");
    }

    #[test]
    fn test_plain_shows_whitespace_only_changes() {
        let lines = Renderer::plain().render_lines(&diff("a b\n", "a  b\n"));
        assert_eq!(lines[3], "- a b");
        assert_eq!(lines[4], "+ a{+·+} b");
    }

    #[test]
    fn test_plain_shows_changed_line_endings() {
        let lines = Renderer::plain().render_lines(&diff("value\n", "value\r\n"));
        assert_eq!(lines[4], "+ value{+␍+}");
    }

    #[test]
    fn test_plain_without_visible_whitespace_matches_display() {
        let renderer = Renderer::new(false, false);
        let lines = diff("a b\n", "a\tb\n");
        let rendered = renderer.render_lines(&lines);
        let displayed: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, displayed);
    }

    #[test]
    fn test_colored_strips_markers() {
        let renderer = Renderer::new(true, true);
        let lines = renderer.render_lines(&diff("a b\n", "a c\n"));
        assert!(!lines[4].contains("{+"));
        assert!(lines[4].contains("\x1b["));
        assert!(lines[4].contains('c'));
    }

    #[test]
    fn test_styles_are_plain_without_color() {
        let renderer = Renderer::plain();
        assert_eq!(renderer.received_style("x"), "x");
        assert_eq!(renderer.snapshot_diff_style("y"), "y");
        assert_eq!(renderer.reset("z"), "z");
    }

    #[test]
    fn test_reset_appends_sequence_when_colored() {
        let renderer = Renderer::new(true, true);
        assert_eq!(renderer.reset("z"), "z\x1b[0m");
    }

    #[test]
    fn test_changed_terminator_without_visible_whitespace() {
        let renderer = Renderer::new(false, false);
        let lines = renderer.render_lines(&diff("ab\n", "ab"));
        assert_eq!(lines[3], "- ab[-↵-]");
        assert!(lines.iter().all(|line| !line.contains('\n')));
    }

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_color_env() {
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("ANSI_COLORS_DISABLED");
    }

    #[test]
    fn test_auto_mode_honours_color_env_on_terminal() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_color_env();
        let config = Config {
            color: ColorMode::Auto,
            ..Config::default()
        };
        assert!(Renderer::from_config(&config, true).is_colored());

        std::env::set_var("NO_COLOR", "1");
        assert!(!Renderer::from_config(&config, true).is_colored());
        clear_color_env();

        std::env::set_var("ANSI_COLORS_DISABLED", "1");
        assert!(!Renderer::from_config(&config, true).is_colored());

        let forced = Config {
            color: ColorMode::Always,
            ..Config::default()
        };
        assert!(Renderer::from_config(&forced, true).is_colored());
        clear_color_env();
    }

    #[test]
    fn test_from_config_respects_mode() {
        let mut config = Config::default();
        config.color = ColorMode::Always;
        assert!(Renderer::from_config(&config, false).is_colored());
        config.color = ColorMode::Never;
        assert!(!Renderer::from_config(&config, true).is_colored());
        config.color = ColorMode::Auto;
        assert!(!Renderer::from_config(&config, false).is_colored());
    }
}
