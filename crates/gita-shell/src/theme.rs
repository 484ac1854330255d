#![forbid(unsafe_code)]

//! Colors and named styles for the shell.
//!
//! The palette follows the temple look of the product: saffron and amber
//! accents over warm dark surfaces.

use ftui_style::{Style, StyleFlags};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Widest the content column ever gets, in cells.
pub const COLUMN_MAX_WIDTH: u16 = 64;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub mod bg {
    use ftui_render::cell::PackedRgba;

    pub const DEEP: PackedRgba = PackedRgba::rgb(24, 18, 14);
    pub const COLUMN: PackedRgba = PackedRgba::rgb(36, 27, 20);
    pub const SURFACE: PackedRgba = PackedRgba::rgb(52, 38, 27);
    pub const OVERLAY: PackedRgba = PackedRgba::rgb(64, 46, 30);
    pub const HIGHLIGHT: PackedRgba = PackedRgba::rgb(96, 58, 24);
}

pub mod fg {
    use ftui_render::cell::PackedRgba;

    pub const PRIMARY: PackedRgba = PackedRgba::rgb(248, 240, 228);
    pub const SECONDARY: PackedRgba = PackedRgba::rgb(222, 200, 170);
    pub const MUTED: PackedRgba = PackedRgba::rgb(160, 140, 118);
}

pub mod accent {
    use ftui_render::cell::PackedRgba;

    pub const SAFFRON: PackedRgba = PackedRgba::rgb(249, 115, 22);
    pub const AMBER: PackedRgba = PackedRgba::rgb(245, 158, 11);
    pub const SUCCESS: PackedRgba = PackedRgba::rgb(34, 197, 94);
    pub const ERROR: PackedRgba = PackedRgba::rgb(239, 68, 68);
    pub const INFO: PackedRgba = PackedRgba::rgb(96, 165, 250);
}

/// Selection markers for list rows.
pub mod selection {
    pub const INDICATOR: &str = "▶ ";
    pub const EMPTY: &str = "  ";
}

// ---------------------------------------------------------------------------
// Named styles
// ---------------------------------------------------------------------------

pub fn title() -> Style {
    Style::new().fg(fg::PRIMARY).attrs(StyleFlags::BOLD)
}

pub fn subtitle() -> Style {
    Style::new().fg(fg::SECONDARY).attrs(StyleFlags::ITALIC)
}

pub fn body() -> Style {
    Style::new().fg(fg::PRIMARY)
}

pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

pub fn accent() -> Style {
    Style::new().fg(accent::SAFFRON).attrs(StyleFlags::BOLD)
}

pub fn key_hint() -> Style {
    Style::new().fg(accent::AMBER).attrs(StyleFlags::BOLD)
}

pub fn error_style() -> Style {
    Style::new().fg(accent::ERROR).attrs(StyleFlags::BOLD)
}

pub fn success() -> Style {
    Style::new().fg(accent::SUCCESS).attrs(StyleFlags::BOLD)
}

/// Row highlight for the focused list entry.
pub fn selected() -> Style {
    Style::new()
        .bg(bg::HIGHLIGHT)
        .fg(fg::PRIMARY)
        .attrs(StyleFlags::BOLD)
}

pub fn header() -> Style {
    Style::new().bg(accent::SAFFRON).fg(fg::PRIMARY)
}

pub fn nav_bar() -> Style {
    Style::new().bg(bg::SURFACE).fg(fg::MUTED)
}

pub fn nav_active() -> Style {
    Style::new()
        .bg(bg::HIGHLIGHT)
        .fg(accent::AMBER)
        .attrs(StyleFlags::BOLD)
}

pub fn modal() -> Style {
    Style::new().bg(bg::OVERLAY).fg(fg::PRIMARY)
}

pub fn notice() -> Style {
    Style::new()
        .bg(accent::AMBER)
        .fg(bg::DEEP)
        .attrs(StyleFlags::BOLD)
}

pub fn input() -> Style {
    Style::new().bg(bg::SURFACE).fg(fg::PRIMARY)
}

pub fn input_focused() -> Style {
    Style::new().bg(bg::HIGHLIGHT).fg(fg::PRIMARY)
}

pub fn placeholder() -> Style {
    Style::new().fg(fg::MUTED).attrs(StyleFlags::DIM)
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Cut `text` to at most `max_width` cells, ending with `…` when shortened.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w + 1 > max_width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Horizontal bar like `████░░░░` for a 0..=100 percentage.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let filled = (percent * width + 50) / 100;
    let mut bar = String::with_capacity(width * 3);
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

/// Greedy word wrap to `width` cells. Words wider than a line are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        let w = word.width();
        if used > 0 && used + 1 + w <= width {
            current.push(' ');
            current.push_str(word);
            used += 1 + w;
            continue;
        }
        if used > 0 {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if w <= width {
            current.push_str(word);
            used = w;
            continue;
        }
        for g in word.graphemes(true) {
            let gw = g.width();
            if used + gw > width && used > 0 {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push_str(g);
            used += gw;
        }
    }
    if used > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Karma Yoga", 20), "Karma Yoga");
    }

    #[test]
    fn truncate_adds_ellipsis_within_budget() {
        let out = truncate_to_width("Jnana Karma Sanyasa Yoga", 10);
        assert_eq!(out, "Jnana Kar…");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn truncate_respects_wide_graphemes() {
        let out = truncate_to_width("🙏🙏🙏🙏", 5);
        assert!(out.width() <= 5, "{out:?}");
        assert!(out.ends_with('…'));
    }

    #[test]
    fn wrap_words_breaks_at_spaces() {
        assert_eq!(
            wrap_words("Namaste! How can I help you", 12),
            vec!["Namaste! How", "can I help", "you"]
        );
        assert_eq!(wrap_words("", 10), vec![""]);
        assert_eq!(wrap_words("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(100, 4), "████");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(250, 2), "██");
        assert_eq!(progress_bar(45, 10).chars().filter(|c| *c == '█').count(), 5);
    }

    proptest::proptest! {
        #[test]
        fn wrapped_lines_fit_width(text in "[a-z ]{0,80}", width in 1usize..30) {
            let lines = wrap_words(&text, width);
            proptest::prop_assert!(!lines.is_empty());
            for line in &lines {
                proptest::prop_assert!(line.width() <= width, "{line:?} wider than {width}");
            }
            let rejoined: String = lines.concat().split_whitespace().collect();
            let expected: String = text.split_whitespace().collect();
            proptest::prop_assert_eq!(rejoined, expected);
        }

        #[test]
        fn truncation_fits_width(text in "[a-zA-Z0-9 éü]{0,40}", width in 0usize..40) {
            let out = truncate_to_width(&text, width);
            proptest::prop_assert!(out.width() <= width, "{out:?} wider than {width}");
        }
    }
}
