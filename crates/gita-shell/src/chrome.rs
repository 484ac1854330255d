#![forbid(unsafe_code)]

//! Shared UI chrome: column layout, header, bottom navigation, modals,
//! notices, the profile menu and the help overlay.

use ftui_core::geometry::Rect;
use ftui_layout::{Constraint, Flex};
use ftui_render::cell::Cell as RenderCell;
use ftui_render::frame::Frame;
use ftui_style::Style;
use ftui_text::{Line, Span, Text};
use ftui_widgets::Widget;
use ftui_widgets::block::{Alignment, Block};
use ftui_widgets::borders::{BorderType, Borders};
use ftui_widgets::paragraph::Paragraph;
use gita_core::{ScreenId, Session};

use crate::screens::{self, HelpEntry, Notice};
use crate::theme;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Rows taken by the header.
pub const HEADER_HEIGHT: u16 = 2;
/// Rows taken by the bottom navigation bar.
pub const NAV_HEIGHT: u16 = 1;

/// Regions of the centred column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub column: Rect,
    pub header: Rect,
    pub content: Rect,
    pub nav: Rect,
}

/// Narrow column centred in `area`, like a phone held upright.
pub fn column_area(area: Rect) -> Rect {
    let width = area.width.min(theme::COLUMN_MAX_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Split the terminal into header, content and bottom bar.
pub fn shell_layout(area: Rect) -> ShellLayout {
    let column = column_area(area);
    let chunks = Flex::vertical()
        .constraints([
            Constraint::Fixed(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Fixed(NAV_HEIGHT),
        ])
        .split(column);
    ShellLayout {
        column,
        header: chunks[0],
        content: chunks[1],
        nav: chunks[2],
    }
}

/// Centred rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// One-row slice of `area` at `row` (relative), or an empty rect when out of bounds.
pub fn row(area: Rect, row: u16) -> Rect {
    if row >= area.height {
        return Rect::new(area.x, area.y, 0, 0);
    }
    Rect::new(area.x, area.y + row, area.width, 1)
}

/// Paint `line` on a single row.
pub fn render_line(frame: &mut Frame, area: Rect, line: Line) {
    if area.is_empty() {
        return;
    }
    Paragraph::new(Text::from_lines([line])).render(area, frame);
}

/// Paint plain text on a single row with one style.
pub fn render_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    if area.is_empty() {
        return;
    }
    let text = theme::truncate_to_width(text, usize::from(area.width));
    Paragraph::new(text.as_str()).style(style).render(area, frame);
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// State the header needs to render.
pub struct HeaderState<'a> {
    pub screen: ScreenId,
    pub session: &'a Session,
    pub menu_open: bool,
}

/// Title bar with the back affordance and the profile badge.
pub fn render_header(state: &HeaderState<'_>, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    frame
        .buffer
        .fill(area, RenderCell::default().with_bg(theme::accent::SAFFRON));
    let meta = screens::screen_meta(state.screen);
    let style = theme::header();

    let back = if state.screen.parent().is_some() {
        "‹ Esc"
    } else {
        ""
    };
    let badge = format!(
        "[{}] {}",
        state.session.initials(),
        if state.menu_open { "▴" } else { "p" }
    );

    let top = row(area, 0);
    let badge_width = theme::display_width(&badge);
    let back_width = theme::display_width(back);
    render_text(frame, Rect::new(top.x + 1, top.y, back_width, 1), back, style);
    if top.width > badge_width + 1 {
        let bx = top.right().saturating_sub(badge_width + 1);
        render_text(frame, Rect::new(bx, top.y, badge_width, 1), &badge, style);
    }
    let title_room = top.width.saturating_sub(2 * (badge_width.max(back_width) + 2));
    let title = theme::truncate_to_width(meta.title, usize::from(title_room));
    let tw = theme::display_width(&title);
    Paragraph::new(title.as_str())
        .style(style.attrs(ftui_style::StyleFlags::BOLD))
        .render(Rect::new(top.x + (top.width - tw) / 2, top.y, tw, 1), frame);

    let subtitle = if state.screen == ScreenId::Home {
        format!("Namaste, {}", state.session.display_name())
    } else {
        meta.subtitle.to_string()
    };
    Paragraph::new(subtitle.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .render(row(area, 1), frame);
}

// ---------------------------------------------------------------------------
// Bottom navigation
// ---------------------------------------------------------------------------

/// Rectangle of bottom-bar slot `idx`; the last slot absorbs rounding.
pub fn nav_slot_rect(nav: Rect, idx: usize) -> Rect {
    let count = ScreenId::BOTTOM_NAV.len() as u16;
    let slot = nav.width / count;
    let idx = idx as u16;
    let x = nav.x + slot * idx;
    let width = if idx + 1 == count {
        nav.right() - x
    } else {
        slot
    };
    Rect::new(x, nav.y, width, nav.height)
}

/// Which bottom-bar destination sits at terminal cell (`x`, `y`).
pub fn nav_target_at(nav: Rect, x: u16, y: u16) -> Option<ScreenId> {
    ScreenId::BOTTOM_NAV
        .iter()
        .enumerate()
        .find(|(idx, _)| nav_slot_rect(nav, *idx).contains(x, y))
        .map(|(_, id)| *id)
}

/// Render the five-slot bottom bar. The slot of `current` (or of its
/// parent, for screens without a slot) is highlighted.
pub fn render_bottom_nav(current: ScreenId, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    Paragraph::new("").style(theme::nav_bar()).render(area, frame);
    let active = current
        .nav_slot()
        .or_else(|| current.parent().and_then(ScreenId::nav_slot));

    for (idx, id) in ScreenId::BOTTOM_NAV.iter().enumerate() {
        let slot = nav_slot_rect(area, idx);
        let style = if active == Some(idx) {
            theme::nav_active()
        } else {
            theme::nav_bar()
        };
        let label = format!("{} {}", idx + 1, screens::screen_meta(*id).short_label);
        let label = theme::truncate_to_width(&label, usize::from(slot.width));
        Paragraph::new(label.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .render(slot, frame);
    }
}

// ---------------------------------------------------------------------------
// Modal + notice
// ---------------------------------------------------------------------------

/// Draw a bordered modal centred in `area` and return its inner rect.
pub fn render_modal(frame: &mut Frame, area: Rect, title: &str, width: u16, height: u16) -> Rect {
    let modal_area = centered(area, width, height);
    if modal_area.is_empty() {
        return modal_area;
    }
    frame
        .buffer
        .fill(modal_area, RenderCell::default().with_bg(theme::bg::OVERLAY));
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(theme::modal());
    let inner = block.inner(modal_area);
    block.render(modal_area, frame);
    inner
}

/// Paint the notice on the last row of `area`, if one is showing.
pub fn render_notice(notice: &Notice, frame: &mut Frame, area: Rect) {
    let Some(text) = notice.text() else {
        return;
    };
    if area.is_empty() {
        return;
    }
    let bar = row(area, area.height - 1);
    Paragraph::new(format!(" {text} ").as_str())
        .style(theme::notice())
        .alignment(Alignment::Center)
        .render(bar, frame);
}

/// Footer row of key hints, e.g. `Enter open · Esc back`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme::muted()));
        }
        spans.push(Span::styled(*key, theme::key_hint()));
        spans.push(Span::styled(format!(" {action}"), theme::muted()));
    }
    render_line(frame, area, Line::from_spans(spans));
}

// ---------------------------------------------------------------------------
// Profile menu
// ---------------------------------------------------------------------------

/// Dropdown under the header badge with the user's identity and logout.
pub fn render_profile_menu(session: &Session, frame: &mut Frame, content: Rect) {
    let width = 30.min(content.width);
    let menu = Rect::new(
        content.right().saturating_sub(width),
        content.y,
        width,
        6.min(content.height),
    );
    if menu.is_empty() {
        return;
    }
    frame
        .buffer
        .fill(menu, RenderCell::default().with_bg(theme::bg::OVERLAY));
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(theme::modal());
    let inner = block.inner(menu);
    block.render(menu, frame);
    render_text(frame, row(inner, 0), session.display_name(), theme::title());
    render_text(frame, row(inner, 1), session.email_address(), theme::muted());
    render_hints(frame, row(inner, 3), &[("l", "Logout"), ("Esc", "close")]);
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

/// Global bindings listed at the top of the help overlay.
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("1-5", "Home, Courses, Community, Videos, Profile"),
    HelpEntry::new("Esc", "Back / close"),
    HelpEntry::new("p", "Profile menu"),
    HelpEntry::new("?", "Toggle this help"),
    HelpEntry::new("q / Ctrl+C", "Quit"),
];

/// Centered overlay listing global and screen-specific keybindings.
pub fn render_help_overlay(
    current: ScreenId,
    screen_bindings: &[HelpEntry],
    frame: &mut Frame,
    area: Rect,
) {
    let rows = (GLOBAL_HELP.len() + screen_bindings.len() + 5) as u16;
    let inner = render_modal(frame, area, " Keyboard Shortcuts ", 56, rows);
    if inner.width < 10 || inner.height < 3 {
        return;
    }

    let key_width = GLOBAL_HELP
        .iter()
        .chain(screen_bindings)
        .map(|e| theme::display_width(e.key))
        .max()
        .unwrap_or(0)
        + 2;
    let entry_line = |entry: &HelpEntry| {
        let pad = usize::from(key_width.saturating_sub(theme::display_width(entry.key)));
        Line::from_spans([
            Span::styled(" ", theme::body()),
            Span::styled(entry.key, theme::key_hint()),
            Span::styled(" ".repeat(pad), theme::body()),
            Span::styled(entry.action, theme::body()),
        ])
    };

    let mut lines = vec![Line::styled("Global", theme::accent())];
    lines.extend(GLOBAL_HELP.iter().map(entry_line));
    if !screen_bindings.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("{} Controls", screens::screen_meta(current).title),
            theme::accent(),
        ));
        lines.extend(screen_bindings.iter().map(entry_line));
    }
    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    Paragraph::new(Text::from_lines(lines)).render(body, frame);
    render_text(
        frame,
        row(inner, inner.height - 1),
        "Press ? or Esc to close",
        theme::muted(),
    );
}
