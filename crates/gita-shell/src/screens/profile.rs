#![forbid(unsafe_code)]

//! Profile: identity card, progress, recent activity and account actions.
//!
//! Editing only acknowledges the change. The session is owned by the
//! controller and screens never mutate it.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::block::Alignment;
use ftui_widgets::input::TextInput;
use ftui_widgets::paragraph::Paragraph;
use gita_core::{Intent, ScreenId, Session};

use super::{HelpEntry, Notice, Screen, key_press};
use crate::chrome;
use crate::theme;

pub const STATS: &[(&str, &str, &str)] = &[
    ("📖", "Chapters Read", "3"),
    ("🏆", "Quizzes Passed", "2"),
    ("🎖", "Certificates", "1"),
    ("🎬", "Videos Watched", "5"),
];

pub const ACTIVITIES: &[(&str, &str)] = &[
    ("Completed Chapter 2 Quiz", "2 hours ago"),
    ("Started Bhagavad Gita Course", "1 day ago"),
    ("Joined Community Discussion", "2 days ago"),
    ("Watched Krishna Leelas Video", "3 days ago"),
];

pub const SETTINGS_TOGGLES: &[&str] = &["Notifications", "Email Updates", "Dark Mode"];
pub const LANGUAGES: &[&str] = &["English", "Hindi", "Sanskrit"];
pub const UPDATED_NOTICE: &str = "Profile updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Email,
    Phone,
}

impl EditField {
    const ORDER: [Self; 3] = [Self::Name, Self::Email, Self::Phone];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
        }
    }

    fn step(self, forward: bool) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }
}

/// Edit Profile form, prefilled from the session.
#[derive(Debug, Clone)]
pub struct EditForm {
    name: TextInput,
    email: TextInput,
    phone: TextInput,
    focus: EditField,
}

impl EditForm {
    fn from_session(session: &Session) -> Self {
        Self {
            name: TextInput::new().with_value(session.display_name()),
            email: TextInput::new().with_value(session.email_address()),
            phone: TextInput::new().with_placeholder("+1 (555) 000-0000"),
            focus: EditField::Name,
        }
    }

    pub fn value(&self, field: EditField) -> &str {
        self.input(field).value()
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    fn input(&self, field: EditField) -> &TextInput {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Phone => &self.phone,
        }
    }

    fn input_mut(&mut self, field: EditField) -> &mut TextInput {
        match field {
            EditField::Name => &mut self.name,
            EditField::Email => &mut self.email,
            EditField::Phone => &mut self.phone,
        }
    }
}

/// Settings form. Values are cosmetic and live as long as the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub toggles: [bool; 3],
    pub language: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggles: [true; 3],
            language: 0,
        }
    }
}

#[derive(Debug, Clone)]
enum Overlay {
    Edit(EditForm),
    Settings {
        draft: Settings,
        /// Row 0..=2 are toggles, row 3 the language.
        row: usize,
    },
}

#[derive(Debug, Default)]
pub struct Profile {
    overlay: Option<Overlay>,
    settings: Settings,
    notice: Notice,
}

impl Profile {
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn edit_form(&self) -> Option<&EditForm> {
        match &self.overlay {
            Some(Overlay::Edit(form)) => Some(form),
            _ => None,
        }
    }

    pub fn is_settings_open(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Settings { .. }))
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.text()
    }

    fn update_edit(&mut self, event: &Event, code: KeyCode) {
        let Some(Overlay::Edit(form)) = self.overlay.as_mut() else {
            return;
        };
        match code {
            KeyCode::Escape => self.overlay = None,
            KeyCode::Enter => {
                tracing::info!(target: "gita.shell", "Profile edit saved");
                self.overlay = None;
                self.notice.show(UPDATED_NOTICE);
            }
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.step(true),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.step(false),
            _ => {
                let focus = form.focus;
                form.input_mut(focus).handle_event(event);
            }
        }
    }

    fn update_settings(&mut self, code: KeyCode) {
        let Some(Overlay::Settings { draft, row }) = self.overlay.as_mut() else {
            return;
        };
        let rows = SETTINGS_TOGGLES.len() + 1;
        let language_row = SETTINGS_TOGGLES.len();
        match code {
            KeyCode::Escape => self.overlay = None,
            KeyCode::Enter => {
                self.settings = *draft;
                self.overlay = None;
            }
            KeyCode::Down | KeyCode::Tab => *row = (*row + 1) % rows,
            KeyCode::Up | KeyCode::BackTab => *row = (*row + rows - 1) % rows,
            KeyCode::Char(' ') if *row < language_row => {
                draft.toggles[*row] = !draft.toggles[*row];
            }
            KeyCode::Right | KeyCode::Char(' ') if *row == language_row => {
                draft.language = (draft.language + 1) % LANGUAGES.len();
            }
            KeyCode::Left if *row == language_row => {
                draft.language = (draft.language + LANGUAGES.len() - 1) % LANGUAGES.len();
            }
            _ => {}
        }
    }

    fn render_card(session: &Session, frame: &mut Frame, area: Rect) {
        Paragraph::new(format!("({})", session.initials()).as_str())
            .style(theme::accent())
            .alignment(Alignment::Center)
            .render(chrome::row(area, 0), frame);
        Paragraph::new(session.display_name())
            .style(theme::title())
            .alignment(Alignment::Center)
            .render(chrome::row(area, 1), frame);
        Paragraph::new(format!("✉ {}", session.email_address()).as_str())
            .style(theme::muted())
            .alignment(Alignment::Center)
            .render(chrome::row(area, 2), frame);
    }

    fn render_edit(form: &EditForm, frame: &mut Frame, area: Rect) {
        let inner = chrome::render_modal(frame, area, " Edit Profile ", 50, 13);
        if inner.height < 10 {
            return;
        }
        for (i, field) in EditField::ORDER.iter().enumerate() {
            let y = i as u16 * 3;
            let focused = form.focus == *field;
            let (label_style, input_style) = if focused {
                (theme::key_hint(), theme::input_focused())
            } else {
                (theme::body(), theme::input())
            };
            chrome::render_text(frame, chrome::row(inner, y), field.label(), label_style);
            form.input(*field)
                .clone()
                .with_focused(focused)
                .with_style(input_style)
                .with_placeholder_style(theme::placeholder())
                .render(chrome::row(inner, y + 1), frame);
        }
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("Enter", "Save Changes"), ("Esc", "cancel")],
        );
    }

    fn render_settings(draft: &Settings, row: usize, frame: &mut Frame, area: Rect) {
        let inner = chrome::render_modal(frame, area, " Settings ", 44, 10);
        if inner.height < 6 {
            return;
        }
        let marker = |r: usize| {
            if r == row {
                theme::selection::INDICATOR
            } else {
                theme::selection::EMPTY
            }
        };
        for (i, label) in SETTINGS_TOGGLES.iter().enumerate() {
            let (state, style) = if draft.toggles[i] {
                ("[on ]", theme::success())
            } else {
                ("[off]", theme::muted())
            };
            chrome::render_line(
                frame,
                chrome::row(inner, i as u16),
                Line::from_spans([
                    Span::styled(marker(i), theme::accent()),
                    Span::styled(format!("{label:<16}"), theme::body()),
                    Span::styled(state, style),
                ]),
            );
        }
        let language_row = SETTINGS_TOGGLES.len();
        chrome::render_line(
            frame,
            chrome::row(inner, language_row as u16 + 1),
            Line::from_spans([
                Span::styled(marker(language_row), theme::accent()),
                Span::styled(format!("{:<16}", "Language"), theme::body()),
                Span::styled(format!("‹ {} ›", LANGUAGES[draft.language]), theme::key_hint()),
            ]),
        );
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("Space", "toggle"), ("Enter", "Save Settings"), ("Esc", "cancel")],
        );
    }
}

impl Screen for Profile {
    fn update(&mut self, event: &Event, session: &Session) -> Intent {
        let Some(key) = key_press(event) else {
            return Intent::Stay;
        };
        let code = key.code;
        match self.overlay {
            Some(Overlay::Edit(_)) => {
                self.update_edit(event, code);
                return Intent::Stay;
            }
            Some(Overlay::Settings { .. }) => {
                self.update_settings(code);
                return Intent::Stay;
            }
            None => {}
        }
        match code {
            KeyCode::Char('e') => {
                self.overlay = Some(Overlay::Edit(EditForm::from_session(session)));
            }
            KeyCode::Char('s') => {
                self.overlay = Some(Overlay::Settings {
                    draft: self.settings,
                    row: 0,
                });
            }
            KeyCode::Char('m') => return Intent::Navigate(ScreenId::Courses),
            KeyCode::Char('l') => return Intent::Logout,
            _ => {}
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        self.notice.tick();
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, session: &Session) {
        if area.height < 4 {
            return;
        }
        Self::render_card(session, frame, Rect::new(area.x, area.y, area.width, 3));

        let half = area.width / 2;
        for (i, (icon, label, value)) in STATS.iter().enumerate() {
            let x = area.x + (i as u16 % 2) * half;
            let y = area.y + 4 + (i as u16 / 2);
            chrome::render_line(
                frame,
                Rect::new(x, y, half, 1).intersection(&area),
                Line::from_spans([
                    Span::styled(format!(" {icon} "), theme::body()),
                    Span::styled(*value, theme::accent()),
                    Span::styled(format!(" {label}"), theme::muted()),
                ]),
            );
        }

        chrome::render_text(frame, chrome::row(area, 7), "Recent Activity", theme::title());
        for (i, (title, time)) in ACTIVITIES.iter().enumerate() {
            chrome::render_line(
                frame,
                chrome::row(area, 8 + i as u16),
                Line::from_spans([
                    Span::styled(format!("  • {title}"), theme::body()),
                    Span::styled(format!("  {time}"), theme::muted()),
                ]),
            );
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 2),
            &[("e", "Edit Profile"), ("s", "Settings")],
        );
        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("m", "My Certificates"), ("l", "Logout")],
        );

        match &self.overlay {
            Some(Overlay::Edit(form)) => Self::render_edit(form, frame, area),
            Some(Overlay::Settings { draft, row }) => Self::render_settings(draft, *row, frame, area),
            None => {}
        }
        chrome::render_notice(&self.notice, frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("e", "Edit Profile"),
            HelpEntry::new("s", "Settings"),
            HelpEntry::new("m", "My Certificates"),
            HelpEntry::new("l", "Logout"),
            HelpEntry::new("Tab / ↑↓", "Move between form rows"),
            HelpEntry::new("Esc", "Close the form"),
        ]
    }

    fn captures_text(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Edit(_)))
    }

    fn has_modal(&self) -> bool {
        self.overlay.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    fn key(screen: &mut Profile, code: KeyCode) -> Intent {
        screen.update(&press(code), &guest())
    }

    #[test]
    fn account_actions() {
        let mut screen = Profile::default();
        assert_eq!(key(&mut screen, KeyCode::Char('m')), Intent::Navigate(ScreenId::Courses));
        assert_eq!(key(&mut screen, KeyCode::Char('l')), Intent::Logout);
    }

    #[test]
    fn edit_form_is_prefilled_from_session() {
        let mut screen = Profile::default();
        key(&mut screen, KeyCode::Char('e'));
        assert!(screen.captures_text());
        let form = screen.edit_form().expect("edit form");
        assert_eq!(form.value(EditField::Name), "Demo User");
        assert_eq!(form.value(EditField::Email), "demo@radhagovind.com");
        assert_eq!(form.value(EditField::Phone), "");
    }

    #[test]
    fn saving_edit_shows_notice() {
        let mut screen = Profile::default();
        key(&mut screen, KeyCode::Char('e'));
        key(&mut screen, KeyCode::Tab);
        key(&mut screen, KeyCode::Tab);
        key(&mut screen, KeyCode::Char('9'));
        assert_eq!(screen.edit_form().map(|f| f.value(EditField::Phone)), Some("9"));
        // 'l' types into the form instead of logging out.
        assert_eq!(key(&mut screen, KeyCode::Char('l')), Intent::Stay);
        key(&mut screen, KeyCode::Enter);
        assert!(screen.edit_form().is_none());
        assert_eq!(screen.notice(), Some(UPDATED_NOTICE));
    }

    #[test]
    fn settings_save_and_cancel() {
        let mut screen = Profile::default();
        key(&mut screen, KeyCode::Char('s'));
        assert!(screen.is_settings_open());
        key(&mut screen, KeyCode::Char(' '));
        key(&mut screen, KeyCode::Up);
        key(&mut screen, KeyCode::Right);
        key(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.settings(),
            Settings {
                toggles: [false, true, true],
                language: 1,
            }
        );

        key(&mut screen, KeyCode::Char('s'));
        key(&mut screen, KeyCode::Down);
        key(&mut screen, KeyCode::Char(' '));
        key(&mut screen, KeyCode::Escape);
        assert!(!screen.is_settings_open());
        assert_eq!(screen.settings().toggles, [false, true, true]);
    }

    #[test]
    fn renders_stats_and_activity() {
        let text = screen_text(&Profile::default(), 64, 20);
        assert!(text.contains("Demo User"));
        assert!(text.contains("Chapters Read"), "{text}");
        assert!(text.contains("Watched Krishna Leelas Video"));
        assert!(text.contains("My Certificates"));
    }
}
