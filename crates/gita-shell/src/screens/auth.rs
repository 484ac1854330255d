#![forbid(unsafe_code)]

//! Login / sign-up form shown while no session exists.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::block::Alignment;
use ftui_widgets::input::TextInput;
use ftui_widgets::paragraph::Paragraph;
use gita_core::{AuthMode, CredentialError, CredentialField, Credentials};

use super::{HelpEntry, pressed_code};
use crate::chrome;
use crate::theme;

const PASSWORD_MASK: char = '•';

/// What the form asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    None,
    Submit(Credentials),
    Guest,
}

/// Auth form state.
#[derive(Debug, Clone)]
pub struct AuthView {
    mode: AuthMode,
    name: TextInput,
    email: TextInput,
    password: TextInput,
    focus: CredentialField,
    show_password: bool,
    error: Option<CredentialError>,
}

impl Default for AuthView {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            name: TextInput::new().with_placeholder("Enter your full name"),
            email: TextInput::new().with_placeholder("Enter your email"),
            password: TextInput::new().with_placeholder("Enter your password"),
            focus: CredentialField::Email,
            show_password: false,
            error: None,
        }
    }
}

impl AuthView {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn focus(&self) -> CredentialField {
        self.focus
    }

    pub fn error(&self) -> Option<&CredentialError> {
        self.error.as_ref()
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    /// Record a declined submission and focus the offending field.
    pub fn set_error(&mut self, error: CredentialError) {
        let CredentialError::Empty(field) = error;
        self.focus = field;
        self.error = Some(error);
    }

    /// Current form values.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            mode: self.mode,
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.mode.fields();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
        if !self.mode.fields().contains(&self.focus) {
            self.focus = CredentialField::Email;
        }
    }

    fn input_mut(&mut self, field: CredentialField) -> &mut TextInput {
        match field {
            CredentialField::Name => &mut self.name,
            CredentialField::Email => &mut self.email,
            CredentialField::Password => &mut self.password,
        }
    }

    fn input(&self, field: CredentialField) -> &TextInput {
        match field {
            CredentialField::Name => &self.name,
            CredentialField::Email => &self.email,
            CredentialField::Password => &self.password,
        }
    }

    pub fn update(&mut self, event: &Event) -> AuthAction {
        let Some(code) = pressed_code(event) else {
            return AuthAction::None;
        };
        match code {
            KeyCode::F(2) => self.toggle_mode(),
            KeyCode::F(3) => self.show_password = !self.show_password,
            KeyCode::F(4) => return AuthAction::Guest,
            KeyCode::Enter => return AuthAction::Submit(self.credentials()),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            _ => {
                let focus = self.focus;
                if self.input_mut(focus).handle_event(event) {
                    self.error = None;
                }
            }
        }
        AuthAction::None
    }

    pub fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("Tab / ↑↓", "Move between fields"),
            HelpEntry::new("Enter", "Submit"),
            HelpEntry::new("F2", "Switch Login / Sign Up"),
            HelpEntry::new("F3", "Show / hide password"),
            HelpEntry::new("F4", "Continue as Guest"),
        ]
    }

    pub fn view(&self, frame: &mut Frame, area: Rect) {
        let column = chrome::column_area(area);
        let form_height = 6 + 3 * self.mode.fields().len() as u16 + 4;
        let form = chrome::centered(column, column.width.saturating_sub(4), form_height);
        if form.is_empty() {
            return;
        }

        Paragraph::new("ॐ Radha Govind Dham")
            .style(theme::accent())
            .alignment(Alignment::Center)
            .render(chrome::row(form, 0), frame);
        Paragraph::new("Gita For Your Life")
            .style(theme::subtitle())
            .alignment(Alignment::Center)
            .render(chrome::row(form, 1), frame);

        let tab = |mode: AuthMode| {
            let label = format!(" {} ", mode.label());
            if mode == self.mode {
                Span::styled(label, theme::selected())
            } else {
                Span::styled(label, theme::muted())
            }
        };
        let tabs = Line::from_spans([
            tab(AuthMode::Login),
            Span::styled("  ", theme::muted()),
            tab(AuthMode::Signup),
        ]);
        Paragraph::new(tabs)
            .alignment(Alignment::Center)
            .render(chrome::row(form, 3), frame);

        let mut y = 5;
        for field in self.mode.fields() {
            let focused = *field == self.focus;
            let label_style = if focused {
                theme::key_hint()
            } else {
                theme::body()
            };
            chrome::render_text(frame, chrome::row(form, y), field.label(), label_style);
            let mut input = self
                .input(*field)
                .clone()
                .with_focused(focused)
                .with_placeholder_style(theme::placeholder())
                .with_style(if focused {
                    theme::input_focused()
                } else {
                    theme::input()
                });
            if *field == CredentialField::Password && !self.show_password {
                input = input.with_mask(PASSWORD_MASK);
            }
            input.render(chrome::row(form, y + 1), frame);
            y += 3;
        }

        if let Some(err) = &self.error {
            chrome::render_text(frame, chrome::row(form, y), &err.to_string(), theme::error_style());
        }
        y += 1;

        let submit = match self.mode {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        };
        let eye = if self.show_password {
            "hide password"
        } else {
            "show password"
        };
        chrome::render_hints(frame, chrome::row(form, y), &[("Enter", submit), ("F3", eye)]);
        let switch = match self.mode {
            AuthMode::Login => "Don't have an account? Sign Up",
            AuthMode::Signup => "Already have an account? Login",
        };
        chrome::render_hints(frame, chrome::row(form, y + 1), &[("F2", switch)]);
        chrome::render_hints(frame, chrome::row(form, y + 2), &[("F4", "Continue as Guest")]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::press;
    use ftui_render::grapheme_pool::GraphemePool;

    fn type_text(view: &mut AuthView, text: &str) {
        for ch in text.chars() {
            view.update(&press(KeyCode::Char(ch)));
        }
    }

    fn render(view: &AuthView) -> String {
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(60, 30, &mut pool);
        view.view(&mut frame, Rect::new(0, 0, 60, 30));
        let mut out = String::new();
        for y in 0..30 {
            for x in 0..60 {
                out.push(
                    frame
                        .buffer
                        .get(x, y)
                        .and_then(|c| c.content.as_char())
                        .unwrap_or(' '),
                );
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn starts_in_login_mode_on_email() {
        let view = AuthView::default();
        assert_eq!(view.mode(), AuthMode::Login);
        assert_eq!(view.focus(), CredentialField::Email);
    }

    #[test]
    fn enter_submits_typed_values() {
        let mut view = AuthView::default();
        type_text(&mut view, "demo@radhagovind.com");
        view.update(&press(KeyCode::Tab));
        type_text(&mut view, "secret");
        let action = view.update(&press(KeyCode::Enter));
        assert_eq!(
            action,
            AuthAction::Submit(Credentials::login("demo@radhagovind.com", "secret"))
        );
    }

    #[test]
    fn focus_cycles_through_mode_fields() {
        let mut view = AuthView::default();
        view.update(&press(KeyCode::Tab));
        assert_eq!(view.focus(), CredentialField::Password);
        view.update(&press(KeyCode::Tab));
        assert_eq!(view.focus(), CredentialField::Email);

        view.update(&press(KeyCode::F(2)));
        assert_eq!(view.mode(), AuthMode::Signup);
        view.update(&press(KeyCode::BackTab));
        assert_eq!(view.focus(), CredentialField::Name);
        view.update(&press(KeyCode::Up));
        assert_eq!(view.focus(), CredentialField::Password);
    }

    #[test]
    fn leaving_signup_moves_focus_off_name() {
        let mut view = AuthView::default();
        view.update(&press(KeyCode::F(2)));
        view.update(&press(KeyCode::BackTab));
        assert_eq!(view.focus(), CredentialField::Name);
        view.update(&press(KeyCode::F(2)));
        assert_eq!(view.focus(), CredentialField::Email);
    }

    #[test]
    fn guest_shortcut() {
        let mut view = AuthView::default();
        assert_eq!(view.update(&press(KeyCode::F(4))), AuthAction::Guest);
    }

    #[test]
    fn error_focuses_field_and_clears_on_edit() {
        let mut view = AuthView::default();
        view.set_error(CredentialError::Empty(CredentialField::Password));
        assert_eq!(view.focus(), CredentialField::Password);
        assert!(render(&view).contains("Password is required"));
        type_text(&mut view, "x");
        assert!(view.error().is_none());
    }

    #[test]
    fn password_is_masked_until_revealed() {
        let mut view = AuthView::default();
        view.update(&press(KeyCode::Tab));
        type_text(&mut view, "zq9");
        assert!(!render(&view).contains("zq9"));
        view.update(&press(KeyCode::F(3)));
        assert!(view.password_visible());
        assert!(render(&view).contains("zq9"));
    }

    #[test]
    fn renders_brand_and_guest_hint() {
        let text = render(&AuthView::default());
        assert!(text.contains("Radha Govind Dham"));
        assert!(text.contains("Continue as Guest"));
        assert!(!text.contains("Full name"));
    }
}
