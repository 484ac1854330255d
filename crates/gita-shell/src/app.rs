#![forbid(unsafe_code)]

//! Main application model, message routing, and screen dispatch.
//!
//! This module contains the top-level [`AppModel`] that implements the Elm
//! architecture via [`Model`]. The [`Controller`] owns the session and the
//! active screen; this model owns everything the terminal needs on top of
//! that: per-screen state, overlays, and key routing.

use std::time::Duration;

use ftui_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEventKind,
};
use ftui_core::geometry::Rect;
use ftui_render::cell::Cell as RenderCell;
use ftui_render::frame::Frame;
use ftui_runtime::{Cmd, Every, Model, Subscription};
use gita_core::{Controller, Intent, Phase, ScreenId, Session};

use crate::chrome;
use crate::screens::auth::{AuthAction, AuthView};
use crate::screens::{self, HelpEntry, Screen};
use crate::theme;

/// Tick period driving timers and notices.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// ScreenStates
// ---------------------------------------------------------------------------

/// Holds the state for every screen.
#[derive(Debug, Default)]
pub struct ScreenStates {
    pub home: screens::home::Home,
    pub scripture: screens::scripture::Scripture,
    pub assistant: screens::assistant::Assistant,
    pub courses: screens::courses::Courses,
    pub community: screens::community::Community,
    pub quizzes: screens::quizzes::Quizzes,
    pub videos: screens::videos::Videos,
    pub personalized_video: screens::personalized_video::PersonalizedVideo,
    pub profile: screens::profile::Profile,
}

impl ScreenStates {
    fn screen(&self, id: ScreenId) -> &dyn Screen {
        match id {
            ScreenId::Home => &self.home,
            ScreenId::Scripture => &self.scripture,
            ScreenId::Assistant => &self.assistant,
            ScreenId::Courses => &self.courses,
            ScreenId::Community => &self.community,
            ScreenId::Quizzes => &self.quizzes,
            ScreenId::Videos => &self.videos,
            ScreenId::PersonalizedVideo => &self.personalized_video,
            ScreenId::Profile => &self.profile,
        }
    }

    fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::Home => &mut self.home,
            ScreenId::Scripture => &mut self.scripture,
            ScreenId::Assistant => &mut self.assistant,
            ScreenId::Courses => &mut self.courses,
            ScreenId::Community => &mut self.community,
            ScreenId::Quizzes => &mut self.quizzes,
            ScreenId::Videos => &mut self.videos,
            ScreenId::PersonalizedVideo => &mut self.personalized_video,
            ScreenId::Profile => &mut self.profile,
        }
    }

    /// Forward an event to the screen identified by `id`.
    pub fn update(&mut self, id: ScreenId, event: &Event, session: &Session) -> Intent {
        self.screen_mut(id).update(event, session)
    }

    pub fn tick(&mut self, id: ScreenId, tick_count: u64) -> Intent {
        self.screen_mut(id).tick(tick_count)
    }

    pub fn view(&self, id: ScreenId, frame: &mut Frame, area: Rect, session: &Session) {
        self.screen(id).view(frame, area, session);
    }

    pub fn keybindings(&self, id: ScreenId) -> Vec<HelpEntry> {
        self.screen(id).keybindings()
    }

    pub fn captures_text(&self, id: ScreenId) -> bool {
        self.screen(id).captures_text()
    }

    pub fn has_modal(&self, id: ScreenId) -> bool {
        self.screen(id).has_modal()
    }

    /// Drop a screen's local state, as when the view unmounts.
    pub fn reset(&mut self, id: ScreenId) {
        match id {
            ScreenId::Home => self.home = Default::default(),
            ScreenId::Scripture => self.scripture = Default::default(),
            ScreenId::Assistant => {
                self.assistant.discard_pending();
                self.assistant = Default::default();
            }
            ScreenId::Courses => self.courses = Default::default(),
            ScreenId::Community => self.community = Default::default(),
            ScreenId::Quizzes => self.quizzes = Default::default(),
            ScreenId::Videos => self.videos = Default::default(),
            ScreenId::PersonalizedVideo => self.personalized_video = Default::default(),
            ScreenId::Profile => self.profile = Default::default(),
        }
    }

    pub fn reset_all(&mut self) {
        for &id in ScreenId::ALL {
            self.reset(id);
        }
    }
}

// ---------------------------------------------------------------------------
// AppMsg
// ---------------------------------------------------------------------------

/// Top-level application message.
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// A raw terminal event routed by the key map, then to the active view.
    ScreenEvent(Event),
    /// Switch to a specific screen.
    Navigate(ScreenId),
    /// End the session.
    Logout,
    /// Periodic tick for timers and notices.
    Tick,
    /// Terminal resize.
    Resize {
        /// New terminal width.
        width: u16,
        /// New terminal height.
        height: u16,
    },
    /// Toggle the help overlay.
    ToggleHelp,
    /// Quit the application.
    Quit,
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        if let Event::Resize { width, height } = event {
            return Self::Resize { width, height };
        }

        Self::ScreenEvent(event)
    }
}

// ---------------------------------------------------------------------------
// AppModel
// ---------------------------------------------------------------------------

/// Top-level application state.
///
/// Implements the Elm architecture: all state lives here, messages drive
/// transitions, and `view()` is a pure function of state.
#[derive(Debug)]
pub struct AppModel {
    /// Session and active screen.
    pub controller: Controller,
    /// Login / sign-up form, shown while no session exists.
    pub auth: AuthView,
    /// Per-screen state storage.
    pub screens: ScreenStates,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Whether the profile dropdown under the header badge is open.
    pub profile_menu_open: bool,
    /// Global tick counter (incremented every 100ms).
    pub tick_count: u64,
    /// Current terminal width.
    pub terminal_width: u16,
    /// Current terminal height.
    pub terminal_height: u16,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Screen to open once the next session starts.
    pub start_screen: Option<ScreenId>,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    /// Create a new application model: unauthenticated, auth form showing.
    pub fn new() -> Self {
        Self {
            controller: Controller::new(),
            auth: AuthView::default(),
            screens: ScreenStates::default(),
            help_visible: false,
            profile_menu_open: false,
            tick_count: 0,
            terminal_width: 0,
            terminal_height: 0,
            exit_after_ms: 0,
            start_screen: None,
        }
    }

    /// Start logged in as the guest identity.
    pub fn with_guest(mut self) -> Self {
        self.controller.continue_as_guest();
        self.session_started();
        self
    }

    pub fn current_screen(&self) -> ScreenId {
        self.controller.screen()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    fn handle_msg(&mut self, msg: AppMsg) -> Cmd<AppMsg> {
        match msg {
            AppMsg::Quit => Cmd::Quit,

            AppMsg::Navigate(id) => {
                if self.controller.session().is_some() {
                    self.navigate(id);
                }
                Cmd::None
            }

            AppMsg::Logout => {
                self.logout();
                Cmd::None
            }

            AppMsg::ToggleHelp => {
                if self.controller.session().is_some() {
                    self.help_visible = !self.help_visible;
                }
                Cmd::None
            }

            AppMsg::Tick => {
                self.tick_count = self.tick_count.wrapping_add(1);
                if self.controller.session().is_some() {
                    let current = self.current_screen();
                    let intent = self.screens.tick(current, self.tick_count);
                    self.apply_intent(intent);
                }
                Cmd::None
            }

            AppMsg::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
                tracing::trace!(target: "gita.shell", width, height, "Resize");
                Cmd::None
            }

            AppMsg::ScreenEvent(event) => self.handle_event(event),
        }
    }

    fn handle_event(&mut self, event: Event) -> Cmd<AppMsg> {
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            kind: KeyEventKind::Press,
        }) = &event
            && modifiers.contains(Modifiers::CTRL)
        {
            return Cmd::Quit;
        }

        let Some(session) = self.controller.session().cloned() else {
            self.handle_auth_event(&event);
            return Cmd::None;
        };

        let current = self.current_screen();
        if let Event::Mouse(mouse) = &event
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
        {
            // Overlays and modals sit above the bottom bar.
            if self.help_visible || self.profile_menu_open || self.screens.has_modal(current) {
                return Cmd::None;
            }
            let area = Rect::from_size(self.terminal_width, self.terminal_height);
            let nav = chrome::shell_layout(area).nav;
            if let Some(target) = chrome::nav_target_at(nav, mouse.x, mouse.y) {
                return self.handle_msg(AppMsg::Navigate(target));
            }
        }

        if let Event::Key(key) = &event
            && key.kind != KeyEventKind::Release
        {
            if self.help_visible {
                if matches!(key.code, KeyCode::Char('?') | KeyCode::Escape) {
                    self.help_visible = false;
                }
                return Cmd::None;
            }

            if self.profile_menu_open {
                match key.code {
                    KeyCode::Char('l') => return self.handle_msg(AppMsg::Logout),
                    KeyCode::Escape | KeyCode::Char('p') => self.profile_menu_open = false,
                    _ => {}
                }
                return Cmd::None;
            }

            if !self.screens.has_modal(current) {
                if key.code == KeyCode::Escape {
                    if let Some(parent) = current.parent() {
                        self.navigate(parent);
                    }
                    return Cmd::None;
                }

                let plain = !key.modifiers.contains(Modifiers::CTRL)
                    && !key.modifiers.contains(Modifiers::ALT);
                if plain && !self.screens.captures_text(current) {
                    match key.code {
                        KeyCode::Char('q') => return Cmd::Quit,
                        KeyCode::Char('?') => return self.handle_msg(AppMsg::ToggleHelp),
                        KeyCode::Char('p') => {
                            self.profile_menu_open = true;
                            return Cmd::None;
                        }
                        KeyCode::Char(ch) => {
                            if let Some(target) = ScreenId::from_nav_key(ch) {
                                return self.handle_msg(AppMsg::Navigate(target));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        let intent = self.screens.update(current, &event, &session);
        self.apply_intent(intent);
        Cmd::None
    }

    fn handle_auth_event(&mut self, event: &Event) {
        match self.auth.update(event) {
            AuthAction::None => {}
            AuthAction::Submit(credentials) => {
                match self.controller.submit_credentials(&credentials) {
                    Ok(_) => self.session_started(),
                    Err(err) => self.auth.set_error(err),
                }
            }
            AuthAction::Guest => {
                self.controller.continue_as_guest();
                self.session_started();
            }
        }
    }

    fn session_started(&mut self) {
        self.auth = AuthView::default();
        self.screens.reset_all();
        if let Some(target) = self.start_screen.take() {
            self.controller.navigate(target);
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Stay => {}
            Intent::Navigate(target) => self.navigate(target),
            Intent::Logout => self.logout(),
        }
    }

    /// Switch screens, dropping the state of the screen being left.
    fn navigate(&mut self, target: ScreenId) {
        let from = self.current_screen();
        if from != target {
            self.screens.reset(from);
        }
        self.profile_menu_open = false;
        self.help_visible = false;
        self.controller.navigate(target);
    }

    fn logout(&mut self) {
        self.screens.reset_all();
        self.controller.logout();
        self.auth = AuthView::default();
        self.help_visible = false;
        self.profile_menu_open = false;
    }
}

impl Model for AppModel {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        tracing::info!(
            target: "gita.shell",
            guest = self.controller.session().is_some(),
            exit_after_ms = self.exit_after_ms,
            "Shell started"
        );
        if self.exit_after_ms > 0 {
            let ms = self.exit_after_ms;
            Cmd::task(move || {
                std::thread::sleep(Duration::from_millis(ms));
                AppMsg::Quit
            })
        } else {
            Cmd::None
        }
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        self.handle_msg(msg)
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::from_size(frame.buffer.width(), frame.buffer.height());
        frame
            .buffer
            .fill(area, RenderCell::default().with_bg(theme::bg::DEEP));

        let view = self.controller.current_view();
        let Some(session) = view.session else {
            self.auth.view(frame, area);
            return;
        };

        let layout = chrome::shell_layout(area);
        frame
            .buffer
            .fill(layout.column, RenderCell::default().with_bg(theme::bg::COLUMN));

        let header = chrome::HeaderState {
            screen: view.screen,
            session,
            menu_open: self.profile_menu_open,
        };
        chrome::render_header(&header, frame, layout.header);
        self.screens.view(view.screen, frame, layout.content, session);
        chrome::render_bottom_nav(view.screen, frame, layout.nav);

        if self.profile_menu_open {
            chrome::render_profile_menu(session, frame, layout.content);
        }
        if self.help_visible {
            let bindings = self.screens.keybindings(view.screen);
            chrome::render_help_overlay(view.screen, &bindings, frame, layout.column);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![Box::new(Every::new(TICK_INTERVAL, || AppMsg::Tick))]
    }
}
