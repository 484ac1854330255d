#![forbid(unsafe_code)]

//! Screen modules for the shell.
//!
//! Each authenticated screen implements the [`Screen`] trait. The auth view
//! lives here too but is driven directly by the app, since it runs before a
//! session exists.

pub mod assistant;
pub mod auth;
pub mod community;
pub mod courses;
pub mod home;
pub mod personalized_video;
pub mod profile;
pub mod quizzes;
pub mod scripture;
pub mod videos;

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use gita_core::{Intent, ScreenId, Session};

/// Registry metadata describing a screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenMeta {
    pub id: ScreenId,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Label used in the bottom navigation bar.
    pub short_label: &'static str,
    /// One-line description for home cards and the help overlay.
    pub blurb: &'static str,
}

/// Screen Registry: single source of truth for screen ordering + metadata.
pub const SCREEN_REGISTRY: &[ScreenMeta] = &[
    ScreenMeta {
        id: ScreenId::Home,
        title: "Radha Govind Dham",
        subtitle: "Gita For Your Life",
        short_label: "Home",
        blurb: "Start here",
    },
    ScreenMeta {
        id: ScreenId::Scripture,
        title: "Bhagavad Gita",
        subtitle: "18 Chapters • 700 Verses",
        short_label: "Gita",
        blurb: "Introduction to Hinduism • Life of Krishna • Daily Practices",
    },
    ScreenMeta {
        id: ScreenId::Assistant,
        title: "AI Buddy",
        subtitle: "Your spiritual companion",
        short_label: "Buddy",
        blurb: "Your AI companion for spiritual guidance",
    },
    ScreenMeta {
        id: ScreenId::Courses,
        title: "Courses",
        subtitle: "Structured learning paths",
        short_label: "Courses",
        blurb: "Structured learning paths",
    },
    ScreenMeta {
        id: ScreenId::Community,
        title: "Community",
        subtitle: "Connect with fellow seekers",
        short_label: "Community",
        blurb: "Connect with fellow seekers",
    },
    ScreenMeta {
        id: ScreenId::Quizzes,
        title: "Quizzes",
        subtitle: "Test your knowledge",
        short_label: "Quizzes",
        blurb: "Test your knowledge",
    },
    ScreenMeta {
        id: ScreenId::Videos,
        title: "Video Library",
        subtitle: "Watch spiritual teachings",
        short_label: "Videos",
        blurb: "Watch spiritual teachings",
    },
    ScreenMeta {
        id: ScreenId::PersonalizedVideo,
        title: "AI Video Learning",
        subtitle: "Personalized content",
        short_label: "AI Video",
        blurb: "Personalized recommendations",
    },
    ScreenMeta {
        id: ScreenId::Profile,
        title: "Profile",
        subtitle: "Your journey so far",
        short_label: "Profile",
        blurb: "Account, progress and settings",
    },
];

/// Lookup a screen by ID in the registry.
pub const fn screen_meta(id: ScreenId) -> &'static ScreenMeta {
    &SCREEN_REGISTRY[id.index()]
}

/// A help entry describing a keybinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    /// Key label (e.g. "Enter", "Tab").
    pub key: &'static str,
    /// Description of what the key does.
    pub action: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Trait for authenticated screens.
///
/// A screen owns its local state, reads the session it is rendered for, and
/// reports navigation or logout requests as an [`Intent`].
pub trait Screen {
    /// Handle an event routed to this screen.
    fn update(&mut self, event: &Event, session: &Session) -> Intent;

    /// Render the screen into the content area below the header.
    fn view(&self, frame: &mut Frame, area: Rect, session: &Session);

    /// Called on each application tick (100ms) while the screen is active.
    fn tick(&mut self, _tick_count: u64) -> Intent {
        Intent::Stay
    }

    /// Keybindings specific to this screen for the help overlay.
    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![]
    }

    /// Whether printable keys should reach the screen instead of the
    /// global shortcuts.
    fn captures_text(&self) -> bool {
        false
    }

    /// Whether a modal or sub-flow is open. `Esc` goes to the screen while
    /// this is true instead of triggering the back affordance.
    fn has_modal(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Key press (or repeat) with its code, ignoring releases.
pub(crate) fn key_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}

/// Code of a pressed key, or `None` for anything else.
pub(crate) fn pressed_code(event: &Event) -> Option<KeyCode> {
    key_press(event).map(|key| key.code)
}

/// Bounded selection over a list of `len` rows, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    selected: usize,
}

impl ListCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = if len == 0 { 0 } else { index.min(len - 1) };
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Apply Up/Down/Home/End. Returns true if the key was a movement key.
    pub fn handle_key(&mut self, code: KeyCode, len: usize) -> bool {
        match code {
            KeyCode::Up => self.prev(len),
            KeyCode::Down => self.next(len),
            KeyCode::Home => self.select(0, len),
            KeyCode::End => self.select(len.saturating_sub(1), len),
            _ => return false,
        }
        true
    }

    /// Keep the selection valid after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.select(self.selected, len);
    }
}

/// How long a notice stays on screen, in ticks.
pub const NOTICE_TICKS: u64 = 30;

/// One-line banner for confirmations such as "Profile updated successfully!".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    text: Option<String>,
    remaining: u64,
}

impl Notice {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.remaining = NOTICE_TICKS;
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.remaining = 0;
    }

    /// Count down one tick; the notice disappears when it reaches zero.
    pub fn tick(&mut self) {
        if self.text.is_none() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.text = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
    use ftui_core::geometry::Rect;
    use ftui_render::frame::Frame;
    use ftui_render::grapheme_pool::GraphemePool;
    use gita_core::Session;

    use super::Screen;

    pub fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        })
    }

    pub fn guest() -> Session {
        Session::guest()
    }

    /// Render a screen and return its text, one `String` per row.
    pub fn render_rows<S: Screen>(screen: &S, w: u16, h: u16) -> Vec<String> {
        let session = guest();
        let mut pool = GraphemePool::new();
        let mut frame = Frame::new(w, h, &mut pool);
        screen.view(&mut frame, Rect::new(0, 0, w, h), &session);
        (0..h)
            .map(|y| {
                (0..w)
                    .map(|x| {
                        frame
                            .buffer
                            .get(x, y)
                            .and_then(|c| c.content.as_char())
                            .unwrap_or(' ')
                    })
                    .collect()
            })
            .collect()
    }

    pub fn screen_text<S: Screen>(screen: &S, w: u16, h: u16) -> String {
        render_rows(screen, w, h).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_screen_ids() {
        assert_eq!(SCREEN_REGISTRY.len(), ScreenId::ALL.len());
        for (meta, id) in SCREEN_REGISTRY.iter().zip(ScreenId::ALL) {
            assert_eq!(meta.id, *id, "registry order mismatch");
        }
    }

    #[test]
    fn screen_meta_is_total() {
        for &id in ScreenId::ALL {
            assert_eq!(screen_meta(id).id, id);
            assert!(!screen_meta(id).title.is_empty());
        }
    }

    #[test]
    fn registry_titles_match_core_titles() {
        for meta in SCREEN_REGISTRY {
            assert_eq!(meta.title, meta.id.title(), "{:?}", meta.id);
        }
    }

    #[test]
    fn list_cursor_wraps() {
        let mut cursor = ListCursor::default();
        cursor.prev(3);
        assert_eq!(cursor.selected(), 2);
        cursor.next(3);
        assert_eq!(cursor.selected(), 0);
        assert!(cursor.handle_key(KeyCode::End, 3));
        assert_eq!(cursor.selected(), 2);
        assert!(!cursor.handle_key(KeyCode::Enter, 3));
    }

    #[test]
    fn list_cursor_clamps_to_shorter_list() {
        let mut cursor = ListCursor::default();
        cursor.select(4, 5);
        cursor.clamp(2);
        assert_eq!(cursor.selected(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn notice_expires_after_ticks() {
        let mut notice = Notice::default();
        notice.show("Saved");
        for _ in 0..NOTICE_TICKS - 1 {
            notice.tick();
        }
        assert_eq!(notice.text(), Some("Saved"));
        notice.tick();
        assert_eq!(notice.text(), None);
    }
}
