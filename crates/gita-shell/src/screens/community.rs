#![forbid(unsafe_code)]

//! Community forums: category chips, posts, and the new-discussion form.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::input::TextInput;
use gita_core::{Intent, Session};

use super::{HelpEntry, ListCursor, Notice, Screen, key_press};
use crate::chrome;
use crate::theme;

#[derive(Debug, Clone, Copy)]
pub struct Post {
    pub title: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub replies: u32,
    pub likes: u32,
    pub time: &'static str,
    pub preview: &'static str,
}

pub const POSTS: &[Post] = &[
    Post {
        title: "Understanding Karma",
        category: "Q&A",
        author: "Priya S.",
        replies: 24,
        likes: 56,
        time: "2h ago",
        preview: "Can someone explain the concept of karma in simple terms? How does it affect our daily lives?",
    },
    Post {
        title: "Daily Reflections",
        category: "Discussion",
        author: "Amit K.",
        replies: 18,
        likes: 42,
        time: "5h ago",
        preview: "I've been practicing daily meditation and it has transformed my perspective...",
    },
    Post {
        title: "Inspiring stories from the Gita",
        category: "Stories",
        author: "Radha M.",
        replies: 31,
        likes: 89,
        time: "1d ago",
        preview: "The story of Arjuna and Krishna on the battlefield teaches us so much about duty and purpose.",
    },
    Post {
        title: "Service Info",
        category: "Info",
        author: "Temple Admin",
        replies: 12,
        likes: 34,
        time: "2d ago",
        preview: "Temple timings for Janmashtami celebration: Morning aarti at 5 AM, special darshan at 12 PM...",
    },
    Post {
        title: "Sharing Experiences",
        category: "Discussion",
        author: "Krishna D.",
        replies: 45,
        likes: 102,
        time: "3d ago",
        preview: "After attending the last course on Chapter 2, I feel more connected to the teachings...",
    },
];

/// Filter chips; `All` shows every post.
pub const CATEGORIES: &[&str] = &["All", "Q&A", "Discussion", "Stories", "Volunteer"];
/// Categories offered when creating a discussion.
pub const NEW_POST_CATEGORIES: &[&str] = &["Q&A", "Discussion", "Stories", "Volunteer"];
pub const CREATED_NOTICE: &str = "Discussion created successfully!";

/// Rows per post: title, meta, preview, spacer.
const POST_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Category,
    Description,
}

impl DraftField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Category => Self::Title,
            Self::Description => Self::Category,
        }
    }
}

/// The "Create new discussion" form.
#[derive(Debug, Clone)]
pub struct DiscussionDraft {
    title: TextInput,
    category: usize,
    description: TextInput,
    focus: DraftField,
}

impl Default for DiscussionDraft {
    fn default() -> Self {
        Self {
            title: TextInput::new().with_placeholder("What would you like to discuss?"),
            category: 0,
            description: TextInput::new().with_placeholder("Share your thoughts..."),
            focus: DraftField::Title,
        }
    }
}

impl DiscussionDraft {
    pub fn title(&self) -> &str {
        self.title.value()
    }

    pub fn category(&self) -> &'static str {
        NEW_POST_CATEGORIES[self.category]
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    /// Whether the form may be submitted.
    pub fn is_ready(&self) -> bool {
        !self.title.value().trim().is_empty()
    }

    fn cycle_category(&mut self, forward: bool) {
        let len = NEW_POST_CATEGORIES.len();
        self.category = if forward {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
    }
}

#[derive(Debug, Clone)]
enum Overlay {
    /// Index into [`POSTS`], never into the filtered list.
    Post(usize),
    NewDiscussion(DiscussionDraft),
}

#[derive(Debug, Default)]
pub struct Community {
    category: usize,
    cursor: ListCursor,
    overlay: Option<Overlay>,
    liked: [bool; POSTS.len()],
    notice: Notice,
}

impl Community {
    pub fn category(&self) -> &'static str {
        CATEGORIES[self.category]
    }

    /// Indices into [`POSTS`] that pass the current chip.
    pub fn visible_posts(&self) -> Vec<usize> {
        let category = self.category();
        POSTS
            .iter()
            .enumerate()
            .filter(|(_, post)| category == "All" || post.category == category)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn open_post(&self) -> Option<&'static Post> {
        match &self.overlay {
            Some(Overlay::Post(idx)) => Some(&POSTS[*idx]),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&DiscussionDraft> {
        match &self.overlay {
            Some(Overlay::NewDiscussion(draft)) => Some(draft),
            _ => None,
        }
    }

    pub fn is_liked(&self, post: usize) -> bool {
        self.liked.get(post).copied().unwrap_or(false)
    }

    /// Like count including the local like, if any.
    pub fn likes(&self, post: usize) -> u32 {
        POSTS[post].likes + u32::from(self.is_liked(post))
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.text()
    }

    fn select_category(&mut self, forward: bool) {
        let len = CATEGORIES.len();
        self.category = if forward {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
        self.cursor.clamp(self.visible_posts().len());
    }

    fn update_list(&mut self, code: KeyCode) {
        let visible = self.visible_posts();
        if self.cursor.handle_key(code, visible.len()) {
            return;
        }
        match code {
            KeyCode::Left => self.select_category(false),
            KeyCode::Right => self.select_category(true),
            KeyCode::Enter => {
                if let Some(&idx) = visible.get(self.cursor.selected()) {
                    self.overlay = Some(Overlay::Post(idx));
                }
            }
            KeyCode::Char('n') => {
                self.overlay = Some(Overlay::NewDiscussion(DiscussionDraft::default()));
            }
            _ => {}
        }
    }

    fn update_post(&mut self, post: usize, code: KeyCode) {
        match code {
            KeyCode::Char('l') => {
                if let Some(liked) = self.liked.get_mut(post) {
                    *liked = !*liked;
                }
            }
            KeyCode::Escape | KeyCode::Enter => self.overlay = None,
            _ => {}
        }
    }

    fn update_draft(&mut self, event: &Event, code: KeyCode) {
        let Some(Overlay::NewDiscussion(draft)) = self.overlay.as_mut() else {
            return;
        };
        match code {
            KeyCode::Escape => self.overlay = None,
            KeyCode::Enter => {
                if draft.is_ready() {
                    tracing::info!(
                        target: "gita.shell",
                        category = draft.category(),
                        "Discussion created"
                    );
                    self.overlay = None;
                    self.notice.show(CREATED_NOTICE);
                }
            }
            KeyCode::Tab | KeyCode::Down => draft.focus = draft.focus.next(),
            KeyCode::BackTab | KeyCode::Up => draft.focus = draft.focus.prev(),
            _ => match draft.focus {
                DraftField::Title => {
                    draft.title.handle_event(event);
                }
                DraftField::Description => {
                    draft.description.handle_event(event);
                }
                DraftField::Category => match code {
                    KeyCode::Left => draft.cycle_category(false),
                    KeyCode::Right | KeyCode::Char(' ') => draft.cycle_category(true),
                    _ => {}
                },
            },
        }
    }

    fn render_post(&self, idx: usize, frame: &mut Frame, area: Rect) {
        let post = &POSTS[idx];
        let title = format!(" {} ", post.category);
        let inner = chrome::render_modal(frame, area, &title, 54, 13);
        if inner.height < 4 {
            return;
        }
        chrome::render_text(frame, chrome::row(inner, 0), post.title, theme::title());
        chrome::render_text(
            frame,
            chrome::row(inner, 1),
            &format!("by {} • {}", post.author, post.time),
            theme::muted(),
        );
        let mut y = 3;
        for line in theme::wrap_words(post.preview, usize::from(inner.width)) {
            chrome::render_text(frame, chrome::row(inner, y), &line, theme::body());
            y += 1;
        }
        let like_style = if self.is_liked(idx) {
            theme::accent()
        } else {
            theme::muted()
        };
        chrome::render_line(
            frame,
            chrome::row(inner, y + 1),
            Line::from_spans([
                Span::styled(format!("💬 {} replies   ", post.replies), theme::muted()),
                Span::styled(format!("👍 {} likes", self.likes(idx)), like_style),
            ]),
        );
        let like_label = if self.is_liked(idx) { "Unlike" } else { "Like" };
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("l", like_label), ("Esc", "close")],
        );
    }

    fn render_draft(draft: &DiscussionDraft, frame: &mut Frame, area: Rect) {
        let inner = chrome::render_modal(frame, area, " Create new discussion ", 54, 13);
        if inner.height < 9 {
            return;
        }
        let label_style = |field: DraftField| {
            if draft.focus == field {
                theme::key_hint()
            } else {
                theme::body()
            }
        };
        let input_style = |field: DraftField| {
            if draft.focus == field {
                theme::input_focused()
            } else {
                theme::input()
            }
        };

        chrome::render_text(
            frame,
            chrome::row(inner, 0),
            "Discussion Title",
            label_style(DraftField::Title),
        );
        draft
            .title
            .clone()
            .with_focused(draft.focus == DraftField::Title)
            .with_style(input_style(DraftField::Title))
            .with_placeholder_style(theme::placeholder())
            .render(chrome::row(inner, 1), frame);

        chrome::render_text(
            frame,
            chrome::row(inner, 3),
            "Category",
            label_style(DraftField::Category),
        );
        chrome::render_text(
            frame,
            chrome::row(inner, 4),
            &format!("‹ {} ›", draft.category()),
            input_style(DraftField::Category),
        );

        chrome::render_text(
            frame,
            chrome::row(inner, 6),
            "Description",
            label_style(DraftField::Description),
        );
        draft
            .description
            .clone()
            .with_focused(draft.focus == DraftField::Description)
            .with_style(input_style(DraftField::Description))
            .with_placeholder_style(theme::placeholder())
            .render(chrome::row(inner, 7), frame);

        let submit = if draft.is_ready() {
            "Create Discussion"
        } else {
            "Create Discussion (title required)"
        };
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("Enter", submit), ("Esc", "cancel")],
        );
    }
}

impl Screen for Community {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(key) = key_press(event) else {
            return Intent::Stay;
        };
        let code = key.code;
        match self.overlay {
            None => self.update_list(code),
            Some(Overlay::Post(idx)) => self.update_post(idx, code),
            Some(Overlay::NewDiscussion(_)) => self.update_draft(event, code),
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        self.notice.tick();
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.height < 3 {
            return;
        }
        let chips: Vec<Span> = CATEGORIES
            .iter()
            .enumerate()
            .flat_map(|(idx, name)| {
                let style = if idx == self.category {
                    theme::nav_active()
                } else {
                    theme::muted()
                };
                [
                    Span::styled(format!(" {name} "), style),
                    Span::styled(" ", theme::muted()),
                ]
            })
            .collect();
        chrome::render_line(frame, chrome::row(area, 0), Line::from_spans(chips));

        let visible = self.visible_posts();
        if visible.is_empty() {
            chrome::render_text(
                frame,
                chrome::row(area, 2),
                "No discussions in this category yet.",
                theme::muted(),
            );
        }
        let list_height = area.height.saturating_sub(4);
        let rows = usize::from((list_height / POST_ROWS).max(1));
        let first = self.cursor.selected().saturating_sub(rows - 1);
        for (slot, (pos, &idx)) in visible.iter().enumerate().skip(first).take(rows).enumerate() {
            let post = &POSTS[idx];
            let y = 2 + slot as u16 * POST_ROWS;
            let selected = pos == self.cursor.selected();
            let (marker, style) = if selected {
                (theme::selection::INDICATOR, theme::selected())
            } else {
                (theme::selection::EMPTY, theme::title())
            };
            chrome::render_line(
                frame,
                chrome::row(area, y),
                Line::from_spans([
                    Span::styled(marker, theme::accent()),
                    Span::styled(post.title, style),
                    Span::styled(format!("  [{}]", post.category), theme::key_hint()),
                ]),
            );
            chrome::render_text(
                frame,
                chrome::row(area, y + 1),
                &format!(
                    "  {} · {} · {} replies · {} likes",
                    post.author,
                    post.time,
                    post.replies,
                    self.likes(idx)
                ),
                theme::muted(),
            );
            chrome::render_text(
                frame,
                chrome::row(area, y + 2),
                &format!("  {}", post.preview),
                theme::body(),
            );
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("←→", "category"), ("Enter", "open"), ("n", "Start New Discussion")],
        );
        match &self.overlay {
            Some(Overlay::Post(idx)) => self.render_post(*idx, frame, area),
            Some(Overlay::NewDiscussion(draft)) => Self::render_draft(draft, frame, area),
            None => {}
        }
        chrome::render_notice(&self.notice, frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("←/→", "Switch category"),
            HelpEntry::new("↑/↓", "Select a discussion"),
            HelpEntry::new("Enter", "Open discussion / submit form"),
            HelpEntry::new("l", "Like the open discussion"),
            HelpEntry::new("n", "Start a new discussion"),
            HelpEntry::new("Tab", "Next form field"),
            HelpEntry::new("Esc", "Close"),
        ]
    }

    fn captures_text(&self) -> bool {
        matches!(self.overlay, Some(Overlay::NewDiscussion(_)))
    }

    fn has_modal(&self) -> bool {
        self.overlay.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    fn key(screen: &mut Community, code: KeyCode) {
        screen.update(&press(code), &guest());
    }

    fn type_text(screen: &mut Community, text: &str) {
        for ch in text.chars() {
            key(screen, KeyCode::Char(ch));
        }
    }

    #[test]
    fn all_chip_lists_every_post() {
        let screen = Community::default();
        assert_eq!(screen.category(), "All");
        assert_eq!(screen.visible_posts().len(), POSTS.len());
    }

    #[test]
    fn filtered_selection_opens_the_right_post() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Right);
        key(&mut screen, KeyCode::Right);
        assert_eq!(screen.category(), "Discussion");
        assert_eq!(screen.visible_posts(), vec![1, 4]);
        key(&mut screen, KeyCode::Down);
        key(&mut screen, KeyCode::Enter);
        assert_eq!(screen.open_post().map(|p| p.title), Some("Sharing Experiences"));
    }

    #[test]
    fn empty_category_ignores_enter() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Left);
        assert_eq!(screen.category(), "Volunteer");
        assert!(screen.visible_posts().is_empty());
        key(&mut screen, KeyCode::Enter);
        assert!(!screen.has_modal());
        assert!(screen_text(&screen, 64, 20).contains("No discussions"));
    }

    #[test]
    fn switching_chip_clamps_cursor() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::End);
        key(&mut screen, KeyCode::Right);
        assert_eq!(screen.category(), "Q&A");
        key(&mut screen, KeyCode::Enter);
        assert_eq!(screen.open_post().map(|p| p.title), Some("Understanding Karma"));
    }

    #[test]
    fn like_toggles_local_count() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Enter);
        key(&mut screen, KeyCode::Char('l'));
        assert!(screen.is_liked(0));
        assert_eq!(screen.likes(0), 57);
        key(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.likes(0), 56);
        key(&mut screen, KeyCode::Escape);
        assert!(!screen.has_modal());
    }

    #[test]
    fn new_discussion_requires_title() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Char('n'));
        assert!(screen.captures_text());
        type_text(&mut screen, "   ");
        key(&mut screen, KeyCode::Enter);
        assert!(screen.draft().is_some(), "blank title must not submit");
        assert_eq!(screen.notice(), None);

        type_text(&mut screen, "Kirtan schedule");
        key(&mut screen, KeyCode::Enter);
        assert!(screen.draft().is_none());
        assert!(!screen.captures_text());
        assert_eq!(screen.notice(), Some(CREATED_NOTICE));
    }

    #[test]
    fn draft_category_cycles_when_focused() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Char('n'));
        key(&mut screen, KeyCode::Tab);
        assert_eq!(screen.draft().map(DiscussionDraft::focus), Some(DraftField::Category));
        key(&mut screen, KeyCode::Right);
        assert_eq!(screen.draft().map(DiscussionDraft::category), Some("Discussion"));
        key(&mut screen, KeyCode::Left);
        key(&mut screen, KeyCode::Left);
        assert_eq!(screen.draft().map(DiscussionDraft::category), Some("Volunteer"));
    }

    #[test]
    fn escape_discards_draft() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Char('n'));
        type_text(&mut screen, "draft");
        key(&mut screen, KeyCode::Escape);
        assert!(screen.draft().is_none());
        key(&mut screen, KeyCode::Char('n'));
        assert_eq!(screen.draft().map(DiscussionDraft::title), Some(""));
    }

    #[test]
    fn modal_renders_author_line() {
        let mut screen = Community::default();
        key(&mut screen, KeyCode::Down);
        key(&mut screen, KeyCode::Enter);
        let text = screen_text(&screen, 64, 24);
        assert!(text.contains("by Amit K."), "{text}");
    }
}
