#![forbid(unsafe_code)]

//! Bhagavad Gita chapter browser.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span, Text, WrapMode};
use ftui_widgets::Widget;
use ftui_widgets::paragraph::Paragraph;
use gita_core::{Intent, Session};

use super::{HelpEntry, ListCursor, Screen, pressed_code};
use crate::chrome;
use crate::theme;

#[derive(Debug, Clone, Copy)]
pub struct Chapter {
    pub number: u8,
    pub title: &'static str,
    pub verses: u16,
    pub completed: bool,
}

pub const CHAPTERS: &[Chapter] = &[
    Chapter {
        number: 1,
        title: "Arjuna Vishada Yoga",
        verses: 47,
        completed: false,
    },
    Chapter {
        number: 2,
        title: "Sankhya Yoga",
        verses: 72,
        completed: true,
    },
    Chapter {
        number: 3,
        title: "Karma Yoga",
        verses: 43,
        completed: true,
    },
    Chapter {
        number: 4,
        title: "Jnana Karma Sanyasa Yoga",
        verses: 42,
        completed: false,
    },
    Chapter {
        number: 5,
        title: "Karma Sanyasa Yoga",
        verses: 29,
        completed: false,
    },
    Chapter {
        number: 6,
        title: "Dhyana Yoga",
        verses: 47,
        completed: false,
    },
    Chapter {
        number: 7,
        title: "Jnana Vijnana Yoga",
        verses: 30,
        completed: false,
    },
    Chapter {
        number: 8,
        title: "Aksara Brahma Yoga",
        verses: 28,
        completed: false,
    },
];

const TEACHING: &str = "In this chapter, Lord Krishna teaches Arjuna about the eternal \
nature of the soul and the principles of dharma.";
const KEY_VERSE: &str = "\"You have the right to perform your duty, but you are not \
entitled to the fruits of your actions.\"";

#[derive(Debug, Default)]
pub struct Scripture {
    cursor: ListCursor,
    /// Index into [`CHAPTERS`] of the chapter shown in the modal.
    open: Option<usize>,
}

impl Scripture {
    pub fn open_chapter(&self) -> Option<&'static Chapter> {
        self.open.map(|idx| &CHAPTERS[idx])
    }

    fn render_modal(&self, chapter: &Chapter, frame: &mut Frame, area: Rect) {
        let title = format!(" Chapter {} ", chapter.number);
        let inner = chrome::render_modal(frame, area, &title, 52, 14);
        if inner.is_empty() {
            return;
        }
        chrome::render_text(frame, chrome::row(inner, 0), chapter.title, theme::title());
        chrome::render_text(
            frame,
            chrome::row(inner, 1),
            &format!("{} verses", chapter.verses),
            theme::muted(),
        );
        let body = Text::from_lines([
            Line::styled(TEACHING, theme::body()),
            Line::raw(""),
            Line::styled(KEY_VERSE, theme::subtitle()),
        ]);
        let body_area = Rect::new(
            inner.x,
            inner.y + 3,
            inner.width,
            inner.height.saturating_sub(5),
        );
        Paragraph::new(body).wrap(WrapMode::Word).render(body_area, frame);

        let (badge, action) = if chapter.completed {
            ("✓ Completed", "Review Chapter")
        } else {
            ("", "Start Reading")
        };
        let last = chrome::row(inner, inner.height - 1);
        if chapter.completed {
            chrome::render_text(frame, chrome::row(inner, inner.height.saturating_sub(2)), badge, theme::success());
        }
        chrome::render_hints(frame, last, &[("Enter", action), ("Esc", "close")]);
    }
}

impl Screen for Scripture {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        if self.open.is_some() {
            if matches!(code, KeyCode::Escape | KeyCode::Enter) {
                self.open = None;
            }
            return Intent::Stay;
        }
        if self.cursor.handle_key(code, CHAPTERS.len()) {
            return Intent::Stay;
        }
        match code {
            KeyCode::Enter => self.open = Some(self.cursor.selected()),
            KeyCode::Char('s') => {
                self.cursor.select(0, CHAPTERS.len());
                self.open = Some(0);
            }
            _ => {}
        }
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.is_empty() {
            return;
        }
        chrome::render_text(
            frame,
            chrome::row(area, 0),
            "Chapters",
            theme::accent(),
        );
        let list_height = area.height.saturating_sub(3);
        let visible = usize::from(list_height.max(1));
        let first = self.cursor.selected().saturating_sub(visible - 1);
        for (slot, (idx, ch)) in CHAPTERS.iter().enumerate().skip(first).take(visible).enumerate() {
            let selected = idx == self.cursor.selected();
            let marker = if selected {
                theme::selection::INDICATOR
            } else {
                theme::selection::EMPTY
            };
            let style = if selected {
                theme::selected()
            } else {
                theme::body()
            };
            let status = if ch.completed {
                Span::styled("  ✓", theme::success())
            } else {
                Span::styled("", theme::muted())
            };
            chrome::render_line(
                frame,
                chrome::row(area, 1 + slot as u16),
                Line::from_spans([
                    Span::styled(marker, theme::accent()),
                    Span::styled(format!("{:>2}. {}", ch.number, ch.title), style),
                    Span::styled(format!("  {} verses", ch.verses), theme::muted()),
                    status,
                ]),
            );
        }
        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("Enter", "open"), ("s", "Start Reading")],
        );

        if let Some(chapter) = self.open_chapter() {
            self.render_modal(chapter, frame, area);
        }
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("↑/↓", "Select a chapter"),
            HelpEntry::new("Enter", "Open chapter details"),
            HelpEntry::new("s", "Start reading from chapter 1"),
            HelpEntry::new("Esc", "Close the chapter"),
        ]
    }

    fn has_modal(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    #[test]
    fn eight_chapters_with_two_completed() {
        assert_eq!(CHAPTERS.len(), 8);
        let done: Vec<u8> = CHAPTERS
            .iter()
            .filter(|c| c.completed)
            .map(|c| c.number)
            .collect();
        assert_eq!(done, vec![2, 3]);
    }

    #[test]
    fn enter_opens_and_escape_clears_selection() {
        let mut screen = Scripture::default();
        let session = guest();
        screen.update(&press(KeyCode::Down), &session);
        screen.update(&press(KeyCode::Enter), &session);
        assert_eq!(screen.open_chapter().map(|c| c.number), Some(2));
        assert!(screen.has_modal());
        assert!(screen_text(&screen, 60, 24).contains("Chapter 2"));

        screen.update(&press(KeyCode::Escape), &session);
        assert!(screen.open_chapter().is_none());
        assert!(!screen.has_modal());
    }

    #[test]
    fn start_reading_opens_first_chapter() {
        let mut screen = Scripture::default();
        let session = guest();
        screen.update(&press(KeyCode::End), &session);
        screen.update(&press(KeyCode::Char('s')), &session);
        assert_eq!(screen.open_chapter().map(|c| c.number), Some(1));
        let text = screen_text(&screen, 60, 24);
        assert!(text.contains("Start Reading"));
    }

    #[test]
    fn completed_chapter_offers_review() {
        let mut screen = Scripture::default();
        let session = guest();
        screen.update(&press(KeyCode::Down), &session);
        screen.update(&press(KeyCode::Enter), &session);
        assert!(screen_text(&screen, 60, 24).contains("Review Chapter"));
    }

    #[test]
    fn list_shows_verse_counts() {
        let text = screen_text(&Scripture::default(), 60, 24);
        assert!(text.contains("Arjuna Vishada Yoga"));
        assert!(text.contains("72 verses"));
    }
}
