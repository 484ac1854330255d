#![forbid(unsafe_code)]

//! Home screen: one card per section of the app.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use gita_core::{Intent, ScreenId, Session};

use super::{HelpEntry, ListCursor, Screen, pressed_code, screen_meta};
use crate::chrome;
use crate::theme;

/// A navigation card on the home screen.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub icon: &'static str,
    pub title: &'static str,
    pub target: ScreenId,
}

pub const CARDS: &[Card] = &[
    Card {
        icon: "📖",
        title: "Bhagavad Gita",
        target: ScreenId::Scripture,
    },
    Card {
        icon: "✨",
        title: "AI Buddy",
        target: ScreenId::Assistant,
    },
    Card {
        icon: "🎓",
        title: "Courses",
        target: ScreenId::Courses,
    },
    Card {
        icon: "🏆",
        title: "Quizzes",
        target: ScreenId::Quizzes,
    },
    Card {
        icon: "🎬",
        title: "Videos",
        target: ScreenId::Videos,
    },
    Card {
        icon: "👥",
        title: "Community Forums",
        target: ScreenId::Community,
    },
    Card {
        icon: "💡",
        title: "Curated Content",
        target: ScreenId::PersonalizedVideo,
    },
];

/// Rows a card takes: title, blurb, spacer.
const CARD_ROWS: u16 = 3;

#[derive(Debug, Default)]
pub struct Home {
    cursor: ListCursor,
}

impl Home {
    pub fn selected_card(&self) -> &'static Card {
        &CARDS[self.cursor.selected()]
    }
}

impl Screen for Home {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        if self.cursor.handle_key(code, CARDS.len()) {
            return Intent::Stay;
        }
        match code {
            KeyCode::Enter => Intent::Navigate(self.selected_card().target),
            _ => Intent::Stay,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.is_empty() {
            return;
        }
        let visible = usize::from((area.height.saturating_sub(1) / CARD_ROWS).max(1));
        let first = self.cursor.selected().saturating_sub(visible - 1);

        for (slot, (idx, card)) in CARDS.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = slot as u16 * CARD_ROWS;
            let selected = idx == self.cursor.selected();
            let (marker, title_style) = if selected {
                (theme::selection::INDICATOR, theme::selected())
            } else {
                (theme::selection::EMPTY, theme::title())
            };
            chrome::render_line(
                frame,
                chrome::row(area, y),
                Line::from_spans([
                    Span::styled(marker, theme::accent()),
                    Span::styled(format!("{} {}", card.icon, card.title), title_style),
                ]),
            );
            chrome::render_text(
                frame,
                chrome::row(area, y + 1),
                &format!("    {}", screen_meta(card.target).blurb),
                theme::muted(),
            );
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("↑↓", "choose"), ("Enter", "open")],
        );
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("↑/↓", "Select a card"),
            HelpEntry::new("Enter", "Open the selected section"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    #[test]
    fn seven_cards_cover_every_section() {
        let targets: Vec<ScreenId> = CARDS.iter().map(|c| c.target).collect();
        assert_eq!(targets.len(), 7);
        for id in ScreenId::ALL {
            if !matches!(id, ScreenId::Home | ScreenId::Profile) {
                assert!(targets.contains(id), "no card for {id:?}");
            }
        }
    }

    #[test]
    fn enter_navigates_to_selected_card() {
        let mut home = Home::default();
        let session = guest();
        assert_eq!(
            home.update(&press(KeyCode::Enter), &session),
            Intent::Navigate(ScreenId::Scripture)
        );
        home.update(&press(KeyCode::Down), &session);
        assert_eq!(
            home.update(&press(KeyCode::Enter), &session),
            Intent::Navigate(ScreenId::Assistant)
        );
        home.update(&press(KeyCode::End), &session);
        assert_eq!(
            home.update(&press(KeyCode::Enter), &session),
            Intent::Navigate(ScreenId::PersonalizedVideo)
        );
    }

    #[test]
    fn renders_cards_and_blurbs() {
        let text = screen_text(&Home::default(), 60, 24);
        assert!(text.contains("Bhagavad Gita"));
        assert!(text.contains("Your AI companion for spiritual guidance"));
    }

    #[test]
    fn selection_scrolls_into_view_on_short_area() {
        let mut home = Home::default();
        let session = guest();
        home.update(&press(KeyCode::End), &session);
        let text = screen_text(&home, 60, 7);
        assert!(text.contains("Curated Content"), "{text}");
    }
}
