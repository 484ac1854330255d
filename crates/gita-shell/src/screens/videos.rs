#![forbid(unsafe_code)]

//! Video library. Choosing a video hands over to the AI video player.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use gita_core::{Intent, ScreenId, Session};

use super::{HelpEntry, ListCursor, Screen, pressed_code};
use crate::chrome;
use crate::theme;

#[derive(Debug, Clone, Copy)]
pub struct Video {
    pub title: &'static str,
    pub duration: &'static str,
    pub views: &'static str,
}

pub const VIDEOS: &[Video] = &[
    Video {
        title: "Introduction to Bhagavad Gita",
        duration: "15:30",
        views: "12.5k",
    },
    Video {
        title: "Life of Krishna - Early Years",
        duration: "22:45",
        views: "18.2k",
    },
    Video {
        title: "Understanding Karma Yoga",
        duration: "18:20",
        views: "9.8k",
    },
    Video {
        title: "Daily Meditation Practice",
        duration: "12:15",
        views: "15.3k",
    },
    Video {
        title: "Temple Tour - Radha Govind Dham",
        duration: "25:00",
        views: "22.1k",
    },
];

/// Ticks between choosing a video and opening the player.
pub const OPEN_DELAY_TICKS: u32 = 3;
const VIDEO_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opening {
    video: usize,
    remaining: u32,
}

#[derive(Debug, Default)]
pub struct Videos {
    cursor: ListCursor,
    opening: Option<Opening>,
}

impl Videos {
    /// Video highlighted for opening, if any.
    pub fn opening(&self) -> Option<&'static Video> {
        self.opening.map(|o| &VIDEOS[o.video])
    }
}

impl Screen for Videos {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        if self.opening.is_some() {
            return Intent::Stay;
        }
        if self.cursor.handle_key(code, VIDEOS.len()) {
            return Intent::Stay;
        }
        if code == KeyCode::Enter {
            self.opening = Some(Opening {
                video: self.cursor.selected(),
                remaining: OPEN_DELAY_TICKS,
            });
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        let Some(opening) = self.opening.as_mut() else {
            return Intent::Stay;
        };
        opening.remaining = opening.remaining.saturating_sub(1);
        if opening.remaining > 0 {
            return Intent::Stay;
        }
        tracing::debug!(
            target: "gita.shell",
            video = VIDEOS[opening.video].title,
            "Opening video"
        );
        self.opening = None;
        Intent::Navigate(ScreenId::PersonalizedVideo)
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.is_empty() {
            return;
        }
        let visible = usize::from((area.height.saturating_sub(1) / VIDEO_ROWS).max(1));
        let first = self.cursor.selected().saturating_sub(visible - 1);
        let opening = self.opening.map(|o| o.video);

        for (slot, (idx, video)) in VIDEOS.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = slot as u16 * VIDEO_ROWS;
            let selected = idx == self.cursor.selected();
            let style = if opening == Some(idx) {
                theme::nav_active()
            } else if selected {
                theme::selected()
            } else {
                theme::title()
            };
            let marker = if selected {
                theme::selection::INDICATOR
            } else {
                theme::selection::EMPTY
            };
            chrome::render_line(
                frame,
                chrome::row(area, y),
                Line::from_spans([
                    Span::styled(marker, theme::accent()),
                    Span::styled(format!("▶ {}", video.title), style),
                ]),
            );
            chrome::render_text(
                frame,
                chrome::row(area, y + 1),
                &format!("    👁 {} views · ⏱ {}", video.views, video.duration),
                theme::muted(),
            );
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("↑↓", "choose"), ("Enter", "watch")],
        );
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("↑/↓", "Select a video"),
            HelpEntry::new("Enter", "Watch with AI Video Learning"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    #[test]
    fn enter_navigates_after_delay() {
        let mut screen = Videos::default();
        screen.update(&press(KeyCode::Down), &guest());
        screen.update(&press(KeyCode::Enter), &guest());
        assert_eq!(
            screen.opening().map(|v| v.title),
            Some("Life of Krishna - Early Years")
        );
        for t in 0..u64::from(OPEN_DELAY_TICKS - 1) {
            assert_eq!(screen.tick(t), Intent::Stay);
        }
        assert_eq!(screen.tick(9), Intent::Navigate(ScreenId::PersonalizedVideo));
        assert!(screen.opening().is_none());
        assert_eq!(screen.tick(10), Intent::Stay);
    }

    #[test]
    fn keys_ignored_while_opening() {
        let mut screen = Videos::default();
        screen.update(&press(KeyCode::Enter), &guest());
        screen.update(&press(KeyCode::Down), &guest());
        assert_eq!(
            screen.opening().map(|v| v.title),
            Some("Introduction to Bhagavad Gita")
        );
    }

    #[test]
    fn list_shows_views_and_duration() {
        let text = screen_text(&Videos::default(), 64, 20);
        assert!(text.contains("Temple Tour - Radha Govind Dham"), "{text}");
        assert!(text.contains("12.5k views"));
        assert!(text.contains("25:00"));
    }
}
