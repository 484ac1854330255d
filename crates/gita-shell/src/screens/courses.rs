#![forbid(unsafe_code)]

//! Course catalogue with progress and a detail modal.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use gita_core::{Intent, Session};

use super::{HelpEntry, ListCursor, Notice, Screen, pressed_code};
use crate::chrome;
use crate::theme;

#[derive(Debug, Clone, Copy)]
pub struct Course {
    pub icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub duration: &'static str,
    pub lessons: u8,
    /// Percent complete, 0..=100.
    pub progress: u8,
}

impl Course {
    pub fn is_started(&self) -> bool {
        self.progress > 0
    }

    pub fn is_completed(&self) -> bool {
        self.progress >= 100
    }

    /// Label of the modal's primary action.
    pub fn action_label(&self) -> &'static str {
        if self.is_started() {
            "Continue Course"
        } else {
            "Start Course"
        }
    }
}

pub const COURSES: &[Course] = &[
    Course {
        icon: "📖",
        title: "Bhagavad Gita - Introduction",
        subtitle: "Understanding the context",
        duration: "2 hours",
        lessons: 8,
        progress: 75,
    },
    Course {
        icon: "📖",
        title: "Bhagavad Gita - Chapter 2",
        subtitle: "Reflections on Chapter 2",
        duration: "3 hours",
        lessons: 12,
        progress: 40,
    },
    Course {
        icon: "🧘",
        title: "Daily Reflections",
        subtitle: "Daily inspiration",
        duration: "1 hour",
        lessons: 5,
        progress: 100,
    },
    Course {
        icon: "📚",
        title: "Ramayana Stories",
        subtitle: "Epic tales of Lord Rama",
        duration: "4 hours",
        lessons: 15,
        progress: 0,
    },
    Course {
        icon: "🎉",
        title: "Festival Prep",
        subtitle: "Janmashtami and more",
        duration: "2 hours",
        lessons: 6,
        progress: 0,
    },
];

const COURSE_BLURB: &str = "This course will guide you through fundamental concepts and \
provide deep insights into spiritual teachings.";
pub const CERTIFICATE_NOTICE: &str = "View your certificates";

/// Rows per course entry: title, subtitle, details, spacer.
const COURSE_ROWS: u16 = 4;

#[derive(Debug, Default)]
pub struct Courses {
    cursor: ListCursor,
    open: Option<usize>,
    notice: Notice,
}

impl Courses {
    pub fn open_course(&self) -> Option<&'static Course> {
        self.open.map(|idx| &COURSES[idx])
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.text()
    }

    fn render_modal(&self, course: &Course, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", course.title);
        let inner = chrome::render_modal(frame, area, &title, 54, 13);
        if inner.height < 4 {
            return;
        }
        chrome::render_text(
            frame,
            chrome::row(inner, 0),
            &format!("{} {}", course.icon, course.subtitle),
            theme::subtitle(),
        );
        chrome::render_text(
            frame,
            chrome::row(inner, 1),
            &format!("{} · {} lessons", course.duration, course.lessons),
            theme::muted(),
        );
        let mut y = 3;
        if course.is_started() {
            let bar_width = usize::from(inner.width.saturating_sub(20).max(4));
            chrome::render_line(
                frame,
                chrome::row(inner, y),
                Line::from_spans([
                    Span::styled("Your Progress ", theme::body()),
                    Span::styled(theme::progress_bar(course.progress, bar_width), theme::accent()),
                    Span::styled(format!(" {}%", course.progress), theme::accent()),
                ]),
            );
            y += 2;
        }
        for line in theme::wrap_words(COURSE_BLURB, usize::from(inner.width)) {
            chrome::render_text(frame, chrome::row(inner, y), &line, theme::body());
            y += 1;
        }
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("Enter", course.action_label()), ("Esc", "close")],
        );
    }
}

impl Screen for Courses {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        if let Some(idx) = self.open {
            match code {
                KeyCode::Enter => {
                    self.open = None;
                    self.notice.show(format!("Starting: {}", COURSES[idx].title));
                }
                KeyCode::Escape => self.open = None,
                _ => {}
            }
            return Intent::Stay;
        }
        if self.cursor.handle_key(code, COURSES.len()) {
            return Intent::Stay;
        }
        match code {
            KeyCode::Enter => self.open = Some(self.cursor.selected()),
            KeyCode::Char('c') => self.notice.show(CERTIFICATE_NOTICE),
            _ => {}
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        self.notice.tick();
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.height < 2 {
            return;
        }
        chrome::render_text(
            frame,
            chrome::row(area, 0),
            &format!("{} courses available", COURSES.len()),
            theme::muted(),
        );
        let list_height = area.height.saturating_sub(3);
        let visible = usize::from((list_height / COURSE_ROWS).max(1));
        let first = self.cursor.selected().saturating_sub(visible - 1);
        let bar_width = usize::from(area.width.saturating_sub(40).clamp(4, 20));

        for (slot, (idx, course)) in COURSES.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = 1 + slot as u16 * COURSE_ROWS;
            let selected = idx == self.cursor.selected();
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
                    Span::styled(format!("{} {}", course.icon, course.title), style),
                ]),
            );
            chrome::render_text(
                frame,
                chrome::row(area, y + 1),
                &format!("     {}", course.subtitle),
                theme::muted(),
            );
            let mut details = vec![Span::styled(
                format!("     {} · {} lessons", course.duration, course.lessons),
                theme::muted(),
            )];
            if course.is_completed() {
                details.push(Span::styled("  ✓ Completed", theme::success()));
            } else if course.is_started() {
                details.push(Span::styled("  ", theme::muted()));
                details.push(Span::styled(
                    theme::progress_bar(course.progress, bar_width),
                    theme::accent(),
                ));
                details.push(Span::styled(format!(" {}%", course.progress), theme::muted()));
            }
            chrome::render_line(frame, chrome::row(area, y + 2), Line::from_spans(details));
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("Enter", "details"), ("c", "Earn Certificate")],
        );
        if let Some(course) = self.open_course() {
            self.render_modal(course, frame, area);
        }
        chrome::render_notice(&self.notice, frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("↑/↓", "Select a course"),
            HelpEntry::new("Enter", "Course details / start"),
            HelpEntry::new("c", "Earn Certificate"),
            HelpEntry::new("Esc", "Close the course"),
        ]
    }

    fn has_modal(&self) -> bool {
        self.open.is_some()
    }
}
