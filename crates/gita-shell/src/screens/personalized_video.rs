#![forbid(unsafe_code)]

//! AI Video Learning: a simulated player for the personalized video.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_text::{Line, Span};
use ftui_widgets::Widget;
use ftui_widgets::block::Alignment;
use ftui_widgets::paragraph::Paragraph;
use gita_core::{Intent, Session};

use super::{HelpEntry, Notice, Screen, pressed_code};
use crate::chrome;
use crate::theme;

/// Length of the generated video, in seconds (3:24).
pub const VIDEO_SECONDS: u32 = 204;
pub const START_PROGRESS: u8 = 45;
/// Generation progress shown on the readiness ring.
pub const READY_PERCENT: u8 = 75;
/// Ticks per percent of playback; 204 s / 100 is about 2 s per percent.
const TICKS_PER_PERCENT: u32 = 20;

/// Footer actions and the notices they raise.
pub const ACTIONS: &[(char, &str, &str)] = &[
    ('t', "Transcript (Hindi)", "Downloading Transcript in Hindi..."),
    ('a', "Question-answer", "Downloading Question-answer..."),
    ('c', "Create Video", "Creating personalized AI video..."),
    ('d', "Download Video", "Downloading AI Video..."),
];

#[derive(Debug)]
pub struct PersonalizedVideo {
    playing: bool,
    muted: bool,
    progress: u8,
    ticks_into_percent: u32,
    notice: Notice,
}

impl Default for PersonalizedVideo {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            progress: START_PROGRESS,
            ticks_into_percent: 0,
            notice: Notice::default(),
        }
    }
}

/// `m:ss` for a number of seconds.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

impl PersonalizedVideo {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.text()
    }

    /// Playback position in seconds.
    pub fn position(&self) -> u32 {
        VIDEO_SECONDS * u32::from(self.progress) / 100
    }

    fn toggle_play(&mut self) {
        if !self.playing && self.progress >= 100 {
            self.progress = 0;
        }
        self.playing = !self.playing;
        self.ticks_into_percent = 0;
    }

    fn render_player(&self, frame: &mut Frame, area: Rect) {
        let status = if self.playing { "⏸ Playing" } else { "▶ Paused" };
        let volume = if self.muted { "🔇 Muted" } else { "🔊 Sound on" };
        Paragraph::new(Line::from_spans([
            Span::styled(status, theme::accent()),
            Span::styled("   ", theme::muted()),
            Span::styled(volume, theme::muted()),
        ]))
        .alignment(Alignment::Center)
        .render(chrome::row(area, 0), frame);

        let elapsed = format_clock(self.position());
        let total = format_clock(VIDEO_SECONDS);
        let bar_width = area.width.saturating_sub(theme::display_width(&elapsed) + 7);
        chrome::render_line(
            frame,
            chrome::row(area, 1),
            Line::from_spans([
                Span::styled(format!("{elapsed} "), theme::muted()),
                Span::styled(
                    theme::progress_bar(self.progress, usize::from(bar_width)),
                    theme::accent(),
                ),
                Span::styled(format!(" {total}"), theme::muted()),
            ]),
        );
    }

    fn render_ready(frame: &mut Frame, area: Rect) {
        chrome::render_text(frame, chrome::row(area, 0), "✔ AI Video is Ready!", theme::success());
        let ring = theme::progress_bar(READY_PERCENT, 20);
        Paragraph::new(Line::from_spans([
            Span::styled(ring, theme::accent()),
            Span::styled(format!(" {READY_PERCENT}%"), theme::accent()),
        ]))
        .alignment(Alignment::Center)
        .render(chrome::row(area, 1), frame);
        Paragraph::new("Your personalized AI video is ready")
            .style(theme::muted())
            .alignment(Alignment::Center)
            .render(chrome::row(area, 2), frame);
    }
}

impl Screen for PersonalizedVideo {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_play(),
            KeyCode::Char('m') => self.muted = !self.muted,
            KeyCode::Char(c) => {
                if let Some((_, _, notice)) = ACTIONS.iter().find(|(key, _, _)| *key == c) {
                    self.notice.show(*notice);
                }
            }
            _ => {}
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        self.notice.tick();
        if !self.playing {
            return Intent::Stay;
        }
        self.ticks_into_percent += 1;
        if self.ticks_into_percent >= TICKS_PER_PERCENT {
            self.ticks_into_percent = 0;
            self.progress = (self.progress + 1).min(100);
            if self.progress == 100 {
                self.playing = false;
            }
        }
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.height < 3 {
            return;
        }
        Paragraph::new("ॐ Krishna")
            .style(theme::accent())
            .alignment(Alignment::Center)
            .render(chrome::row(area, 0), frame);
        self.render_player(frame, Rect::new(area.x, area.y + 2, area.width, 2));
        if area.height >= 12 {
            Self::render_ready(frame, Rect::new(area.x, area.y + 5, area.width, 3));
        }

        let actions_top = area.height.saturating_sub(ACTIONS.len() as u16 + 3);
        for (i, (key, label, _)) in ACTIONS.iter().enumerate() {
            let key = key.to_string();
            chrome::render_hints(
                frame,
                chrome::row(area, actions_top + i as u16),
                &[(key.as_str(), *label)],
            );
        }
        Paragraph::new("Ask for another video")
            .style(theme::muted())
            .alignment(Alignment::Center)
            .render(chrome::row(area, area.height - 2), frame);
        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("Space", "play/pause"), ("m", "mute"), ("Esc", "Videos")],
        );
        chrome::render_notice(&self.notice, frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("Space", "Play / pause"),
            HelpEntry::new("m", "Mute / unmute"),
            HelpEntry::new("t", "Download transcript (Hindi)"),
            HelpEntry::new("a", "Download question-answer"),
            HelpEntry::new("c", "Create a personalized video"),
            HelpEntry::new("d", "Download the video"),
            HelpEntry::new("Esc", "Back to Video Library"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{guest, press, screen_text};

    fn ticks(screen: &mut PersonalizedVideo, n: u32) {
        for i in 0..n {
            screen.tick(u64::from(i));
        }
    }

    #[test]
    fn starts_paused_at_45_percent() {
        let screen = PersonalizedVideo::default();
        assert!(!screen.is_playing());
        assert_eq!(screen.progress(), 45);
        assert_eq!(format_clock(screen.position()), "1:31");
    }

    #[test]
    fn progress_advances_only_while_playing() {
        let mut screen = PersonalizedVideo::default();
        ticks(&mut screen, TICKS_PER_PERCENT * 3);
        assert_eq!(screen.progress(), 45);

        screen.update(&press(KeyCode::Char(' ')), &guest());
        assert!(screen.is_playing());
        ticks(&mut screen, TICKS_PER_PERCENT * 3);
        assert_eq!(screen.progress(), 48);

        screen.update(&press(KeyCode::Char(' ')), &guest());
        ticks(&mut screen, TICKS_PER_PERCENT * 3);
        assert_eq!(screen.progress(), 48);
    }

    #[test]
    fn playback_stops_at_the_end() {
        let mut screen = PersonalizedVideo::default();
        screen.update(&press(KeyCode::Char(' ')), &guest());
        ticks(&mut screen, TICKS_PER_PERCENT * 60);
        assert_eq!(screen.progress(), 100);
        assert!(!screen.is_playing());
        screen.update(&press(KeyCode::Char(' ')), &guest());
        assert_eq!(screen.progress(), 0, "replay starts over");
    }

    #[test]
    fn mute_toggles() {
        let mut screen = PersonalizedVideo::default();
        screen.update(&press(KeyCode::Char('m')), &guest());
        assert!(screen.is_muted());
        assert!(screen_text(&screen, 64, 24).contains("Muted"));
        screen.update(&press(KeyCode::Char('m')), &guest());
        assert!(!screen.is_muted());
    }

    #[test]
    fn action_keys_raise_notices() {
        let mut screen = PersonalizedVideo::default();
        screen.update(&press(KeyCode::Char('t')), &guest());
        assert_eq!(screen.notice(), Some("Downloading Transcript in Hindi..."));
        screen.update(&press(KeyCode::Char('c')), &guest());
        assert_eq!(screen.notice(), Some("Creating personalized AI video..."));
        screen.update(&press(KeyCode::Char('d')), &guest());
        assert_eq!(screen.notice(), Some("Downloading AI Video..."));
    }

    #[test]
    fn renders_timeline_and_ready_ring() {
        let text = screen_text(&PersonalizedVideo::default(), 64, 24);
        assert!(text.contains("3:24"), "{text}");
        assert!(text.contains("AI Video is Ready!"));
        assert!(text.contains("75%"));
    }
}
