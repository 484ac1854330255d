#![forbid(unsafe_code)]

//! AI Buddy: a scripted chat companion.
//!
//! Replies are canned and arrive after a short delay. At most one reply is
//! pending at a time: sending again before it lands replaces the pending
//! reply, and leaving the screen drops it.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_widgets::Widget;
use ftui_widgets::block::Alignment;
use ftui_widgets::input::TextInput;
use ftui_widgets::paragraph::Paragraph;
use gita_core::{Intent, Session};

use super::{HelpEntry, Screen, key_press};
use crate::chrome;
use crate::theme;

pub const GREETING: &str = "Namaste! How can I help you on your spiritual journey today?";
pub const SCRIPTED_REPLY: &str =
    "That's a wonderful question! In the Bhagavad Gita, Krishna teaches us that...";
pub const SUGGESTIONS: &[&str] = &[
    "Navigate a lifelong plan",
    "Ask AI Buddy",
    "Select device",
    "Today's reflection",
];
const PLACEHOLDER: &str = "Ask me anything...";
/// Ticks (100ms each) between sending a message and the reply.
pub const REPLY_DELAY_TICKS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Buddy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReply {
    /// Sequence number of the user message this answers.
    for_message: u64,
    remaining: u32,
}

#[derive(Debug)]
pub struct Assistant {
    transcript: Vec<ChatMessage>,
    input: TextInput,
    suggestion: Option<usize>,
    pending: Option<PendingReply>,
    sent: u64,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            transcript: vec![ChatMessage {
                speaker: Speaker::Buddy,
                text: GREETING.to_string(),
            }],
            input: TextInput::new().with_placeholder(PLACEHOLDER),
            suggestion: None,
            pending: None,
            sent: 0,
        }
    }
}

impl Assistant {
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn has_pending_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending reply, if any. Returns whether one was dropped.
    pub fn discard_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                tracing::debug!(
                    target: "gita.assistant",
                    message_id = pending.for_message,
                    "Pending reply discarded"
                );
                true
            }
            None => false,
        }
    }

    fn send(&mut self) {
        let text = self.input.value().trim().to_string();
        if text.is_empty() {
            return;
        }
        self.sent += 1;
        self.transcript.push(ChatMessage {
            speaker: Speaker::User,
            text,
        });
        self.input.clear();
        self.suggestion = None;

        if let Some(old) = self.pending.take() {
            tracing::debug!(
                target: "gita.assistant",
                superseded = old.for_message,
                by = self.sent,
                "Pending reply superseded"
            );
        }
        self.pending = Some(PendingReply {
            for_message: self.sent,
            remaining: REPLY_DELAY_TICKS,
        });
        tracing::info!(
            target: "gita.assistant",
            message_id = self.sent,
            delay_ticks = REPLY_DELAY_TICKS,
            "Message sent"
        );
    }

    fn cycle_suggestion(&mut self) {
        let next = self
            .suggestion
            .map_or(0, |idx| (idx + 1) % SUGGESTIONS.len());
        self.suggestion = Some(next);
        self.input = TextInput::new()
            .with_placeholder(PLACEHOLDER)
            .with_value(SUGGESTIONS[next]);
    }

    fn render_transcript(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let bubble_width = usize::from(area.width.saturating_sub(6).max(8));
        let mut rows: Vec<(Speaker, String)> = Vec::new();
        for msg in &self.transcript {
            let prefix = match msg.speaker {
                Speaker::Buddy => "✨ ",
                Speaker::User => "",
            };
            for line in theme::wrap_words(&format!("{prefix}{}", msg.text), bubble_width) {
                rows.push((msg.speaker, line));
            }
            rows.push((msg.speaker, String::new()));
        }
        let skip = rows.len().saturating_sub(usize::from(area.height));
        for (y, (speaker, text)) in rows.iter().skip(skip).enumerate() {
            let (style, alignment) = match speaker {
                Speaker::Buddy => (theme::body(), Alignment::Left),
                Speaker::User => (theme::accent(), Alignment::Right),
            };
            Paragraph::new(text.as_str())
                .style(style)
                .alignment(alignment)
                .render(chrome::row(area, y as u16), frame);
        }
    }
}

impl Screen for Assistant {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(key) = key_press(event) else {
            return Intent::Stay;
        };
        match key.code {
            KeyCode::Enter => self.send(),
            KeyCode::Tab => self.cycle_suggestion(),
            _ => {
                self.input.handle_event(event);
            }
        }
        Intent::Stay
    }

    fn tick(&mut self, _tick_count: u64) -> Intent {
        let Some(pending) = self.pending.as_mut() else {
            return Intent::Stay;
        };
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining == 0 {
            let answered = pending.for_message;
            self.pending = None;
            self.transcript.push(ChatMessage {
                speaker: Speaker::Buddy,
                text: SCRIPTED_REPLY.to_string(),
            });
            tracing::info!(
                target: "gita.assistant",
                message_id = answered,
                "Reply delivered"
            );
        }
        Intent::Stay
    }

    fn view(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if area.height < 4 {
            return;
        }
        let transcript = Rect::new(area.x, area.y, area.width, area.height - 4);
        self.render_transcript(frame, transcript);

        if self.pending.is_some() {
            chrome::render_text(
                frame,
                chrome::row(area, area.height - 4),
                "AI Buddy is typing…",
                theme::muted(),
            );
        }
        let chips = SUGGESTIONS
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                if Some(idx) == self.suggestion {
                    format!("[{s}]")
                } else {
                    format!(" {s} ")
                }
            })
            .collect::<Vec<_>>()
            .join("");
        chrome::render_text(frame, chrome::row(area, area.height - 3), &chips, theme::muted());

        let input_row = chrome::row(area, area.height - 2);
        self.input
            .clone()
            .with_focused(true)
            .with_style(theme::input_focused())
            .with_placeholder_style(theme::placeholder())
            .render(input_row, frame);
        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("Enter", "send"), ("Tab", "suggestion"), ("Esc", "back")],
        );
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("Enter", "Send message"),
            HelpEntry::new("Tab", "Cycle suggested prompts"),
            HelpEntry::new("Esc", "Back to Home"),
        ]
    }

    fn captures_text(&self) -> bool {
        true
    }
}
