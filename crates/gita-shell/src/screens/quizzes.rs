#![forbid(unsafe_code)]

//! Quiz list, quiz info and the question flow.

use ftui_core::event::{Event, KeyCode};
use ftui_core::geometry::Rect;
use ftui_render::frame::Frame;
use ftui_style::Style;
use ftui_text::{Line, Span};
use gita_core::{Intent, Session};

use super::{HelpEntry, ListCursor, Notice, Screen, pressed_code};
use crate::chrome;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    fn style(self) -> Style {
        let color = match self {
            Self::Easy => theme::accent::SUCCESS,
            Self::Medium => theme::accent::INFO,
            Self::Hard => theme::accent::ERROR,
        };
        Style::new().fg(color)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Quiz {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub questions: u8,
    pub difficulty: Difficulty,
    /// Best score in percent, for completed quizzes.
    pub score: Option<u8>,
}

impl Quiz {
    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }
}

pub const QUIZZES: &[Quiz] = &[
    Quiz {
        title: "Chapter 1 Quiz",
        subtitle: "Arjuna Vishada Yoga",
        questions: 10,
        difficulty: Difficulty::Easy,
        score: Some(85),
    },
    Quiz {
        title: "Chapter 2 Quiz",
        subtitle: "Sankhya Yoga fundamentals",
        questions: 15,
        difficulty: Difficulty::Medium,
        score: Some(92),
    },
    Quiz {
        title: "Krishna Leelas",
        subtitle: "Stories from Krishna's life",
        questions: 12,
        difficulty: Difficulty::Easy,
        score: None,
    },
    Quiz {
        title: "Daily Practice",
        subtitle: "Understanding Hindu rituals",
        questions: 8,
        difficulty: Difficulty::Easy,
        score: None,
    },
    Quiz {
        title: "Advanced Philosophy",
        subtitle: "Deep Vedantic concepts",
        questions: 20,
        difficulty: Difficulty::Hard,
        score: None,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

/// Every quiz runs over these sample questions.
pub const SAMPLE_QUESTIONS: &[Question] = &[
    Question {
        prompt: "What is the main message of the Bhagavad Gita?",
        options: [
            "Performing one's duty",
            "Achieving wealth",
            "Avoiding conflict",
            "Seeking pleasure",
        ],
        correct: 0,
    },
    Question {
        prompt: "Who spoke the Bhagavad Gita?",
        options: ["Arjuna", "Lord Krishna", "Vyasa", "Sanjaya"],
        correct: 1,
    },
];

/// Scores of 90 and above earn a star.
const STAR_SCORE: u8 = 90;
/// Rows per quiz: title, details, spacer.
const QUIZ_ROWS: u16 = 3;

/// Mean score over completed quizzes, in percent.
pub fn average_score(quizzes: &[Quiz]) -> Option<f32> {
    let scores: Vec<f32> = quizzes
        .iter()
        .filter_map(|q| q.score)
        .map(f32::from)
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f32>() / scores.len() as f32)
}

/// Percentage of `correct` answers out of `total`, rounded to the nearest integer.
pub fn score_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (correct.min(total) * 100 + total / 2) / total;
    u8::try_from(pct).unwrap_or(100)
}

/// An attempt in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRun {
    pub quiz: usize,
    pub question: usize,
    pub selected: Option<usize>,
    pub correct: usize,
}

impl QuizRun {
    fn new(quiz: usize) -> Self {
        Self {
            quiz,
            question: 0,
            selected: None,
            correct: 0,
        }
    }

    fn is_last(&self) -> bool {
        self.question + 1 >= SAMPLE_QUESTIONS.len()
    }

    fn step_selection(&mut self, forward: bool) {
        let len = SAMPLE_QUESTIONS[self.question].options.len();
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    List,
    /// Info modal for a quiz.
    Info(usize),
    Answering(QuizRun),
}

#[derive(Debug, Default)]
pub struct Quizzes {
    cursor: ListCursor,
    stage: Stage,
    notice: Notice,
}

impl Quizzes {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.text()
    }

    fn update_run(&mut self, mut run: QuizRun, code: KeyCode) {
        match code {
            KeyCode::Escape => {
                tracing::debug!(
                    target: "gita.shell",
                    quiz = QUIZZES[run.quiz].title,
                    question = run.question + 1,
                    "Quiz abandoned"
                );
                self.stage = Stage::List;
                return;
            }
            KeyCode::Down => run.step_selection(true),
            KeyCode::Up => run.step_selection(false),
            KeyCode::Char(c @ '1'..='4') => {
                run.selected = c.to_digit(10).map(|d| d as usize - 1);
            }
            KeyCode::Enter => {
                let Some(answer) = run.selected else {
                    return;
                };
                if answer == SAMPLE_QUESTIONS[run.question].correct {
                    run.correct += 1;
                }
                if run.is_last() {
                    let score = score_percent(run.correct, SAMPLE_QUESTIONS.len());
                    tracing::info!(
                        target: "gita.shell",
                        quiz = QUIZZES[run.quiz].title,
                        score,
                        "Quiz completed"
                    );
                    self.stage = Stage::List;
                    self.notice.show(format!("Quiz completed! Your score: {score}%"));
                    return;
                }
                run.question += 1;
                run.selected = None;
            }
            _ => {}
        }
        self.stage = Stage::Answering(run);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let average = average_score(QUIZZES)
            .map(|avg| format!("{avg:.1}%"))
            .unwrap_or_else(|| "-".to_string());
        let completed = QUIZZES.iter().filter(|q| q.is_completed()).count();
        chrome::render_line(
            frame,
            area,
            Line::from_spans([
                Span::styled("🏆 Total Score ", theme::muted()),
                Span::styled(average, theme::accent()),
                Span::styled("   ⭐ Completed ", theme::muted()),
                Span::styled(format!("{completed}/{}", QUIZZES.len()), theme::accent()),
            ]),
        );
    }

    fn render_info(quiz: &Quiz, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", quiz.title);
        let inner = chrome::render_modal(frame, area, &title, 52, 11);
        if inner.height < 4 {
            return;
        }
        chrome::render_line(
            frame,
            chrome::row(inner, 0),
            Line::from_spans([
                Span::styled(format!("📝 {} questions  ", quiz.questions), theme::body()),
                Span::styled(quiz.difficulty.label(), quiz.difficulty.style()),
            ]),
        );
        let mut y = 2;
        match quiz.score {
            Some(score) => {
                chrome::render_text(
                    frame,
                    chrome::row(inner, y),
                    &format!("Your best score: {score}%"),
                    theme::success(),
                );
            }
            None => {
                let text = format!(
                    "Test your knowledge on {}. Answer all questions to complete the quiz.",
                    quiz.subtitle
                );
                for line in theme::wrap_words(&text, usize::from(inner.width)) {
                    chrome::render_text(frame, chrome::row(inner, y), &line, theme::body());
                    y += 1;
                }
            }
        }
        let action = if quiz.is_completed() {
            "Retake Quiz"
        } else {
            "Start Quiz"
        };
        chrome::render_hints(
            frame,
            chrome::row(inner, inner.height - 1),
            &[("Enter", action), ("Esc", "close")],
        );
    }

    fn render_question(run: &QuizRun, frame: &mut Frame, area: Rect) {
        let question = &SAMPLE_QUESTIONS[run.question];
        let title = format!(" Question {}/{} ", run.question + 1, SAMPLE_QUESTIONS.len());
        let inner = chrome::render_modal(frame, area, &title, 52, 12);
        if inner.height < 7 {
            return;
        }
        let mut y = 0;
        for line in theme::wrap_words(question.prompt, usize::from(inner.width)) {
            chrome::render_text(frame, chrome::row(inner, y), &line, theme::title());
            y += 1;
        }
        y += 1;
        for (idx, option) in question.options.iter().enumerate() {
            let style = if run.selected == Some(idx) {
                theme::nav_active()
            } else {
                theme::body()
            };
            chrome::render_text(
                frame,
                chrome::row(inner, y),
                &format!(" {} {option}", idx + 1),
                style,
            );
            y += 1;
        }
        let next = if run.is_last() {
            "Finish Quiz"
        } else {
            "Next Question"
        };
        let mut hints = vec![("1-4", "answer")];
        if run.selected.is_some() {
            hints.push(("Enter", next));
        }
        hints.push(("Esc", "quit"));
        chrome::render_hints(frame, chrome::row(inner, inner.height - 1), &hints);
    }
}

impl Screen for Quizzes {
    fn update(&mut self, event: &Event, _session: &Session) -> Intent {
        let Some(code) = pressed_code(event) else {
            return Intent::Stay;
        };
        match self.stage {
            Stage::List => {
                if self.cursor.handle_key(code, QUIZZES.len()) {
                    return Intent::Stay;
                }
                if code == KeyCode::Enter {
                    self.stage = Stage::Info(self.cursor.selected());
                }
            }
            Stage::Info(quiz) => match code {
                KeyCode::Enter => self.stage = Stage::Answering(QuizRun::new(quiz)),
                KeyCode::Escape => self.stage = Stage::List,
                _ => {}
            },
            Stage::Answering(run) => self.update_run(run, code),
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
        self.render_stats(frame, chrome::row(area, 0));

        let list_height = area.height.saturating_sub(3);
        let visible = usize::from((list_height / QUIZ_ROWS).max(1));
        let first = self.cursor.selected().saturating_sub(visible - 1);
        for (slot, (idx, quiz)) in QUIZZES.iter().enumerate().skip(first).take(visible).enumerate() {
            let y = 2 + slot as u16 * QUIZ_ROWS;
            let selected = idx == self.cursor.selected();
            let (marker, style) = if selected {
                (theme::selection::INDICATOR, theme::selected())
            } else {
                (theme::selection::EMPTY, theme::title())
            };
            let mut spans = vec![
                Span::styled(marker, theme::accent()),
                Span::styled(quiz.title, style),
                Span::styled("  ", theme::muted()),
                Span::styled(quiz.difficulty.label(), quiz.difficulty.style()),
            ];
            match quiz.score {
                Some(score) => {
                    spans.push(Span::styled(format!("  {score}%"), theme::success()));
                    if score >= STAR_SCORE {
                        spans.push(Span::styled(" ★", theme::key_hint()));
                    }
                }
                None => spans.push(Span::styled("  Start Quiz", theme::key_hint())),
            }
            chrome::render_line(frame, chrome::row(area, y), Line::from_spans(spans));
            chrome::render_text(
                frame,
                chrome::row(area, y + 1),
                &format!("  {} · {} questions", quiz.subtitle, quiz.questions),
                theme::muted(),
            );
        }

        chrome::render_hints(
            frame,
            chrome::row(area, area.height - 1),
            &[("↑↓", "choose"), ("Enter", "open")],
        );
        match &self.stage {
            Stage::List => {}
            Stage::Info(idx) => Self::render_info(&QUIZZES[*idx], frame, area),
            Stage::Answering(run) => Self::render_question(run, frame, area),
        }
        chrome::render_notice(&self.notice, frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry::new("↑/↓", "Select a quiz / answer"),
            HelpEntry::new("1-4", "Pick an answer"),
            HelpEntry::new("Enter", "Open, start or continue"),
            HelpEntry::new("Esc", "Close or abandon the quiz"),
        ]
    }

    fn has_modal(&self) -> bool {
        self.stage != Stage::List
    }
}
