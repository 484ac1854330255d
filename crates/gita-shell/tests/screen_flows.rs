#![forbid(unsafe_code)]

//! Multi-step flows through individual screens, driven through the app
//! model so global key routing is exercised as well.

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use ftui_render::frame::Frame;
use ftui_render::grapheme_pool::GraphemePool;
use ftui_runtime::Model;
use gita_core::ScreenId;
use gita_shell::app::{AppModel, AppMsg};
use gita_shell::screens::assistant::{GREETING, REPLY_DELAY_TICKS, SCRIPTED_REPLY, Speaker};
use gita_shell::screens::videos::OPEN_DELAY_TICKS;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Press,
    })
}

fn key(app: &mut AppModel, code: KeyCode) {
    app.update(AppMsg::from(press(code)));
}

fn keys(app: &mut AppModel, codes: &[KeyCode]) {
    for &code in codes {
        key(app, code);
    }
}

fn type_text(app: &mut AppModel, text: &str) {
    for ch in text.chars() {
        key(app, KeyCode::Char(ch));
    }
}

fn ticks(app: &mut AppModel, n: u32) {
    for _ in 0..n {
        app.update(AppMsg::Tick);
    }
}

fn screen_text(app: &AppModel) -> String {
    let (w, h) = (64, 30);
    let mut pool = GraphemePool::new();
    let mut frame = Frame::new(w, h, &mut pool);
    app.view(&mut frame);
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
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn home_card_opens_quiz_and_scores_it() {
    let mut app = AppModel::new().with_guest();
    // Fourth home card is Quizzes.
    keys(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.current_screen(), ScreenId::Quizzes);

    // Open "Chapter 1 Quiz", start it, answer right then wrong.
    keys(&mut app, &[KeyCode::Enter, KeyCode::Enter]);
    assert!(screen_text(&app).contains("Question 1"));
    key(&mut app, KeyCode::Enter);
    assert!(
        screen_text(&app).contains("Question 1"),
        "Enter without a selection does nothing"
    );
    keys(&mut app, &[KeyCode::Char('1'), KeyCode::Enter]);
    keys(&mut app, &[KeyCode::Char('1'), KeyCode::Enter]);

    assert_eq!(
        app.screens.quizzes.notice(),
        Some("Quiz completed! Your score: 50%")
    );
    assert!(screen_text(&app).contains("Your score: 50%"));
}

#[test]
fn escape_during_quiz_abandons_without_leaving_screen() {
    let mut app = AppModel::new().with_guest();
    app.update(AppMsg::Navigate(ScreenId::Quizzes));
    keys(&mut app, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Char('2')]);
    key(&mut app, KeyCode::Escape);
    assert_eq!(app.current_screen(), ScreenId::Quizzes);
    assert!(app.screens.quizzes.notice().is_none());
    key(&mut app, KeyCode::Escape);
    assert_eq!(app.current_screen(), ScreenId::Home);
}

#[test]
fn assistant_replies_after_delay() {
    let mut app = AppModel::new().with_guest();
    app.update(AppMsg::Navigate(ScreenId::Assistant));
    type_text(&mut app, "What is dharma?");
    key(&mut app, KeyCode::Enter);

    let transcript = app.screens.assistant.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].text, GREETING);
    assert_eq!(transcript[1].speaker, Speaker::User);
    assert!(screen_text(&app).contains("AI Buddy is typing"));

    ticks(&mut app, REPLY_DELAY_TICKS - 1);
    assert!(app.screens.assistant.has_pending_reply());
    ticks(&mut app, 1);
    let transcript = app.screens.assistant.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].text, SCRIPTED_REPLY);
}

#[test]
fn second_message_supersedes_pending_reply() {
    let mut app = AppModel::new().with_guest();
    app.update(AppMsg::Navigate(ScreenId::Assistant));
    type_text(&mut app, "first");
    key(&mut app, KeyCode::Enter);
    ticks(&mut app, REPLY_DELAY_TICKS / 2);
    type_text(&mut app, "second");
    key(&mut app, KeyCode::Enter);
    ticks(&mut app, REPLY_DELAY_TICKS);

    let buddy_replies = app
        .screens
        .assistant
        .transcript()
        .iter()
        .filter(|m| m.speaker == Speaker::Buddy && m.text == SCRIPTED_REPLY)
        .count();
    assert_eq!(buddy_replies, 1);
}

#[test]
fn leaving_assistant_drops_pending_reply() {
    let mut app = AppModel::new().with_guest();
    app.update(AppMsg::Navigate(ScreenId::Assistant));
    type_text(&mut app, "Om");
    key(&mut app, KeyCode::Enter);
    key(&mut app, KeyCode::Escape);
    assert_eq!(app.current_screen(), ScreenId::Home);
    ticks(&mut app, REPLY_DELAY_TICKS * 2);

    app.update(AppMsg::Navigate(ScreenId::Assistant));
    assert_eq!(app.screens.assistant.transcript().len(), 1);
    assert!(!app.screens.assistant.has_pending_reply());
}

#[test]
fn video_opens_player_and_back_returns_to_library() {
    let mut app = AppModel::new().with_guest();
    key(&mut app, KeyCode::Char('4'));
    key(&mut app, KeyCode::Enter);
    ticks(&mut app, OPEN_DELAY_TICKS);
    assert_eq!(app.current_screen(), ScreenId::PersonalizedVideo);
    assert!(screen_text(&app).contains("AI Video Learning"));

    key(&mut app, KeyCode::Char(' '));
    assert!(app.screens.personalized_video.is_playing());
    key(&mut app, KeyCode::Escape);
    assert_eq!(app.current_screen(), ScreenId::Videos);

    // Re-entering starts from a fresh player.
    app.update(AppMsg::Navigate(ScreenId::PersonalizedVideo));
    assert!(!app.screens.personalized_video.is_playing());
}

#[test]
fn community_discussion_draft_captures_shortcut_keys() {
    let mut app = AppModel::new().with_guest();
    key(&mut app, KeyCode::Char('3'));
    assert_eq!(app.current_screen(), ScreenId::Community);
    key(&mut app, KeyCode::Char('n'));
    // '1' and 'q' would be global shortcuts outside the draft.
    type_text(&mut app, "q1 Bhakti");
    assert_eq!(app.current_screen(), ScreenId::Community);
    let draft = app.screens.community.draft().expect("draft open");
    assert_eq!(draft.title(), "q1 Bhakti");

    key(&mut app, KeyCode::Enter);
    assert!(app.screens.community.draft().is_none());
    assert!(screen_text(&app).contains("Discussion created successfully!"));
}

#[test]
fn profile_edit_confirms_then_opens_courses() {
    let mut app = AppModel::new().with_guest();
    key(&mut app, KeyCode::Char('5'));
    key(&mut app, KeyCode::Char('e'));
    key(&mut app, KeyCode::Enter);
    assert_eq!(
        app.screens.profile.notice(),
        Some("Profile updated successfully!")
    );
    key(&mut app, KeyCode::Char('m'));
    assert_eq!(app.current_screen(), ScreenId::Courses);
}
