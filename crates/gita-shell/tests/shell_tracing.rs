#![forbid(unsafe_code)]

//! The shell logs chat activity on `gita.assistant` and view-local actions
//! on `gita.shell`.

use std::sync::{Arc, Mutex};

use ftui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use ftui_runtime::Model;
use gita_core::ScreenId;
use gita_shell::app::{AppModel, AppMsg};
use gita_shell::screens::assistant::REPLY_DELAY_TICKS;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    message: String,
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(Captured {
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<Captured> {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer).with(
        Targets::new()
            .with_target("gita.assistant", tracing::Level::DEBUG)
            .with_target("gita.shell", tracing::Level::DEBUG),
    );
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

fn press(code: KeyCode) -> AppMsg {
    AppMsg::from(Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Press,
    }))
}

fn messages(events: &[Captured], target: &str) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.target == target)
        .map(|e| e.message.clone())
        .collect()
}

#[test]
fn chat_lifecycle_is_logged() {
    let events = capture(|| {
        let mut app = AppModel::new().with_guest();
        app.update(AppMsg::Navigate(ScreenId::Assistant));
        app.update(press(KeyCode::Char('?')));
        app.update(press(KeyCode::Enter));
        for _ in 0..REPLY_DELAY_TICKS {
            app.update(AppMsg::Tick);
        }
        app.update(press(KeyCode::Char('x')));
        app.update(press(KeyCode::Enter));
        app.update(press(KeyCode::Escape));
    });

    assert_eq!(
        messages(&events, "gita.assistant"),
        vec![
            "Message sent",
            "Reply delivered",
            "Message sent",
            "Pending reply discarded",
        ]
    );
}

#[test]
fn quiz_completion_is_logged() {
    let events = capture(|| {
        let mut app = AppModel::new().with_guest();
        app.update(AppMsg::Navigate(ScreenId::Quizzes));
        for code in [
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Char('1'),
            KeyCode::Enter,
            KeyCode::Char('2'),
            KeyCode::Enter,
        ] {
            app.update(press(code));
        }
    });

    let shell = messages(&events, "gita.shell");
    assert!(shell.iter().any(|m| m == "Quiz completed"), "{shell:?}");
}

#[test]
fn startup_is_logged() {
    let events = capture(|| {
        let mut app = AppModel::new();
        let _ = app.init();
    });
    assert_eq!(messages(&events, "gita.shell"), vec!["Shell started"]);
}
