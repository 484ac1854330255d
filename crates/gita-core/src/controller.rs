#![forbid(unsafe_code)]

//! Session/navigation controller.
//!
//! Two super-states: [`Phase::Unauthenticated`] always renders the auth
//! view, whatever the stored [`ScreenId`] is; [`Phase::Authenticated`]
//! renders the view bound to the current screen. Only
//! [`Controller::submit_credentials`] (or the guest shortcut) enters the
//! authenticated phase, and only [`Controller::logout`] leaves it. Inside
//! the authenticated phase every screen can reach every other screen.

use crate::credentials::Credentials;
use crate::credentials::CredentialError;
use crate::screen::ScreenId;
use crate::session::Session;

/// What a view asks the controller to do after handling an event.
///
/// This is the whole outbound half of the view contract: a view can ask to
/// move to another screen or to end the session, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Nothing for the controller to do.
    #[default]
    Stay,
    /// Switch the active screen.
    Navigate(ScreenId),
    /// Clear the session.
    Logout,
}

/// Authentication super-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Authenticated,
}

/// Read model every view renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentView<'a> {
    pub session: Option<&'a Session>,
    pub screen: ScreenId,
}

impl CurrentView<'_> {
    pub fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Authenticated
        } else {
            Phase::Unauthenticated
        }
    }
}

/// Single owner of the session and the active screen.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    session: Option<Session>,
    screen: ScreenId,
}

impl Controller {
    /// Unauthenticated, on the default screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the form if every required field is filled.
    ///
    /// On rejection nothing changes. On success the session is replaced and
    /// the default screen becomes active.
    pub fn submit_credentials(
        &mut self,
        credentials: &Credentials,
    ) -> Result<&Session, CredentialError> {
        match credentials.to_session() {
            Ok(session) => {
                tracing::info!(
                    target: "gita.session",
                    mode = credentials.mode.label(),
                    display_name = session.display_name(),
                    "Session started"
                );
                Ok(self.start(session))
            }
            Err(err) => {
                tracing::debug!(
                    target: "gita.session",
                    mode = credentials.mode.label(),
                    reason = %err,
                    "Credentials declined"
                );
                Err(err)
            }
        }
    }

    /// Log in as the built-in guest identity.
    pub fn continue_as_guest(&mut self) -> &Session {
        let session = Session::guest();
        tracing::info!(
            target: "gita.session",
            mode = "Guest",
            display_name = session.display_name(),
            "Session started"
        );
        self.start(session)
    }

    fn start(&mut self, session: Session) -> &Session {
        self.screen = ScreenId::DEFAULT;
        self.session.insert(session)
    }

    /// Clear the session and go back to the default screen.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(
                target: "gita.session",
                display_name = session.display_name(),
                "Session ended"
            );
        }
        self.screen = ScreenId::DEFAULT;
    }

    /// Make `target` the active screen. Unconditional.
    pub fn navigate(&mut self, target: ScreenId) {
        let from = self.screen;
        self.screen = target;
        tracing::debug!(
            target: "gita.nav",
            from = from.slug(),
            to = target.slug(),
            authenticated = self.session.is_some(),
            "Navigate"
        );
    }

    /// Apply a view's request.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Stay => {}
            Intent::Navigate(target) => self.navigate(target),
            Intent::Logout => self.logout(),
        }
    }

    pub fn current_view(&self) -> CurrentView<'_> {
        CurrentView {
            session: self.session.as_ref(),
            screen: self.screen,
        }
    }

    pub fn phase(&self) -> Phase {
        self.current_view().phase()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }
}
