#![forbid(unsafe_code)]

//! Headless core of the Radha Govind Dham shell.
//!
//! This crate owns the only shared state of the application: who is logged
//! in and which screen is active. Views never touch that state directly.
//! They read a [`CurrentView`] and hand back an [`Intent`], which the
//! [`Controller`] applies.

pub mod controller;
pub mod credentials;
pub mod screen;
pub mod session;

pub use controller::{Controller, CurrentView, Intent, Phase};
pub use credentials::{AuthMode, CredentialError, CredentialField, Credentials};
pub use screen::{ParseScreenIdError, ScreenId};
pub use session::Session;
