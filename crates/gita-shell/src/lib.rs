#![forbid(unsafe_code)]

//! Terminal shell for the Radha Govind Dham learning companion.
//!
//! The [`app::AppModel`] drives a login form and nine content screens on top
//! of the headless [`gita_core::Controller`].

pub mod app;
pub mod chrome;
pub mod cli;
pub mod logging;
pub mod screens;
pub mod theme;
