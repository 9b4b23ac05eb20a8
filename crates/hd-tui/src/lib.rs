//! Terminal UI for the Hotdice keyboard dice roller.
//!
//! Wraps a [`hd_session::DiceSession`] in a ratatui interface: a key
//! dispatcher with a `d`-digit chord, panels for the pool, last result,
//! favorites, history and hotbar, and a background writer that persists
//! favorites and hotbar.

pub mod app;
pub mod chord;
pub mod clipboard;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod persist;
pub mod shared;
pub mod terminal;
pub mod views;
