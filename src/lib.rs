//! tarot-fan: card fan layout and interaction engine
//!
//! Goals:
//! - Pure, testable layout: a card's pose is a function of its place in the
//!   window and the viewport, nothing else
//! - Explicit state machines for gestures and selection
//! - No panics for bad input; empty decks and zero-width viewports render as
//!   an empty or neutral fan
//!
//! ## Quick start: deal and lay out a deck
//! ```
//! use std::time::Instant;
//! use tarot_fan::config::FanConfig;
//! use tarot_fan::reading::Reading;
//! use tarot_fan::tarot;
//! use tarot_fan::viewport::{Platform, Viewport};
//!
//! let cfg = FanConfig { reshuffle_delay_ms: 0, ..FanConfig::default() };
//! let mut reading = Reading::new(tarot::full_deck(), Viewport::new(400.0, Platform::Touch), cfg);
//! reading.shuffle(Instant::now());
//!
//! let poses = reading.visible_poses();
//! assert_eq!(poses.len(), 11); // ten-card window plus the trailing card
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin tarot-fan
//! ```

pub mod anim;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod gesture;
pub mod interaction;
pub mod layout;
pub mod reading;
pub mod tarot;
pub mod tui;
pub mod viewport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
