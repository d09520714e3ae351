//! Terminal host for the interaction core.

pub mod components;
pub mod tui;
