//! Shared tuning constants for the showcase engine.

pub mod controller;
pub mod lighting;
pub mod path;
pub mod pointer;
pub mod render_settings;
