//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration and state transitions
//! for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with loading, orchestration and platform-specific
/// input bridges.
pub mod app_setup;

/// Application state machine: loading until the viewports are built.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds each viewport surface to its page canvas on the web.
pub mod window_config;
