//! # Application State
//!
//! Core business state for Marvin. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ScopeProvider>   // chat-completion backend
//! ├── brief: ScopeBrief                  // last submitted brief
//! ├── phase: Phase                       // Idle → Loading → (Ready | Error)
//! ├── scope: Option<ScopeResponse>       // validated result
//! ├── reveal: Option<RevealSequencer>    // reveal schedule for this cycle
//! ├── error: Option<String>              // user-facing error message
//! ├── status_message: String             // status bar text
//! └── cycle: u64                         // generation cycle id
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::reveal::{RevealSequencer, RevealTimings};
use crate::scope::{ScopeBrief, ScopeProvider, ScopeResponse};

/// One user-triggered generation cycle moves through these phases.
/// A new submission restarts from `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

pub struct App {
    pub provider: Arc<dyn ScopeProvider>,
    pub brief: ScopeBrief,
    pub phase: Phase,
    pub scope: Option<ScopeResponse>,
    pub reveal: Option<RevealSequencer>,
    pub error: Option<String>,
    pub status_message: String,
    pub model_name: String,
    /// Generation cycle id. Bumped on every submission; completions carrying
    /// a stale id are discarded, so a re-trigger supersedes the old cycle.
    pub cycle: u64,
    pub timings: RevealTimings,
}

impl App {
    pub fn new(provider: Arc<dyn ScopeProvider>, model_name: String) -> Self {
        Self {
            provider,
            brief: ScopeBrief::default(),
            phase: Phase::Idle,
            scope: None,
            reveal: None,
            error: None,
            status_message: String::from("Marvin quickly scopes out your project."),
            model_name,
            cycle: 0,
            timings: RevealTimings::default(),
        }
    }

    pub fn from_config(provider: Arc<dyn ScopeProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider, config.model.clone());
        app.timings = config.timings;
        app
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}
