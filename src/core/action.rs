//! # Actions
//!
//! Everything that can happen in Marvin becomes an `Action`.
//! User presses Enter on a complete brief? That's `Action::Submit`.
//! The provider answers? That's `Action::ScopeReady`.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state. No side effects here — I/O happens elsewhere, steered by the
//! returned `Effect`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: submit, feed in a canned reply, assert on
//! the resulting phase — no terminal, no network, no timers.

use log::{info, warn};

use crate::core::state::{App, Phase};
use crate::reveal::RevealSequencer;
use crate::scope::{ScopeBrief, ScopeResponse};

/// The single generic user-facing failure message. Error detail goes to the
/// log, never to the screen.
pub const GENERIC_ERROR: &str = "Failed to generate scope. Please try again.";

#[derive(Debug)]
pub enum Action {
    /// User triggered generation with the given brief.
    Submit(ScopeBrief),
    /// A validated scope arrived for the given cycle.
    ScopeReady { cycle: u64, scope: ScopeResponse },
    /// The generation attempt for the given cycle failed; `detail` is logged.
    ScopeFailed { cycle: u64, detail: String },
    /// Dismiss the current result or error (or cancel an in-flight request).
    Dismiss,
    Quit,
}

/// Side effects the caller must perform after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a generation request for the current `app.cycle`.
    SpawnRequest,
    /// A reveal cycle begins now; the caller records the start instant.
    BeginReveal,
    /// Abort any in-flight request tasks.
    AbortRequest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(brief) => {
            // The trigger is disabled for incomplete briefs and while a
            // request is in flight; a submit in those states is a no-op.
            if !brief.is_complete() || app.is_loading() {
                return Effect::None;
            }
            info!("Submitting brief (cycle {})", app.cycle + 1);
            app.brief = brief;
            app.cycle += 1;
            app.phase = Phase::Loading;
            app.scope = None;
            app.reveal = None;
            app.error = None;
            app.status_message = String::from("Marvin is thinking...");
            Effect::SpawnRequest
        }
        Action::ScopeReady { cycle, scope } => {
            if cycle != app.cycle || app.phase != Phase::Loading {
                warn!("Discarding stale scope for cycle {} (current {})", cycle, app.cycle);
                return Effect::None;
            }
            app.reveal = Some(RevealSequencer::for_scope(&scope, app.timings));
            app.scope = Some(scope);
            app.phase = Phase::Ready;
            app.status_message = String::from("Scope ready.");
            Effect::BeginReveal
        }
        Action::ScopeFailed { cycle, detail } => {
            if cycle != app.cycle || app.phase != Phase::Loading {
                warn!("Discarding stale failure for cycle {} (current {})", cycle, app.cycle);
                return Effect::None;
            }
            warn!("Generation failed (cycle {}): {}", cycle, detail);
            app.phase = Phase::Error;
            app.error = Some(GENERIC_ERROR.to_string());
            app.status_message = String::new();
            Effect::None
        }
        Action::Dismiss => {
            let was_loading = app.is_loading();
            if was_loading {
                // Bump the cycle so a late completion from the aborted
                // request is discarded even if the abort raced it.
                app.cycle += 1;
            }
            app.phase = Phase::Idle;
            app.scope = None;
            app.reveal = None;
            app.error = None;
            app.status_message = String::from("Marvin quickly scopes out your project.");
            if was_loading {
                Effect::AbortRequest
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}
