//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (thinking indicator, card reveal in progress): draws every
//!   ~80ms for smooth animation.
//! - **Idle** (form waiting, cards settled): sleeps up to 500ms, only redraws
//!   on events or terminal resize.
//!
//! ## Timing
//!
//! The reveal sequencer never reads a clock; this layer records the cycle
//! start `Instant` when a scope lands and feeds elapsed time into the
//! sequencer each frame. The thinking indicator works the same way off the
//! loading start instant.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::scope::{GroqProvider, ScopeProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{BriefForm, FormEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: BriefForm,
    /// When the current generation started (drives the thinking steps).
    pub loading_started: Option<Instant>,
    /// When the current reveal cycle started (drives the sequencer).
    pub cycle_started: Option<Instant>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            form: BriefForm::new(),
            loading_started: None,
            cycle_started: None,
        }
    }

    /// Elapsed time since the generation started; zero before the first one.
    pub fn thinking_elapsed(&self) -> Duration {
        self.loading_started.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Elapsed time since the reveal cycle started; zero before the first one.
    pub fn reveal_elapsed(&self) -> Duration {
        self.cycle_started.map(|t| t.elapsed()).unwrap_or_default()
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for field editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build a provider from a resolved config's credentials.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ScopeProvider> {
    let api_key = config
        .api_key
        .clone()
        .expect("Groq API key must be set (config file or GROQ_API_KEY env var)");
    Arc::new(GroqProvider::new(
        api_key,
        Some(config.base_url.clone()),
        config.model.clone(),
        config.params,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the current generation (re-trigger supersedes it)
    let mut active_abort_handles: Vec<tokio::task::AbortHandle> = Vec::new();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync form props with App state
        tui.form.disabled = app.is_loading();

        // Determine if animations are running (thinking or mid-reveal)
        let revealing = tui
            .cycle_started
            .zip(app.reveal.as_ref())
            .is_some_and(|(started, seq)| !seq.is_settled(started.elapsed()));
        let animating = app.is_loading() || revealing;

        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;

            // Resize just needs the redraw flagged above
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Esc dismisses the current result, or cancels an in-flight request
            if matches!(event, TuiEvent::Escape) {
                let effect = update(&mut app, Action::Dismiss);
                if effect == Effect::AbortRequest {
                    for handle in active_abort_handles.drain(..) {
                        handle.abort();
                    }
                    tui.loading_started = None;
                }
                tui.cycle_started = None;
                continue;
            }

            // BriefForm handles everything else
            if let Some(FormEvent::Submit(brief)) = tui.form.handle_event(&event) {
                let effect = update(&mut app, Action::Submit(brief));
                if effect == Effect::SpawnRequest {
                    for handle in active_abort_handles.drain(..) {
                        handle.abort();
                    }
                    active_abort_handles =
                        spawn_request(&app, config.thinking_floor, tx.clone());
                    tui.loading_started = Some(Instant::now());
                    tui.cycle_started = None;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (generation results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::BeginReveal => {
                    tui.cycle_started = Some(Instant::now());
                    tui.loading_started = None;
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Spawns one generation request for the app's current cycle.
///
/// The provider call and the pacing floor are awaited in parallel; the result
/// is delivered only once both settle, so the thinking animation always plays
/// for at least the floor duration. Exactly one `ScopeReady` or `ScopeFailed`
/// is sent per cycle.
fn spawn_request(
    app: &App,
    thinking_floor: Duration,
    tx: mpsc::Sender<Action>,
) -> Vec<tokio::task::AbortHandle> {
    info!(
        "Spawning scope request (cycle {}, floor {:?})",
        app.cycle, thinking_floor
    );

    let provider = app.provider.clone();
    let brief = app.brief.clone();
    let cycle = app.cycle;

    let handle = tokio::spawn(async move {
        let (result, ()) = tokio::join!(
            provider.generate(&brief),
            tokio::time::sleep(thinking_floor)
        );

        let action = match result {
            Ok(scope) => Action::ScopeReady { cycle, scope },
            Err(e) => Action::ScopeFailed {
                cycle,
                detail: e.to_string(),
            },
        };

        if tx.send(action).is_err() {
            warn!("Failed to send generation result: receiver dropped");
        }
    });

    vec![handle.abort_handle()]
}
