//! Username screen runtime.
//!
//! Owns the terminal while the screen is visible and runs the single-threaded
//! event loop: terminal keys, dispatcher results and blink ticks are handled
//! one at a time.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use handle_core::NamingClient;

use crate::dispatcher::{blink, EventDispatcher, BLINK_INTERVAL};
use crate::form::{update, Command, FormState, Msg, Phase};
use crate::render::draw_ui;
use crate::theme::Theme;

/// How the screen ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// The user backed out, or acknowledged an error.
    Cancelled,
    /// The naming service accepted this name.
    NameSet(String),
}

pub struct UsernameScreen {
    client: Arc<dyn NamingClient>,
    theme: Theme,
    max_name_len: usize,
}

impl UsernameScreen {
    pub fn new(client: Arc<dyn NamingClient>, theme: Theme, max_name_len: usize) -> Self {
        Self {
            client,
            theme,
            max_name_len,
        }
    }

    /// Take over the terminal and run until the screen exits.
    pub async fn run(&self) -> Result<ScreenOutcome> {
        let mut terminal = setup_terminal()?;
        let outcome = self.run_with(&mut terminal, EventStream::new()).await;
        restore_terminal(&mut terminal)?;
        outcome
    }

    /// Event loop over an arbitrary backend and input stream.
    ///
    /// An input stream that ends closes the screen with whatever outcome the
    /// form has reached.
    pub async fn run_with<B, S>(&self, terminal: &mut Terminal<B>, mut input: S) -> Result<ScreenOutcome>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = EventDispatcher::new(Arc::clone(&self.client), tx);
        let mut ticks = blink(BLINK_INTERVAL);
        let mut screen = ScreenLoop::new(FormState::new(self.max_name_len), dispatcher);

        info!(client = self.client.name(), "Username screen opened");
        loop {
            terminal
                .draw(|f| draw_ui(f, screen.state(), &self.theme))
                .context("Failed to draw username screen")?;

            let msg = tokio::select! {
                event = input.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => Msg::Key(key),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => {
                        let outcome = outcome_for(screen.state());
                        info!(outcome = ?outcome, "Input closed");
                        return Ok(outcome);
                    }
                },
                Some(msg) = rx.recv() => msg,
                _ = ticks.tick() => Msg::Blink,
            };

            if let Some(outcome) = screen.handle(msg) {
                info!(outcome = ?outcome, "Username screen closed");
                return Ok(outcome);
            }
        }
    }
}

/// What the caller learns if the screen closes in `state`.
pub fn outcome_for(state: &FormState) -> ScreenOutcome {
    match (state.phase(), state.username()) {
        (Phase::Set, Some(name)) => ScreenOutcome::NameSet(name.to_string()),
        _ => ScreenOutcome::Cancelled,
    }
}

/// Message handling for one screen instance.
///
/// Once `update` asks to exit, everything but the exit signal is dropped so
/// keys typed ahead never reach the reset form.
pub struct ScreenLoop {
    state: FormState,
    dispatcher: EventDispatcher,
    exiting: bool,
}

impl ScreenLoop {
    pub fn new(state: FormState, dispatcher: EventDispatcher) -> Self {
        Self {
            state,
            dispatcher,
            exiting: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Handle one message: run `update`, hand any command to the dispatcher,
    /// and report the outcome once the exit signal comes back.
    pub fn handle(&mut self, msg: Msg) -> Option<ScreenOutcome> {
        if matches!(msg, Msg::Exit) {
            return Some(outcome_for(&self.state));
        }
        if self.exiting {
            debug!(msg = ?msg, "Dropping message while exiting");
            return None;
        }

        let (state, command) = update(msg, std::mem::take(&mut self.state));
        self.state = state;
        if let Some(command) = command {
            if matches!(command, Command::Exit) {
                self.exiting = true;
            }
            debug!(command = ?command, "Dispatching command");
            self.dispatcher.dispatch(command);
        }
        None
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    undo_on_err(enter_screen(), || {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Run `undo` if `result` failed, then pass the result through.
fn undo_on_err<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
