//! Username form state machine.
//!
//! `update` is a pure function from a message and the current `FormState` to
//! the next state plus at most one `Command` for the dispatcher to run.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use handle_core::{validate_name, NamingError, DEFAULT_MAX_NAME_LEN};

use crate::text_input::TextInput;

/// Coarse screen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotChosen,
    NameTaken,
    Invalid,
    Set,
    UnknownError,
}

/// Control that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TextInput,
    ConfirmButton,
    CancelButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::TextInput => Focus::ConfirmButton,
            Focus::ConfirmButton => Focus::CancelButton,
            Focus::CancelButton => Focus::TextInput,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::TextInput => Focus::CancelButton,
            Focus::ConfirmButton => Focus::TextInput,
            Focus::CancelButton => Focus::ConfirmButton,
        }
    }
}

/// Everything the screen reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(KeyEvent),
    /// Cursor blink tick.
    Blink,
    /// The naming service accepted the name.
    NameSet(String),
    SubmitFailed(NamingError),
    /// Posted by the exit command; the host loop tears the screen down.
    Exit,
}

/// Work for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    phase: Phase,
    focus: Focus,
    input: TextInput,
    last_error: Option<NamingError>,
    submitting: bool,
    username: Option<String>,
    max_name_len: usize,
}

impl FormState {
    pub fn new(max_name_len: usize) -> Self {
        let mut input = TextInput::new();
        input.focus();
        Self {
            phase: Phase::NotChosen,
            focus: Focus::TextInput,
            input,
            last_error: None,
            submitting: false,
            username: None,
            max_name_len,
        }
    }

    /// Fresh state with the same settings.
    pub fn reset(&self) -> Self {
        Self::new(self.max_name_len)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn candidate_name(&self) -> String {
        self.input.value()
    }

    pub fn last_error(&self) -> Option<&NamingError> {
        self.last_error.as_ref()
    }

    /// A submission has been issued and its result has not arrived yet.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Name on record once the phase is `Set`.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::TextInput {
            self.input.focus();
        } else {
            self.input.blur();
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_LEN)
    }
}

pub fn update(msg: Msg, state: FormState) -> (FormState, Option<Command>) {
    match msg {
        Msg::Key(key) => handle_key(key, state),
        Msg::Blink => {
            let mut state = state;
            state.input.blink();
            (state, None)
        }
        Msg::NameSet(name) => handle_name_set(name, state),
        Msg::SubmitFailed(err) => handle_failure(err, state),
        Msg::Exit => (state, None),
    }
}

fn reset_and_exit(state: &FormState) -> (FormState, Option<Command>) {
    (state.reset(), Some(Command::Exit))
}

fn handle_key(key: KeyEvent, mut state: FormState) -> (FormState, Option<Command>) {
    match state.phase {
        // Any key acknowledges the error and restarts the screen.
        Phase::UnknownError => return reset_and_exit(&state),
        Phase::Set => return (state, Some(Command::Exit)),
        Phase::NotChosen | Phase::NameTaken | Phase::Invalid => {}
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            reset_and_exit(&state)
        }
        KeyCode::Esc => reset_and_exit(&state),
        KeyCode::Tab => {
            let next = state.focus.next();
            state.set_focus(next);
            (state, None)
        }
        KeyCode::BackTab => {
            let prev = state.focus.prev();
            state.set_focus(prev);
            (state, None)
        }
        KeyCode::Enter => match state.focus {
            Focus::TextInput => {
                state.set_focus(Focus::ConfirmButton);
                submit(state)
            }
            Focus::ConfirmButton => submit(state),
            Focus::CancelButton => reset_and_exit(&state),
        },
        _ => {
            if state.focus == Focus::TextInput {
                state.input.handle_key(&key);
            }
            (state, None)
        }
    }
}

fn submit(mut state: FormState) -> (FormState, Option<Command>) {
    if state.submitting {
        debug!("Submission already in flight; ignoring confirm");
        return (state, None);
    }

    let name = state.candidate_name();
    if let Err(err) = validate_name(&name, state.max_name_len) {
        debug!(error = %err, "Rejected name before submission");
        state.phase = Phase::Invalid;
        state.last_error = Some(err);
        return (state, None);
    }

    info!(name = %name, "Submitting new username");
    state.last_error = None;
    state.submitting = true;
    (state, Some(Command::Submit(name)))
}

fn handle_name_set(name: String, mut state: FormState) -> (FormState, Option<Command>) {
    if !state.submitting {
        warn!(name = %name, "Dropping name-set result with no submission in flight");
        return (state, None);
    }
    info!(name = %name, "Username set");
    state.submitting = false;
    state.phase = Phase::Set;
    state.username = Some(name);
    state.input.blur();
    (state, None)
}

fn handle_failure(err: NamingError, mut state: FormState) -> (FormState, Option<Command>) {
    if !state.submitting {
        warn!(error = %err, "Dropping submission failure with no submission in flight");
        return (state, None);
    }
    state.submitting = false;
    state.phase = match &err {
        NamingError::NameTaken => Phase::NameTaken,
        NamingError::InvalidName(_) => Phase::Invalid,
        NamingError::Assertion(_) | NamingError::Other(_) => Phase::UnknownError,
    };
    warn!(error = %err, phase = ?state.phase, "Username submission failed");
    state.last_error = Some(err);
    (state, None)
}
