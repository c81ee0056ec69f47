//! TUI Rendering
//!
//! Translates `FormState` into styled text and draws it to the terminal frame.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use handle_core::NamingError;

use crate::form::{Focus, FormState, Phase};
use crate::theme::Theme;

/// Full screen content for the current phase.
pub fn view(state: &FormState, theme: &Theme) -> Text<'static> {
    match state.phase() {
        Phase::NotChosen | Phase::NameTaken | Phase::Invalid => set_name_view(state, theme),
        Phase::UnknownError => error_view(state),
        Phase::Set => name_set_view(state),
    }
}

/// Main draw function.
pub fn draw_ui(f: &mut Frame, state: &FormState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1)])
        .split(f.size());

    let widget = Paragraph::new(view(state, theme)).wrap(Wrap { trim: false });
    f.render_widget(widget, chunks[0]);
}

fn set_name_view(state: &FormState, theme: &Theme) -> Text<'static> {
    let mut lines = vec![
        Line::from("Enter a new username"),
        Line::default(),
        state.input().line(theme),
        Line::default(),
    ];

    if let Some(status) = status_line(state, theme) {
        lines.push(status);
        lines.push(Line::default());
    }

    let mut buttons = button("OK", state.focus() == Focus::ConfirmButton, true, theme);
    buttons.push(Span::raw(" "));
    buttons.extend(button(
        "Cancel",
        state.focus() == Focus::CancelButton,
        false,
        theme,
    ));
    lines.push(Line::from(buttons));

    Text::from(lines)
}

fn status_line(state: &FormState, theme: &Theme) -> Option<Line<'static>> {
    if state.is_submitting() {
        return Some(Line::styled(
            "Setting your name...",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    let message = match state.last_error()? {
        NamingError::NameTaken => "Sorry, that name is taken. Try something else!".to_string(),
        NamingError::InvalidName(reason) => format!("Invalid name: {}", reason),
        // The error view covers the rest.
        NamingError::Assertion(_) | NamingError::Other(_) => return None,
    };
    Some(Line::styled(message, Style::default().fg(theme.accent)))
}

fn button(label: &str, active: bool, default_action: bool, theme: &Theme) -> Vec<Span<'static>> {
    let padding = theme.button_padding_style(active);
    vec![
        Span::styled("  ", padding),
        Span::styled(label.to_string(), theme.button_style(active, default_action)),
        Span::styled("  ", padding),
    ]
}

fn error_view(state: &FormState) -> Text<'static> {
    let detail = state
        .last_error()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown error".to_string());
    Text::from(vec![
        Line::from("Welp, there's been an error:"),
        Line::from(detail),
        Line::default(),
        Line::from("Press any key to go back..."),
    ])
}

fn name_set_view(state: &FormState) -> Text<'static> {
    Text::from(vec![
        Line::from(format!(
            "OK! Your new username is {}",
            state.username().unwrap_or_default()
        )),
        Line::default(),
        Line::from("Press any key to continue..."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{update, Command, Msg};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn submitted(name: &str) -> FormState {
        let mut state = FormState::default();
        for c in name.chars() {
            state = update(key(KeyCode::Char(c)), state).0;
        }
        let (state, cmd) = update(key(KeyCode::Enter), state);
        assert_eq!(cmd, Some(Command::Submit(name.to_string())));
        state
    }

    #[test]
    fn test_initial_view_layout() {
        let lines = plain(&view(&FormState::default(), &Theme::default()));
        assert_eq!(lines[0], "Enter a new username");
        assert!(lines[2].starts_with("> "));
        assert_eq!(lines.last().unwrap(), "  OK     Cancel  ");
    }

    #[test]
    fn test_focused_button_uses_accent() {
        let theme = Theme::default();
        let (state, _) = update(key(KeyCode::Tab), FormState::default());
        let text = view(&state, &theme);
        let buttons = text.lines.last().unwrap();
        assert_eq!(buttons.spans[1].style.bg, Some(theme.accent));
        assert_eq!(buttons.spans[5].style.bg, Some(theme.inactive));
    }

    #[test]
    fn test_submitting_status_shown() {
        let lines = plain(&view(&submitted("alice"), &Theme::default()));
        assert!(lines.iter().any(|l| l == "Setting your name..."));
    }

    #[test]
    fn test_name_taken_message() {
        let (state, _) = update(
            Msg::SubmitFailed(NamingError::NameTaken),
            submitted("alice"),
        );
        let lines = plain(&view(&state, &Theme::default()));
        assert!(lines.iter().any(|l| l.contains("that name is taken")));
    }

    #[test]
    fn test_error_view() {
        let (state, _) = update(
            Msg::SubmitFailed(NamingError::Other("connection refused".into())),
            submitted("alice"),
        );
        let lines = plain(&view(&state, &Theme::default()));
        assert_eq!(
            lines,
            [
                "Welp, there's been an error:",
                "connection refused",
                "",
                "Press any key to go back...",
            ]
        );
    }

    #[test]
    fn test_name_set_view() {
        let (state, _) = update(Msg::NameSet("alice".into()), submitted("alice"));
        let lines = plain(&view(&state, &Theme::default()));
        assert_eq!(lines[0], "OK! Your new username is alice");
    }

    #[test]
    fn test_draw_to_test_backend() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| draw_ui(f, &FormState::default(), &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buffer.get(x, 1).symbol()).collect();
        assert!(row.contains("Enter a new username"));
    }
}
