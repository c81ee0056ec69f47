//! Single-line text field.
//!
//! Holds the text buffer, cursor and focus. Styling comes from the `Theme`
//! at render time.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    chars: Vec<char>,
    cursor: usize,
    focused: bool,
    cursor_visible: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            cursor: 0,
            focused: false,
            cursor_visible: true,
        }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor_visible = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Toggle cursor visibility. No-op while blurred.
    pub fn blink(&mut self) {
        if self.focused {
            self.cursor_visible = !self.cursor_visible;
        }
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let consumed = match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.chars.len();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.chars = self.chars.split_off(self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Char('k') if ctrl => {
                self.chars.truncate(self.cursor);
                true
            }
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.chars.len());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.chars.len();
                true
            }
            _ => false,
        };
        if consumed {
            self.cursor_visible = true;
        }
        consumed
    }

    /// Render as a prompt line. Shows the placeholder while empty.
    pub fn line(&self, theme: &Theme) -> Line<'static> {
        let prompt_style = if self.focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(theme.prompt.clone(), prompt_style)];

        let show_cursor = self.focused && self.cursor_visible;
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        if self.chars.is_empty() {
            let placeholder_style = Style::default().add_modifier(Modifier::DIM);
            let mut rest = theme.placeholder.chars();
            if show_cursor {
                let first = rest.next().unwrap_or(' ');
                spans.push(Span::styled(first.to_string(), cursor_style));
            }
            let rest: String = rest.collect();
            if !rest.is_empty() {
                spans.push(Span::styled(rest, placeholder_style));
            }
            return Line::from(spans);
        }

        let before: String = self.chars[..self.cursor].iter().collect();
        if !before.is_empty() {
            spans.push(Span::raw(before));
        }
        if show_cursor {
            let at = self.chars.get(self.cursor).copied().unwrap_or(' ');
            spans.push(Span::styled(at.to_string(), cursor_style));
            let after: String = self.chars.iter().skip(self.cursor + 1).collect();
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            let after: String = self.chars[self.cursor..].iter().collect();
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        }
        Line::from(spans)
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        input.focus();
        for c in text.chars() {
            input.handle_key(&key(KeyCode::Char(c)));
        }
        input
    }

    fn rendered(input: &TextInput) -> String {
        input
            .line(&Theme::default())
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("alicee");
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "alice");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("alce");
        input.handle_key(&key(KeyCode::Left));
        input.handle_key(&key(KeyCode::Left));
        input.handle_key(&key(KeyCode::Char('i')));
        assert_eq!(input.value(), "alice");
    }

    #[test]
    fn test_blurred_input_ignores_keys() {
        let mut input = typed("al");
        input.blur();
        assert!(!input.handle_key(&key(KeyCode::Char('x'))));
        assert_eq!(input.value(), "al");
    }

    #[test]
    fn test_kill_line_shortcuts() {
        let mut input = typed("alice");
        input.handle_key(&key(KeyCode::Left));
        input.handle_key(&ctrl('k'));
        assert_eq!(input.value(), "alic");
        input.handle_key(&ctrl('u'));
        assert!(input.is_empty());
    }

    #[test]
    fn test_ctrl_chars_not_inserted() {
        let mut input = typed("a");
        assert!(!input.handle_key(&ctrl('c')));
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_blink_only_when_focused() {
        let mut input = typed("alice");
        input.blink();
        assert_eq!(rendered(&input), "> alice");
        input.blink();
        assert_eq!(rendered(&input), "> alice ");
        input.blur();
        input.blink();
        assert_eq!(rendered(&input), "> alice");
    }

    #[test]
    fn test_placeholder_when_empty() {
        let input = TextInput::new();
        assert_eq!(rendered(&input), "> divagurl2000");
    }
}
