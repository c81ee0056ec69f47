//! Presentation settings for the username screen.

use std::str::FromStr;

use handle_config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid color {value:?} for theme.{field}")]
pub struct ThemeError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Focused prompt, cursor and active button.
    pub accent: Color,
    /// Inactive button background.
    pub inactive: Color,
    pub prompt: String,
    pub placeholder: String,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ThemeError> {
        Ok(Self {
            accent: parse_color("accent", &config.accent)?,
            inactive: parse_color("inactive", &config.inactive)?,
            prompt: config.prompt.clone(),
            placeholder: config.placeholder.clone(),
        })
    }

    /// Button background; the default action is underlined.
    pub fn button_style(&self, active: bool, default_action: bool) -> Style {
        let bg = if active { self.accent } else { self.inactive };
        let style = Style::default().bg(bg);
        if default_action {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn button_padding_style(&self, active: bool) -> Style {
        Style::default().bg(if active { self.accent } else { self.inactive })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0xEE, 0x6F, 0xF8),
            inactive: Color::Indexed(238),
            prompt: "> ".to_string(),
            placeholder: "divagurl2000".to_string(),
        }
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Color, ThemeError> {
    Color::from_str(value.trim()).map_err(|_| ThemeError {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_theme() {
        let theme = Theme::from_config(&ThemeConfig::default()).unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_named_color() {
        let config = ThemeConfig {
            accent: "green".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config).unwrap();
        assert_eq!(theme.accent, Color::Green);
    }

    #[test]
    fn test_bad_color_names_field() {
        let config = ThemeConfig {
            inactive: "#zzz".into(),
            ..ThemeConfig::default()
        };
        let err = Theme::from_config(&config).unwrap_err();
        assert_eq!(err.field, "inactive");
        assert!(err.to_string().contains("theme.inactive"));
    }

    #[test]
    fn test_active_button_uses_accent() {
        let theme = Theme::default();
        assert_eq!(theme.button_style(true, false).bg, Some(theme.accent));
        assert_eq!(theme.button_style(false, false).bg, Some(theme.inactive));
        assert!(theme
            .button_style(false, true)
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }
}
