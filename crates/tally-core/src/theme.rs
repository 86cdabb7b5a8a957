//! Color themes for the balance display.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the balance digits and labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Themes in the order `c` steps through them.
    pub const ALL: [ColorTheme; 7] = [
        ColorTheme::Cyan,
        ColorTheme::Green,
        ColorTheme::Magenta,
        ColorTheme::Yellow,
        ColorTheme::Red,
        ColorTheme::Blue,
        ColorTheme::White,
    ];

    /// The theme after this one, wrapping back to the first.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Foreground color for the balance digits.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_follows_theme_order() {
        assert_eq!(ColorTheme::ALL[0], ColorTheme::default());
        for pair in ColorTheme::ALL.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(ColorTheme::White.next(), ColorTheme::Cyan);
    }

    #[test]
    fn test_theme_names_in_config() {
        let names: Vec<String> = ColorTheme::ALL
            .iter()
            .map(|t| serde_json::to_string(t).expect("serialize"))
            .collect();
        assert_eq!(names[0], "\"cyan\"");
        assert_eq!(names[2], "\"magenta\"");
    }
}
