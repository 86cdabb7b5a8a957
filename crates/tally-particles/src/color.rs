//! Color helpers for the particle field.

use ratatui::style::Color;

/// Parse `#rrggbb` or `#rgb` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }

    match digits.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// Blend `rgb` toward black by `alpha` (0.0 = black, 1.0 = full color).
pub fn fade(rgb: (u8, u8, u8), alpha: f64) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f64 * alpha).round() as u8;
    Color::Rgb(scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#1e90ff"), Some((30, 144, 255)));
        assert_eq!(parse_hex_color("#fa0"), Some((255, 170, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_color("ffffff"), None);
        assert_eq!(parse_hex_color("#ffff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_fade() {
        assert_eq!(fade((255, 255, 255), 0.4), Color::Rgb(102, 102, 102));
        assert_eq!(fade((200, 100, 0), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade((200, 100, 0), 2.0), Color::Rgb(200, 100, 0));
    }
}
