//! Palette-to-ratatui color mapping.

use crate::config::Palette;
use ratatui::style::Color;

/// Resolved colors for the active palette.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub selection: Color,
    pub muted: Color,
}

impl Theme {
    /// Build a theme from a configured palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: parse_hex(&palette.background, Color::Reset),
            foreground: parse_hex(&palette.foreground, Color::White),
            accent: parse_hex(&palette.accent, Color::Cyan),
            success: parse_hex(&palette.success, Color::Green),
            warning: parse_hex(&palette.warning, Color::Yellow),
            error: parse_hex(&palette.error, Color::Red),
            border: parse_hex(&palette.border, Color::DarkGray),
            selection: parse_hex(&palette.selection, Color::DarkGray),
            muted: parse_hex(&palette.muted, Color::Gray),
        }
    }
}

/// Parse a `#rrggbb` hex string, falling back on malformed input.
fn parse_hex(value: &str, fallback: Color) -> Color {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return fallback;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#58a6ff", Color::Reset), Color::Rgb(88, 166, 255));
        assert_eq!(parse_hex("0d1117", Color::Reset), Color::Rgb(13, 17, 23));
    }

    #[test]
    fn malformed_hex_falls_back() {
        assert_eq!(parse_hex("#zzzzzz", Color::Cyan), Color::Cyan);
        assert_eq!(parse_hex("#fff", Color::Cyan), Color::Cyan);
        assert_eq!(parse_hex("", Color::Cyan), Color::Cyan);
    }

    #[test]
    fn non_ascii_palette_values_fall_back() {
        // Two 3-byte characters are 6 bytes but not a hex color.
        assert_eq!(parse_hex("垃圾", Color::Cyan), Color::Cyan);
        assert_eq!(parse_hex("#ＦＦ", Color::Cyan), Color::Cyan);
    }

    #[test]
    fn dark_and_light_palettes_resolve_differently() {
        let config = crate::config::ThemeConfig::default();
        let dark = Theme::from_palette(config.active(true));
        let light = Theme::from_palette(config.active(false));
        assert_ne!(dark.background, light.background);
    }
}
