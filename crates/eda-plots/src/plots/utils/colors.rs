//! Color utilities for plots

use plotters::style::RGBColor;

const PALETTE: &[RGBColor] = &[
    RGBColor(76, 114, 176),   // Blue
    RGBColor(221, 132, 82),   // Orange
    RGBColor(85, 168, 104),   // Green
    RGBColor(196, 78, 82),    // Red
    RGBColor(129, 114, 179),  // Purple
    RGBColor(147, 120, 96),   // Brown
    RGBColor(218, 139, 195),  // Pink
    RGBColor(140, 140, 140),  // Gray
    RGBColor(204, 185, 116),  // Olive
    RGBColor(100, 181, 205),  // Cyan
];

/// Get a categorical color from the palette, cycling past its end
pub fn categorical_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Color of an unsplit series
pub fn base_color() -> RGBColor {
    categorical_color(0)
}

/// Parse `#rrggbb` (the `#` is optional)
pub fn parse_hex(value: &str) -> Option<RGBColor> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(categorical_color(0), categorical_color(PALETTE.len()));
        assert_ne!(categorical_color(0), categorical_color(1));
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex("#ff8000"), Some(RGBColor(255, 128, 0)));
        assert_eq!(parse_hex("0a0B0c"), Some(RGBColor(10, 11, 12)));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#12345"), None);
    }
}
