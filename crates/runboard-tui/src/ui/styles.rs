use ratatui::style::{Color, Modifier, Style};
use runboard_core::progress::rank_color as rank_hex;

// Color palette
pub const PRIMARY: Color = Color::Rgb(99, 102, 241);
pub const ERROR: Color = Color::Rgb(220, 38, 38);
pub const MUTED: Color = Color::Rgb(100, 116, 139);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);
pub const BAR_EMPTY: Color = Color::Rgb(51, 65, 85);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn gauge_style() -> Style {
    Style::default().fg(PRIMARY).bg(BAR_EMPTY)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Gold, silver and bronze for the podium, gray for everyone else.
pub fn rank_color(rank: usize) -> Color {
    parse_hex(rank_hex(rank)).unwrap_or(MUTED)
}

pub fn rank_style(rank: usize) -> Style {
    let style = Style::default().fg(rank_color(rank));
    if rank < 3 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Parse `#RRGGBB` into a terminal colour.
fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FFD700"), Some(Color::Rgb(255, 215, 0)));
        assert_eq!(parse_hex("#6b7280"), Some(Color::Rgb(107, 114, 128)));
        assert_eq!(parse_hex("FFD700"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn test_rank_colors() {
        assert_eq!(rank_color(0), Color::Rgb(255, 215, 0));
        assert_eq!(rank_color(1), Color::Rgb(192, 192, 192));
        assert_eq!(rank_color(2), Color::Rgb(205, 127, 50));
        assert_eq!(rank_color(10), Color::Rgb(107, 114, 128));
    }
}
