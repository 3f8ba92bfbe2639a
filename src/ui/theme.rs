use ratatui::style::{Color, Modifier, Style};

pub const HIGHLIGHT: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const HEADER: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const DIM: Style = Style::new().fg(Color::DarkGray);

pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const SUCCESS: Style = Style::new().fg(Color::Green);

pub const WARNING: Style = Style::new().fg(Color::Yellow);

pub const BORDER: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const TAB_ACTIVE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub const TAB_INACTIVE: Style = Style::new().fg(Color::DarkGray);

pub const ACCENT: Style = Style::new().fg(Color::Cyan);

pub const LANG: Style = Style::new().fg(Color::Magenta);

pub const STARS: Style = Style::new().fg(Color::Yellow);

/// GitHub-style contribution heat scale, level 0..=4.
pub fn contribution_color(level: u8) -> Color {
    match level {
        0 => Color::Rgb(35, 39, 46),
        1 => Color::Rgb(14, 68, 41),
        2 => Color::Rgb(0, 109, 50),
        3 => Color::Rgb(38, 166, 65),
        _ => Color::Rgb(57, 211, 83),
    }
}
