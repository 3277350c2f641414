//! Greyscale theme
//!
//! A high-contrast monochrome palette; the only color is reserved for
//! the health indicator.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    /// Pure white - maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    /// Near white - headers, selected items
    pub const GREY_50: Color = Color::Rgb(250, 250, 250);
    /// Bright grey - primary text
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);
    /// Light grey - secondary text
    pub const GREY_200: Color = Color::Rgb(180, 180, 180);
    /// Medium grey - muted text
    pub const GREY_300: Color = Color::Rgb(140, 140, 140);
    /// Dark grey - inactive elements
    pub const GREY_400: Color = Color::Rgb(100, 100, 100);
    /// Darker grey - borders
    pub const GREY_500: Color = Color::Rgb(70, 70, 70);
    /// Near black - main background
    pub const GREY_800: Color = Color::Rgb(28, 28, 28);
    /// True black - deepest background
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    /// Green for a connected backend
    pub const GREEN: Color = Color::Rgb(100, 200, 100);
    /// Red for an unreachable backend
    pub const RED: Color = Color::Rgb(200, 100, 100);

    pub fn bg() -> Style {
        Style::default().bg(Self::GREY_900)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    pub fn bold() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::GREY_500)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Spinner frames - braille pattern
    pub const SPINNER_BRAILLE: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

    pub const BULLET_FILLED: char = '●';
    pub const BULLET_EMPTY: char = '○';
    pub const CHECK_MARK: char = '✓';
    pub const CROSS_MARK: char = '✗';
}
