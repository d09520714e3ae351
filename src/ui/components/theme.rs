//! Color palettes for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::notice::Severity;

pub mod colors {
    use ratatui::style::Color;

    pub const STATUS_SUCCESS: Color = Color::Rgb(39, 174, 96);
    pub const STATUS_ERROR: Color = Color::Rgb(231, 76, 60);
    pub const STATUS_INFO: Color = Color::Rgb(52, 152, 219);
}

/// Resolved palette for one theme. Copy-cheap; widgets take it by value.
#[derive(Clone, Copy, Debug)]
pub struct ThemePalette {
    pub fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub hint: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(102, 126, 234),
            accent_alt: Color::Rgb(118, 75, 162),
            hint: Color::Rgb(127, 140, 141),
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(44, 62, 80),
            accent: Color::Rgb(41, 98, 255),
            accent_alt: Color::Rgb(142, 68, 173),
            hint: Color::Rgb(149, 165, 166),
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => colors::STATUS_INFO,
            Severity::Success => colors::STATUS_SUCCESS,
            Severity::Error => colors::STATUS_ERROR,
        }
    }

    /// Strength meter color for a 0..=5 password score.
    pub fn strength(&self, score: u8) -> Color {
        match score {
            0 => self.hint,
            1 => colors::STATUS_ERROR,
            2 => Color::Rgb(230, 126, 34),
            3 => Color::Rgb(243, 156, 18),
            4 => Color::Rgb(241, 196, 15),
            _ => colors::STATUS_SUCCESS,
        }
    }
}
