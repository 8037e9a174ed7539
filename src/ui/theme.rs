//! Colors and text sizing derived from the user's preferences

use crate::config::{FontScale, Theme};
use crate::state::RiskColor;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
    pub bar_bg: Color,
    pub scale: FontScale,
}

impl Palette {
    pub fn new(theme: Theme, scale: FontScale) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                error: Color::Red,
                success: Color::Green,
                bar_bg: Color::DarkGray,
                scale,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                error: Color::Red,
                success: Color::Green,
                bar_bg: Color::Gray,
                scale,
            },
            // Pure black and white with saturated signals
            Theme::HighContrast => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Yellow,
                muted: Color::White,
                error: Color::LightRed,
                success: Color::LightGreen,
                bar_bg: Color::Black,
                scale,
            },
        }
    }

    pub fn base(&self) -> Style {
        self.text(Style::default().fg(self.fg).bg(self.bg))
    }

    /// Apply the font scale to `style`
    pub fn text(&self, style: Style) -> Style {
        match self.scale {
            FontScale::Large => style.add_modifier(Modifier::BOLD),
            FontScale::Normal | FontScale::Small => style,
        }
    }

    pub fn accent(&self) -> Style {
        self.text(Style::default().fg(self.accent))
    }

    pub fn muted(&self) -> Style {
        match self.scale {
            // Dimmed hints get hard to read when the user asked for small text
            FontScale::Small => Style::default().fg(self.fg),
            _ => self.text(Style::default().fg(self.muted)),
        }
    }

    pub fn error(&self) -> Style {
        self.text(Style::default().fg(self.error))
    }

    /// Blank rows between form fields
    pub fn field_gap(&self) -> u16 {
        match self.scale {
            FontScale::Small | FontScale::Normal => 0,
            FontScale::Large => 1,
        }
    }

    pub fn risk(&self, risk: RiskColor) -> Color {
        match risk {
            RiskColor::Red => Color::Red,
            RiskColor::Yellow => Color::Yellow,
            RiskColor::Green => Color::Green,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Theme::default(), FontScale::default())
    }
}
