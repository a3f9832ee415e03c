//! Style attributes for panel text

use ratatui::style::{Color, Modifier, Style};

/// Logical role of a piece of panel text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Art,
    Border,
    Title,
    Label,
    Value,
    Dim,
}

/// Maps tones onto terminal styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    monochrome: bool,
}

impl Palette {
    /// Classic BBS colors: cyan frame, magenta title, yellow labels, white values
    pub fn color() -> Self {
        Self { monochrome: false }
    }

    /// Bold/dim only, for terminals that opt out of color
    pub fn monochrome() -> Self {
        Self { monochrome: true }
    }

    pub fn style(&self, tone: Tone) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if self.monochrome {
            return match tone {
                Tone::Art | Tone::Border | Tone::Title | Tone::Label => bold,
                Tone::Value => Style::default(),
                Tone::Dim => Style::default().add_modifier(Modifier::DIM),
            };
        }

        match tone {
            Tone::Art | Tone::Border => bold.fg(Color::Cyan),
            Tone::Title => bold.fg(Color::Magenta),
            Tone::Label => Style::default().fg(Color::Yellow),
            Tone::Value => bold.fg(Color::White),
            Tone::Dim => Style::default().fg(Color::Cyan),
        }
    }
}
