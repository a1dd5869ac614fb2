use monotodo_core::Priority;
use monotodo_store::Theme;
use ratatui::prelude::*;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub ok: Color,
    pub warn: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::Gray,
                bg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::White,
                border: Color::DarkGray,
                highlight_fg: Color::Black,
                highlight_bg: Color::Gray,
                ok: Color::Green,
                warn: Color::Yellow,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Black,
                border: Color::Gray,
                highlight_fg: Color::White,
                highlight_bg: Color::DarkGray,
                ok: Color::Green,
                warn: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn priority(&self, priority: Priority) -> Style {
        match priority {
            Priority::High => Style::default().fg(self.accent).bold(),
            Priority::Medium => Style::default().fg(self.fg),
            Priority::Low => Style::default().fg(self.muted),
        }
    }
}
