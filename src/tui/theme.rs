use ratatui::style::Color;

use crate::shared::Theme;

/// Colors for one theme. The view only ever draws through a palette so the
/// dark/light toggle is a single swap.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub warn: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Black,
            fg: Color::Gray,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            warn: Color::Yellow,
        },
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            muted: Color::Gray,
            warn: Color::Red,
        },
    }
}
