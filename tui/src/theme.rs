//! Color theme and glyphs for the Keepsake TUI.
//!
//! Uses the Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use keepsake_types::ui::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(210, 126, 153); // sakuraPink

    // === Accent Colors ===
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed

    // === Semantic Aliases ===
    pub const ACCENT: Color = CYAN;
    pub const SUCCESS: Color = GREEN;
    pub const WARNING: Color = YELLOW;
    pub const ERROR: Color = RED;
    pub const PEACH: Color = ORANGE;

    // === Envelope ===
    pub const PAPER: Color = Color::Rgb(240, 228, 200);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub peach: Color,
    pub paper: Color,
    /// Confetti is drawn in its own colors unless this is set.
    pub monochrome_confetti: bool,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
            peach: colors::PEACH,
            paper: colors::PAPER,
            monochrome_confetti: false,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            peach: Color::Yellow,
            paper: Color::White,
            monochrome_confetti: true,
        }
    }

    /// Color for a `0xRRGGBB` confetti particle.
    #[must_use]
    pub fn confetti(&self, rgb: u32) -> Color {
        if self.monochrome_confetti {
            return self.text_primary;
        }
        let [_, r, g, b] = rgb.to_be_bytes();
        Color::Rgb(r, g, b)
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for tiles, status and confetti.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub hidden_tile: &'static str,
    pub timer: &'static str,
    pub pairs: &'static str,
    pub sound_on: &'static str,
    pub sound_off: &'static str,
    pub cue: &'static str,
    pub envelope_closed: &'static [&'static str],
    pub envelope_open: &'static [&'static str],
    pub confetti_round: &'static str,
    pub confetti_square: &'static str,
    pub separator: &'static str,
}

const ENVELOPE_CLOSED: &[&str] = &[
    "┌────────────────────┐",
    "│╲                  ╱│",
    "│  ╲              ╱  │",
    "│    ╲    ♥     ╱    │",
    "│      ╲──────╱      │",
    "└────────────────────┘",
];

const ENVELOPE_OPEN: &[&str] = &[
    "       ╱╲      ╱╲       ",
    "     ╱    ╲  ╱    ╲     ",
    "┌──╱────────────────╲──┐",
    "│                      │",
    "│                      │",
    "└──────────────────────┘",
];

const ENVELOPE_CLOSED_ASCII: &[&str] = &[
    "+--------------------+",
    "|\\                  /|",
    "|  \\              /  |",
    "|    \\    <3     /   |",
    "|      \\------/      |",
    "+--------------------+",
];

const ENVELOPE_OPEN_ASCII: &[&str] = &[
    "       /\\      /\\       ",
    "     /    \\  /    \\     ",
    "+--/----------------\\--+",
    "|                      |",
    "|                      |",
    "+----------------------+",
];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            hidden_tile: "??",
            timer: "Time",
            pairs: "Pairs",
            sound_on: "Sound on",
            sound_off: "Sound off",
            cue: "*",
            envelope_closed: ENVELOPE_CLOSED_ASCII,
            envelope_open: ENVELOPE_OPEN_ASCII,
            confetti_round: "o",
            confetti_square: "#",
            separator: "|",
        }
    } else {
        Glyphs {
            hidden_tile: "░░",
            timer: "⏱",
            pairs: "♥",
            sound_on: "🔊",
            sound_off: "🔇",
            cue: "♪",
            envelope_closed: ENVELOPE_CLOSED,
            envelope_open: ENVELOPE_OPEN,
            confetti_round: "●",
            confetti_square: "■",
            separator: "│",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn timer(palette: &Palette, low: bool) -> Style {
        if low {
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_primary)
        }
    }

    #[must_use]
    pub fn tile_hidden(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted).bg(palette.bg_panel)
    }

    #[must_use]
    pub fn tile_revealed(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    }

    #[must_use]
    pub fn tile_matched(palette: &Palette) -> Style {
        Style::default().fg(palette.success).bg(palette.bg_panel)
    }

    #[must_use]
    pub fn cursor(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn letter(palette: &Palette) -> Style {
        Style::default().fg(palette.bg_dark).bg(palette.paper)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
