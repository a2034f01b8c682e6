use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// General theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub chart: ChartTheme,
    pub term_fg: Color,
    pub term_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let terminal_palette = terminal_colorsaurus::color_palette(QueryOptions::default()).ok();

        let (term_fg, term_bg) = if let Some(palette) = terminal_palette {
            let fg = palette.foreground.scale_to_8bit();
            let bg = palette.background.scale_to_8bit();
            (Color::Rgb(fg.0, fg.1, fg.2), Color::Rgb(bg.0, bg.1, bg.2))
        } else {
            (Color::Rgb(255, 255, 255), Color::Rgb(0, 0, 0))
        };

        Self {
            text: TextTheme::default(),
            chart: ChartTheme::default(),
            term_fg,
            term_bg,
        }
    }
}

/// Replay text colors
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    /// Correctly typed characters
    pub typed: Color,
    /// Characters not typed yet
    pub untyped: Color,
    pub caret: Color,
    /// The wrong tail of the typed buffer
    pub typo: Color,
    /// Headings and the selected mistake
    pub highlight: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            typed: Color::Green,
            untyped: Color::DarkGray,
            caret: Color::White,
            typo: Color::Red,
            highlight: Color::Blue,
        }
    }
}

/// Segment chart colors
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartTheme {
    pub wpm: Color,
    pub raw_wpm: Color,
    /// The segment containing the caret
    pub current: Color,
    pub axis: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            wpm: Color::Yellow,
            raw_wpm: Color::Gray,
            current: Color::Cyan,
            axis: Color::DarkGray,
        }
    }
}
