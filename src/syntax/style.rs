//! Style types for terminal rendering
//!
//! This module provides the visual side of colorization: the colors and
//! attributes a renderer applies to the semantic spans the engine emits.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from its name (for TOML config loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Default" => Some(Color::Default),
            "Black" => Some(Color::Black),
            "Red" => Some(Color::Red),
            "Green" => Some(Color::Green),
            "Yellow" => Some(Color::Yellow),
            "Blue" => Some(Color::Blue),
            "Magenta" => Some(Color::Magenta),
            "Cyan" => Some(Color::Cyan),
            "White" => Some(Color::White),
            "BrightBlack" => Some(Color::BrightBlack),
            "BrightRed" => Some(Color::BrightRed),
            "BrightGreen" => Some(Color::BrightGreen),
            "BrightYellow" => Some(Color::BrightYellow),
            "BrightBlue" => Some(Color::BrightBlue),
            "BrightMagenta" => Some(Color::BrightMagenta),
            "BrightCyan" => Some(Color::BrightCyan),
            "BrightWhite" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
