//! ANSI rendering of colorized lines
//!
//! Turns the engine's spans into terminal output: a theme maps token
//! types to styles, tabs are expanded against a running display column,
//! and styling is emitted with crossterm's queued commands.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    queue,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, Span, Style, TokenType};

/// Maps token types to display styles
pub struct Theme {
    styles: HashMap<TokenType, Style>,
}

impl Theme {
    /// Create a theme from the default token styles
    pub fn new() -> Self {
        let all = [
            TokenType::Default,
            TokenType::Comment,
            TokenType::DocComment,
            TokenType::String,
            TokenType::Number,
            TokenType::Keyword,
            TokenType::Type,
            TokenType::Function,
            TokenType::Operator,
            TokenType::Error,
            TokenType::Preprocessor,
        ];
        let styles = all.into_iter().map(|t| (t, t.default_style())).collect();
        Self { styles }
    }

    /// Override the style for a token type
    pub fn set(&mut self, token: TokenType, style: Style) {
        self.styles.insert(token, style);
    }

    /// Style for a token type
    pub fn style_for(&self, token: TokenType) -> Style {
        self.styles
            .get(&token)
            .copied()
            .unwrap_or_else(|| token.default_style())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Break a line into contiguous segments covering `[0, len)`: the
/// engine's spans plus default-styled gaps between them.
fn segments(len: usize, spans: &[Span]) -> Vec<(usize, usize, TokenType)> {
    let mut out = Vec::new();
    let mut pos = 0;
    for span in spans {
        let start = span.start.min(len);
        let end = span.end.min(len);
        if start > pos {
            out.push((pos, start, TokenType::Default));
        }
        if end > start {
            out.push((start, end, span.token));
        }
        pos = pos.max(end);
    }
    if pos < len {
        out.push((pos, len, TokenType::Default));
    }
    out
}

/// Write one colorized line (without the trailing newline)
pub fn render_line<W: Write>(
    out: &mut W,
    text: &str,
    spans: &[Span],
    theme: &Theme,
    tab_width: usize,
) -> Result<()> {
    let tab_width = tab_width.max(1);
    let mut col = 0usize;
    for (start, end, token) in segments(text.len(), spans) {
        let style = theme.style_for(token);
        let styled = !style.is_default();
        if styled {
            apply_style(out, &style)?;
        }
        for ch in text[start..end].chars() {
            if ch == '\t' {
                let pad = tab_width - (col % tab_width);
                queue!(out, Print(" ".repeat(pad)))?;
                col += pad;
            } else {
                queue!(out, Print(ch))?;
                col += UnicodeWidthChar::width(ch).unwrap_or(1);
            }
        }
        if styled {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
    }
    Ok(())
}

/// Write a right-aligned line-number gutter
pub fn render_gutter<W: Write>(out: &mut W, line_no: usize, width: usize) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(term_color(Color::BrightBlack)),
        Print(format!("{line_no:>width$} ")),
        ResetColor
    )?;
    Ok(())
}

fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_fill_gaps() {
        let spans = vec![
            Span::new(2, 5, TokenType::Keyword),
            Span::new(7, 9, TokenType::Number),
        ];
        let segs = segments(10, &spans);
        assert_eq!(
            segs,
            vec![
                (0, 2, TokenType::Default),
                (2, 5, TokenType::Keyword),
                (5, 7, TokenType::Default),
                (7, 9, TokenType::Number),
                (9, 10, TokenType::Default),
            ]
        );
    }

    #[test]
    fn test_segments_empty_line() {
        assert!(segments(0, &[]).is_empty());
        assert_eq!(segments(3, &[]), vec![(0, 3, TokenType::Default)]);
    }

    #[test]
    fn test_segments_clamp_to_line() {
        let spans = vec![Span::new(1, 50, TokenType::String)];
        assert_eq!(
            segments(4, &spans),
            vec![
                (0, 1, TokenType::Default),
                (1, 4, TokenType::String),
            ]
        );
    }

    #[test]
    fn test_render_plain_text_passes_through() {
        let mut out = Vec::new();
        let theme = Theme::new();
        render_line(&mut out, "plain text", &[], &theme, 8).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain text");
    }

    #[test]
    fn test_render_expands_tabs() {
        let mut out = Vec::new();
        let theme = Theme::new();
        render_line(&mut out, "a\tb", &[], &theme, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a   b");
    }

    #[test]
    fn test_render_styles_spans() {
        let mut out = Vec::new();
        let theme = Theme::new();
        let spans = vec![Span::new(0, 2, TokenType::Keyword)];
        render_line(&mut out, "if x", &spans, &theme, 8).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("if"));
        assert!(text.contains(" x"));
        // Styling escapes surround the keyword
        assert!(text.contains('\x1b'));
    }

    #[test]
    fn test_theme_override() {
        let mut theme = Theme::new();
        theme.set(TokenType::Keyword, Style::fg(Color::Red));
        assert_eq!(theme.style_for(TokenType::Keyword), Style::fg(Color::Red));
        assert_eq!(
            theme.style_for(TokenType::String),
            TokenType::String.default_style()
        );
    }
}
