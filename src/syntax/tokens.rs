//! Token types and styled spans
//!
//! This module defines the semantic token types the scanners can assign
//! to a character range, their default visual styles, and the `Span`
//! type that carries one classified range of a line.

use super::style::{Color, Style};

/// Semantic token types assigned by the line scanners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Plain text (no special highlighting)
    Default,
    /// Line and block comments
    Comment,
    /// Documentation / compiler-directive comments ({-# ... #-})
    DocComment,
    /// String, character, and quasi-literal constants
    String,
    /// Numeric literals
    Number,
    /// Language keywords
    Keyword,
    /// Type names
    Type,
    /// Function names (identifier followed by call syntax)
    Function,
    /// Operator and symbol runs
    Operator,
    /// Malformed tokens (advisory styling only)
    Error,
    /// Preprocessor-like lines and annotations (#!, @Name)
    Preprocessor,
}

impl TokenType {
    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Default => Style::default(),
            TokenType::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenType::DocComment => Style::fg(Color::BrightMagenta).with_italic(),
            TokenType::String => Style::fg(Color::Green),
            TokenType::Number => Style::fg(Color::Cyan),
            TokenType::Keyword => Style::fg(Color::Magenta).with_bold(),
            TokenType::Type => Style::fg(Color::Yellow),
            TokenType::Function => Style::fg(Color::Blue),
            TokenType::Operator => Style::fg(Color::BrightWhite),
            TokenType::Error => Style::fg(Color::Red).with_underline(),
            TokenType::Preprocessor => Style::fg(Color::BrightMagenta),
        }
    }

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Default => "Default",
            TokenType::Comment => "Comment",
            TokenType::DocComment => "DocComment",
            TokenType::String => "String",
            TokenType::Number => "Number",
            TokenType::Keyword => "Keyword",
            TokenType::Type => "Type",
            TokenType::Function => "Function",
            TokenType::Operator => "Operator",
            TokenType::Error => "Error",
            TokenType::Preprocessor => "Preprocessor",
        }
    }

    /// Parse a token type from a string name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Default" => Some(TokenType::Default),
            "Comment" => Some(TokenType::Comment),
            "DocComment" => Some(TokenType::DocComment),
            "String" => Some(TokenType::String),
            "Number" => Some(TokenType::Number),
            "Keyword" => Some(TokenType::Keyword),
            "Type" => Some(TokenType::Type),
            "Function" => Some(TokenType::Function),
            "Operator" => Some(TokenType::Operator),
            "Error" => Some(TokenType::Error),
            "Preprocessor" => Some(TokenType::Preprocessor),
            _ => None,
        }
    }
}

/// A classified span of text within one line
///
/// Offsets are byte offsets into the line, half-open. Spans are emitted
/// left to right and never overlap; byte ranges not covered by any span
/// carry the default style implicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Token type assigned to this range
    pub token: TokenType,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, token: TokenType) -> Self {
        Self { start, end, token }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
