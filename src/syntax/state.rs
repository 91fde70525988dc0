//! Cross-line lexical state
//!
//! A scanner that stops at end of line must remember what lexical
//! context it was in so the next line can resume correctly: an open
//! block comment (with its nesting depth), an open string, a fenced
//! long literal, and so on. `LineState` is that memory.
//!
//! Inside the engine the state is a plain sum type. Hosts that cache
//! one state per line store it as a packed `u32` via [`LineState::encode`];
//! [`LineState::decode`] restores it exactly.

/// Which quote character delimits an open string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    /// The delimiter character for this quote kind
    pub fn ch(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Lexical context carried across a line boundary
///
/// At most one mode is active at any boundary. Block-comment nesting
/// depth and bracket fence lengths are carried inside their modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// Top level, nothing open
    #[default]
    Normal,
    /// Inside a block comment; `level` is the nesting depth,
    /// `doc` marks the documentation/directive variant
    BlockComment { level: u8, doc: bool },
    /// Inside a quote-delimited string that carries over the line break
    QuoteString { quote: Quote },
    /// Inside a triple-quoted string
    LongString { quote: Quote },
    /// Inside a bracket-fenced string; `fence` is the number of `=`
    /// between the brackets, and only an equal fence closes it
    BracketString { fence: u8 },
    /// Inside a bracket-fenced comment
    BracketComment { fence: u8 },
    /// Inside an alternate literal ($/ ... /$)
    AltLiteral,
}

const TAG_MASK: u32 = 0x0f;
const TAG_NORMAL: u32 = 0;
const TAG_BLOCK_COMMENT: u32 = 1;
const TAG_QUOTE_STRING: u32 = 2;
const TAG_LONG_STRING: u32 = 3;
const TAG_BRACKET_STRING: u32 = 4;
const TAG_BRACKET_COMMENT: u32 = 5;
const TAG_ALT_LITERAL: u32 = 6;

const FLAG_DOC: u32 = 0x10;
const FLAG_DOUBLE: u32 = 0x20;
const LEVEL_SHIFT: u32 = 8;

impl LineState {
    /// Check if no continuation mode is active
    pub fn is_normal(&self) -> bool {
        *self == LineState::Normal
    }

    /// Pack into a fixed-width integer for per-line caches
    pub fn encode(self) -> u32 {
        match self {
            LineState::Normal => TAG_NORMAL,
            LineState::BlockComment { level, doc } => {
                let mut bits = TAG_BLOCK_COMMENT | ((level as u32) << LEVEL_SHIFT);
                if doc {
                    bits |= FLAG_DOC;
                }
                bits
            }
            LineState::QuoteString { quote } => TAG_QUOTE_STRING | quote_flag(quote),
            LineState::LongString { quote } => TAG_LONG_STRING | quote_flag(quote),
            LineState::BracketString { fence } => {
                TAG_BRACKET_STRING | ((fence as u32) << LEVEL_SHIFT)
            }
            LineState::BracketComment { fence } => {
                TAG_BRACKET_COMMENT | ((fence as u32) << LEVEL_SHIFT)
            }
            LineState::AltLiteral => TAG_ALT_LITERAL,
        }
    }

    /// Unpack a state produced by [`encode`](Self::encode)
    ///
    /// Unknown encodings decode to `Normal` rather than failing; a stale
    /// cache entry degrades to a plain rescan of the line.
    pub fn decode(bits: u32) -> Self {
        let level = ((bits >> LEVEL_SHIFT) & 0xff) as u8;
        match bits & TAG_MASK {
            TAG_BLOCK_COMMENT => LineState::BlockComment {
                level,
                doc: bits & FLAG_DOC != 0,
            },
            TAG_QUOTE_STRING => LineState::QuoteString {
                quote: quote_of(bits),
            },
            TAG_LONG_STRING => LineState::LongString {
                quote: quote_of(bits),
            },
            TAG_BRACKET_STRING => LineState::BracketString { fence: level },
            TAG_BRACKET_COMMENT => LineState::BracketComment { fence: level },
            TAG_ALT_LITERAL => LineState::AltLiteral,
            _ => LineState::Normal,
        }
    }
}

fn quote_flag(quote: Quote) -> u32 {
    match quote {
        Quote::Single => 0,
        Quote::Double => FLAG_DOUBLE,
    }
}

fn quote_of(bits: u32) -> Quote {
    if bits & FLAG_DOUBLE != 0 {
        Quote::Double
    } else {
        Quote::Single
    }
}
