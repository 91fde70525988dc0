//! Identifier classification
//!
//! After the dispatcher accumulates a maximal identifier it is
//! classified here: keyword table, type table, a case-based type
//! heuristic, and a call-syntax lookahead that peeks past blanks
//! without moving the scan position.

use super::language::Grammar;
use super::scan::{is_blank, LineBuf, NUL};
use super::tokens::TokenType;

impl Grammar {
    pub(crate) fn is_ident_start(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || c == '_'
            || (self.dollar_idents && c == '$')
            || (self.unicode_idents && is_extended_letter(c))
    }

    pub(crate) fn is_ident_part(&self, c: char) -> bool {
        c.is_ascii_alphanumeric()
            || c == '_'
            || (self.unicode_idents && is_extended_letter(c))
            || (self.ident_apostrophe && c == '\'')
    }
}

/// Extended identifier letters: U+00C0..U+FFFE minus the multiplication
/// and division signs
pub(crate) fn is_extended_letter(c: char) -> bool {
    let u = c as u32;
    (0x00c0..=0xfffe).contains(&u) && c != '\u{00d7}' && c != '\u{00f7}'
}

/// Classify an identifier occupying `[start, end)` in the line.
///
/// `first` is the identifier's first character and `has_lower` reports
/// whether any continuation character was lowercase.
pub(crate) fn classify_identifier(
    grammar: &Grammar,
    buf: &LineBuf,
    start: usize,
    end: usize,
    word: &str,
    first: char,
    has_lower: bool,
) -> TokenType {
    // An identifier in member-access position is never a keyword or a
    // type: not directly after a dot, not before a single dot, and not
    // before a map-key colon
    let tables_apply = if grammar.member_access_gate {
        (start == 0 || buf.ch(start - 1) != '.')
            && (buf.ch(end) != '.' || buf.ch(end + 1) == '.')
            && buf.ch(end) != ':'
    } else {
        true
    };

    if tables_apply {
        if grammar.case_type_heuristic
            && first.is_uppercase()
            && has_lower
            && !call_follows(buf, end, &grammar.call_openers)
        {
            return TokenType::Type;
        }
        if grammar.types.contains(word) {
            return TokenType::Type;
        }
        if grammar.keywords.contains(word) {
            return TokenType::Keyword;
        }
    }

    if call_follows(buf, end, &grammar.call_openers) {
        return TokenType::Function;
    }
    TokenType::Default
}

/// Peek past blanks for a call opener. Never moves the scan position.
pub(crate) fn call_follows(buf: &LineBuf, mut i: usize, openers: &str) -> bool {
    while is_blank(buf.ch(i)) {
        i += 1;
    }
    let c = buf.ch(i);
    c != NUL && openers.contains(c)
}
