//! Grammar descriptors
//!
//! A `Grammar` is the static configuration for one language: its
//! keyword and type tables plus the lexical feature switches the
//! scanning engine consults. The engine itself holds no per-language
//! code; everything language-specific lives here and in the builtin
//! definitions.

use std::collections::HashSet;

use super::number::NumberFlavor;

/// Block comment delimiters and behavior
#[derive(Debug, Clone)]
pub struct BlockCommentRule {
    /// Two-character opening marker
    pub open: (char, char),
    /// Two-character closing marker
    pub close: (char, char),
    /// Whether inner open markers nest (each one needs its own close)
    pub nested: bool,
    /// Extra marker directly after the opener that switches the comment
    /// to its documentation/directive styling
    pub doc_marker: Option<char>,
}

/// How an unterminated quote string behaves at end of line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringContinuation {
    /// The string ends at the line break
    #[default]
    None,
    /// The string always carries over to the next line
    Always,
    /// Only a trailing backslash (or `\z`) carries the string over
    BackslashEol,
    /// A trailing backslash on a double-quoted string opens a gap; the
    /// resumed line skips blanks and a closing gap backslash
    Gap,
}

/// A complete lexical description of one language
///
/// Owned by the caller and read-only to the engine; every scan receives
/// the grammar explicitly, so independent callers can colorize
/// concurrently without shared mutable state.
pub struct Grammar {
    /// Language name (e.g., "Lua", "Haskell")
    pub name: String,
    /// File extensions (e.g., ["lua"])
    pub extensions: Vec<String>,
    /// Interpreter names recognized in a shebang line
    pub interpreters: Vec<String>,
    /// Keyword table
    pub keywords: HashSet<String>,
    /// Type-name table
    pub types: HashSet<String>,
    /// Numeric literal grammar
    pub number_flavor: NumberFlavor,

    /// Two-character line comment marker ("--", "//")
    pub line_comment: Option<(char, char)>,
    /// The line-comment marker only counts when the next character is
    /// not an operator character (so `-->` stays an operator run)
    pub line_comment_guard: bool,
    /// Block comment rule, if the language has block comments
    pub block_comment: Option<BlockCommentRule>,
    /// `[=*[ ... ]=*]` fenced literals; with the line-comment marker in
    /// front they form fenced comments
    pub bracket_fences: bool,
    /// Triple-quoted long strings
    pub triple_strings: bool,
    /// `$/ ... /$` literals where `$` escapes the next character
    pub dollar_slashy: bool,
    /// `~ /.../` regex literals (single-line)
    pub tilde_regex: bool,
    /// End-of-line behavior for unterminated quote strings
    pub string_continuation: StringContinuation,
    /// `\^X` two-character control escapes inside strings
    pub control_escapes: bool,
    /// Apostrophes continue identifiers (foo')
    pub ident_apostrophe: bool,
    /// Identifiers may use extended Unicode letters
    pub unicode_idents: bool,
    /// `$` starts an identifier
    pub dollar_idents: bool,
    /// Characters that open call syntax for the function heuristic
    pub call_openers: String,
    /// Suppress keyword/type classification around member access
    /// (after `.`, before a single `.`, before `:`)
    pub member_access_gate: bool,
    /// Uppercase start plus a lowercase letter classifies as a type
    /// when not followed by call syntax
    pub case_type_heuristic: bool,
    /// Characters whose runs are styled as operators
    pub operator_chars: Option<String>,
    /// `@Name` annotations styled as preprocessor
    pub annotations: bool,
    /// `#!` on the first line styled as preprocessor
    pub hash_bang: bool,
    /// Name of a delegate mode for behavior this grammar does not own
    /// (indentation and the like); resolved by the manager, never
    /// implemented here
    pub fallback: Option<String>,
}

impl Grammar {
    /// Create a new grammar with no features enabled
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            interpreters: Vec::new(),
            keywords: HashSet::new(),
            types: HashSet::new(),
            number_flavor: NumberFlavor::default(),
            line_comment: None,
            line_comment_guard: false,
            block_comment: None,
            bracket_fences: false,
            triple_strings: false,
            dollar_slashy: false,
            tilde_regex: false,
            string_continuation: StringContinuation::default(),
            control_escapes: false,
            ident_apostrophe: false,
            unicode_idents: false,
            dollar_idents: false,
            call_openers: "(".to_string(),
            member_access_gate: false,
            case_type_heuristic: false,
            operator_chars: None,
            annotations: false,
            hash_bang: false,
            fallback: None,
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a shebang interpreter name
    pub fn add_interpreter(&mut self, name: &str) {
        self.interpreters.push(name.to_string());
    }

    /// Add words to the keyword table
    pub fn add_keywords(&mut self, words: &[&str]) {
        self.keywords.extend(words.iter().map(|w| w.to_string()));
    }

    /// Add words to the type table
    pub fn add_types(&mut self, words: &[&str]) {
        self.types.extend(words.iter().map(|w| w.to_string()));
    }
}
