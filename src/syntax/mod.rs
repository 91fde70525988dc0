//! Incremental syntax colorization
//!
//! The engine colorizes one line at a time. Each call takes the line
//! text, the lexical state the previous line ended in, and a grammar
//! descriptor; it returns styled spans plus the state the next line
//! starts in. Threading that state line to line colorizes a whole
//! document incrementally, without ever rescanning from the top.

mod builtin;
mod engine;
mod language;
mod manager;
mod number;
mod scan;
mod state;
mod style;
mod tokens;
mod words;

pub use builtin::{all_languages, groovy_grammar, haskell_grammar, lua_grammar};
pub use engine::HighlightResult;
pub use language::{BlockCommentRule, Grammar, StringContinuation};
pub use manager::{HighlightCache, SyntaxManager};
pub use number::NumberFlavor;
pub use state::{LineState, Quote};
pub use style::{Color, Style};
pub use tokens::{Span, TokenType};
