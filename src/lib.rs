//! linetint - incremental per-line syntax colorization
//!
//! A line colorizer for editors and terminal tools. Each call to
//! [`Grammar::colorize_line`] scans one line and returns styled spans
//! plus the lexical state the next line starts in, so a document can be
//! colorized incrementally: only lines at or below an edit ever need
//! rescanning.
//!
//! ```
//! use linetint::syntax::{lua_grammar, LineState};
//!
//! let lua = lua_grammar();
//! let mut state = LineState::Normal;
//! for line in ["--[[ a comment", "spanning lines ]] local x = 1"] {
//!     let result = lua.colorize_line(line, state);
//!     state = result.end_state;
//!     for span in &result.spans {
//!         let _ = (span.start, span.end, span.token);
//!     }
//! }
//! assert!(state.is_normal());
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use config::Config;
pub use error::{Result, TintError};
pub use syntax::{Grammar, HighlightResult, LineState, Span, SyntaxManager, TokenType};
