//! Lua language definition

use crate::syntax::language::{Grammar, StringContinuation};
use crate::syntax::number::NumberFlavor;

/// Create the Lua grammar
pub fn lua_grammar() -> Grammar {
    let mut g = Grammar::new("Lua");
    g.add_extension("lua");
    g.add_interpreter("lua");

    g.add_keywords(&[
        "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto",
        "if", "in", "local", "nil", "not", "or", "repeat", "require", "return", "self",
        "then", "true", "until", "while",
    ]);

    g.number_flavor = NumberFlavor::Relaxed;
    g.line_comment = Some(('-', '-'));
    g.bracket_fences = true;
    g.string_continuation = StringContinuation::BackslashEol;
    // Calls also take a single string or table constructor argument
    g.call_openers = "('\"{".to_string();
    g
}
