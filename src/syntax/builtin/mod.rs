//! Built-in language definitions
//!
//! Grammar descriptors for the languages shipped with the engine.

mod groovy;
mod haskell;
mod lua;

pub use groovy::groovy_grammar;
pub use haskell::haskell_grammar;
pub use lua::lua_grammar;

use super::language::Grammar;

/// Get all built-in grammars
pub fn all_languages() -> Vec<Grammar> {
    vec![groovy_grammar(), lua_grammar(), haskell_grammar()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_languages_are_distinct() {
        let langs = all_languages();
        assert_eq!(langs.len(), 3);
        let mut names: Vec<_> = langs.iter().map(|g| g.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Groovy", "Haskell", "Lua"]);
    }

    #[test]
    fn test_every_language_has_extensions() {
        for lang in all_languages() {
            assert!(!lang.extensions.is_empty(), "{} has no extensions", lang.name);
        }
    }
}
