//! Haskell language definition

use crate::syntax::language::{BlockCommentRule, Grammar, StringContinuation};
use crate::syntax::number::NumberFlavor;

/// Characters that form operator runs
const SYMBOL_CHARS: &str = "!#$%&+./<=>?@\\^|-~:";

/// Create the Haskell grammar
pub fn haskell_grammar() -> Grammar {
    let mut g = Grammar::new("Haskell");
    g.add_extension("hs");
    g.add_extension("haskell");
    g.add_interpreter("runhaskell");

    g.add_keywords(&[
        "_", "case", "class", "data", "default", "deriving", "do", "else", "foreign", "if",
        "import", "in", "infix", "infixl", "infixr", "instance", "let", "module", "newtype",
        "of", "then", "type", "where", "as", "qualified", "return", "True", "False",
    ]);

    g.number_flavor = NumberFlavor::Prefix;
    g.line_comment = Some(('-', '-'));
    // `-->` and friends are operators, not comments
    g.line_comment_guard = true;
    g.block_comment = Some(BlockCommentRule {
        open: ('{', '-'),
        close: ('-', '}'),
        nested: true,
        doc_marker: Some('#'),
    });
    g.string_continuation = StringContinuation::Gap;
    g.control_escapes = true;
    g.ident_apostrophe = true;
    g.operator_chars = Some(SYMBOL_CHARS.to_string());
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::state::{LineState, Quote};
    use crate::syntax::tokens::{Span, TokenType};

    #[test]
    fn test_haskell_line_comment() {
        let g = haskell_grammar();
        let result = g.colorize_line("x = 1 -- note", LineState::Normal);
        let last = result.spans.last().unwrap();
        assert_eq!(*last, Span::new(6, 13, TokenType::Comment));
    }

    #[test]
    fn test_haskell_arrow_is_an_operator() {
        let g = haskell_grammar();
        let result = g.colorize_line("f :: a --> b", LineState::Normal);
        assert!(result.spans.iter().all(|s| s.token != TokenType::Comment));
        assert!(result
            .spans
            .iter()
            .any(|s| *s == Span::new(7, 10, TokenType::Operator)));
    }

    #[test]
    fn test_haskell_nested_comments() {
        let g = haskell_grammar();
        let open = g.colorize_line("{- outer {- inner", LineState::Normal);
        assert_eq!(
            open.end_state,
            LineState::BlockComment {
                level: 2,
                doc: false
            }
        );

        // One close only pops one level
        let mid = g.colorize_line("-} still", open.end_state);
        assert_eq!(
            mid.end_state,
            LineState::BlockComment {
                level: 1,
                doc: false
            }
        );

        let done = g.colorize_line("out -} code", mid.end_state);
        assert_eq!(done.spans[0], Span::new(0, 6, TokenType::Comment));
        assert!(done.end_state.is_normal());
    }

    #[test]
    fn test_haskell_pragma_comment() {
        let g = haskell_grammar();
        let result = g.colorize_line("{-# LANGUAGE GADTs #-} x", LineState::Normal);
        assert_eq!(result.spans[0], Span::new(0, 22, TokenType::DocComment));
        assert!(result.end_state.is_normal());

        let open = g.colorize_line("{-# INLINE", LineState::Normal);
        assert_eq!(
            open.end_state,
            LineState::BlockComment {
                level: 1,
                doc: true
            }
        );
        let done = g.colorize_line("frob #-}", open.end_state);
        assert_eq!(done.spans[0], Span::new(0, 8, TokenType::DocComment));
        assert!(done.end_state.is_normal());
    }

    #[test]
    fn test_haskell_string_gap() {
        let g = haskell_grammar();
        let open = g.colorize_line("s = \"two \\", LineState::Normal);
        assert_eq!(
            open.end_state,
            LineState::QuoteString {
                quote: Quote::Double
            }
        );
        // The resumed line skips blanks and the pairing backslash
        let done = g.colorize_line("   \\lines\" ++ t", open.end_state);
        assert_eq!(done.spans[0], Span::new(0, 10, TokenType::String));
        assert!(done.end_state.is_normal());
    }

    #[test]
    fn test_haskell_char_literal_does_not_carry() {
        let g = haskell_grammar();
        let result = g.colorize_line("c = 'x\\", LineState::Normal);
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_haskell_control_escape() {
        let g = haskell_grammar();
        // \^X is a two-character escape inside the string
        let result = g.colorize_line("s = \"a\\^Gb\" ++ t", LineState::Normal);
        assert_eq!(result.spans[0], Span::new(4, 11, TokenType::String));
        assert!(result.end_state.is_normal());
    }

    #[test]
    fn test_haskell_primed_identifier() {
        let g = haskell_grammar();
        let result = g.colorize_line("go' (x)", LineState::Normal);
        // go' is one identifier followed by call syntax
        assert_eq!(result.spans[0], Span::new(0, 3, TokenType::Function));
    }

    #[test]
    fn test_haskell_keywords_and_numbers() {
        let g = haskell_grammar();
        let result = g.colorize_line("let n = 0o755 + 6.02e23", LineState::Normal);
        assert_eq!(result.spans[0], Span::new(0, 3, TokenType::Keyword));
        assert!(result
            .spans
            .iter()
            .any(|s| *s == Span::new(8, 13, TokenType::Number)));
        assert!(result
            .spans
            .iter()
            .any(|s| *s == Span::new(16, 23, TokenType::Number)));
    }

    #[test]
    fn test_haskell_operator_runs() {
        let g = haskell_grammar();
        let result = g.colorize_line("a >>= b", LineState::Normal);
        assert_eq!(result.spans[0], Span::new(2, 5, TokenType::Operator));
    }
}
