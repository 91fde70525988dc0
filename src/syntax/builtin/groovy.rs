//! Groovy language definition

use crate::syntax::language::{BlockCommentRule, Grammar, StringContinuation};
use crate::syntax::number::NumberFlavor;

/// Create the Groovy grammar
pub fn groovy_grammar() -> Grammar {
    let mut g = Grammar::new("Groovy");
    g.add_extension("groovy");
    g.add_extension("gradle");
    g.add_interpreter("groovy");

    g.add_keywords(&[
        // language specific keywords
        "as", "def", "in", "trait",
        // documented java keywords
        "assert", "break", "case", "catch", "class", "const", "continue", "default", "do",
        "else", "enum", "extends", "final", "finally", "for", "goto", "if", "implements",
        "import", "instanceof", "interface", "new", "package", "return", "super", "switch",
        "this", "throw", "throws", "try", "while",
        // boolean and null literals
        "false", "null", "true",
        // other java keywords
        "abstract", "native", "private", "protected", "public", "static", "strictfp",
        "synchronized", "threadsafe", "transient", "volatile",
    ]);
    g.add_types(&[
        "void", "boolean", "byte", "char", "short", "int", "long", "double", "float",
    ]);

    g.number_flavor = NumberFlavor::Jvm;
    g.line_comment = Some(('/', '/'));
    g.block_comment = Some(BlockCommentRule {
        open: ('/', '*'),
        close: ('*', '/'),
        nested: false,
        doc_marker: None,
    });
    g.triple_strings = true;
    g.dollar_slashy = true;
    g.tilde_regex = true;
    g.string_continuation = StringContinuation::Always;
    g.unicode_idents = true;
    g.dollar_idents = true;
    g.member_access_gate = true;
    g.case_type_heuristic = true;
    g.annotations = true;
    g.hash_bang = true;
    g
}
