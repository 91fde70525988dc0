//! Numeric literal scanner
//!
//! Recognizes the maximal numeric literal starting at a given position
//! and reports its consumed length: positive when the literal is well
//! formed, negative when it is malformed. A malformed literal still
//! consumes the whole alphanumeric run so the dispatcher never rescans
//! those characters as something else.
//!
//! Scanning is deliberately relaxed at end of line: a truncated but
//! plausible prefix (`0x`, `1e`, `1_`) is accepted as well formed, so a
//! literal being typed character by character is never flashed as an
//! error mid-entry.

use super::scan::{is_bin, is_bin_sep, is_dec, is_dec_sep, is_hex, is_hex_sep, is_oct, is_word, LineBuf, NUL};

/// Which numeric-literal grammar a language uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFlavor {
    /// Full JVM-style grammar: binary/octal/hex/decimal integers with
    /// `_` digit separators and `g`/`l`/`i` suffixes, decimal and hex
    /// floats with exponents and `d`/`f` suffixes. A dot joins the
    /// number only when a digit follows, so `1.toString()` and `1..5`
    /// leave the dot alone. Malformed forms report a negative length.
    #[default]
    Jvm,
    /// `0o`/`0x` prefixed integers and decimal floats with exponents;
    /// a dot needs a following digit. Never reports malformed.
    Prefix,
    /// Maximal run of alphanumerics and dots. Never reports malformed.
    Relaxed,
}

/// Scan the literal starting at `start` (a digit, or a dot for grammars
/// that accept one before a digit). Returns the signed consumed length.
pub(crate) fn scan_number(buf: &LineBuf, start: usize, flavor: NumberFlavor) -> isize {
    match flavor {
        NumberFlavor::Jvm => scan_jvm(buf, start),
        NumberFlavor::Prefix => scan_prefix(buf, start),
        NumberFlavor::Relaxed => scan_relaxed(buf, start),
    }
}

fn scan_relaxed(buf: &LineBuf, start: usize) -> isize {
    let mut j = start + 1;
    while buf.ch(j).is_ascii_alphanumeric() || buf.ch(j) == '.' {
        j += 1;
    }
    (j - start) as isize
}

fn scan_prefix(buf: &LineBuf, start: usize) -> isize {
    let mut j = start + 1;
    if buf.ch(start) == '0' && buf.ch(j).to_ascii_lowercase() == 'o' {
        j += 1;
        while is_oct(buf.ch(j)) {
            j += 1;
        }
    } else if buf.ch(start) == '0' && buf.ch(j).to_ascii_lowercase() == 'x' {
        j += 1;
        while is_hex(buf.ch(j)) {
            j += 1;
        }
    } else {
        while is_dec(buf.ch(j)) {
            j += 1;
        }
        if buf.ch(j) == '.' && is_dec(buf.ch(j + 1)) {
            j += 2;
            while is_dec(buf.ch(j)) {
                j += 1;
            }
            if buf.ch(j).to_ascii_lowercase() == 'e' {
                let mut k = j + 1;
                if matches!(buf.ch(k), '+' | '-') {
                    k += 1;
                }
                if is_dec(buf.ch(k)) {
                    j = k + 1;
                    while is_dec(buf.ch(j)) {
                        j += 1;
                    }
                }
            }
        }
    }
    (j - start) as isize
}

fn scan_jvm(buf: &LineBuf, start: usize) -> isize {
    let end = match jvm_body(buf, start) {
        Ok(j) if !is_word(buf.ch(j)) => return (j - start) as isize,
        Ok(j) | Err(j) => j,
    };
    // Malformed: swallow the rest of the alphanumeric run
    let mut j = end;
    while is_word(buf.ch(j)) {
        j += 1;
    }
    -((j - start) as isize)
}

fn is_int_suffix(c: char) -> bool {
    matches!(c, 'g' | 'l' | 'i' | 'G' | 'L' | 'I')
}

fn is_float_suffix(c: char) -> bool {
    matches!(c, 'd' | 'f' | 'D' | 'F')
}

/// Core of the JVM-flavor grammar. `Ok(j)` is the end of a well-formed
/// literal, `Err(j)` the position where the literal went wrong.
fn jvm_body(buf: &LineBuf, start: usize) -> Result<usize, usize> {
    let mut j = start;
    let c = buf.ch(j);
    j += 1;

    let mut octal = false;
    let mut nonoctal = false;
    let mut isfloat = false;

    if c == '0' {
        match buf.ch(j) {
            'b' | 'B' => {
                j += 1;
                if buf.ch(j) == NUL {
                    return Ok(j);
                }
                if !is_bin(buf.ch(j)) {
                    return Err(j);
                }
                j += 1;
                while is_bin_sep(buf.ch(j)) {
                    j += 1;
                }
                if buf.ch(j) == NUL {
                    return Ok(j);
                }
                if buf.ch(j - 1) == '_' {
                    return Err(j);
                }
                if is_int_suffix(buf.ch(j)) {
                    j += 1;
                }
                return Ok(j);
            }
            'x' | 'X' => {
                j += 1;
                if buf.ch(j) == NUL {
                    return Ok(j);
                }
                if buf.ch(j) != '.' {
                    if !is_hex(buf.ch(j)) {
                        return Err(j);
                    }
                    j += 1;
                    while is_hex_sep(buf.ch(j)) {
                        j += 1;
                    }
                    if buf.ch(j) == NUL {
                        return Ok(j);
                    }
                    if buf.ch(j - 1) == '_' {
                        return Err(j);
                    }
                    if is_int_suffix(buf.ch(j)) {
                        return Ok(j + 1);
                    }
                }
                if buf.ch(j) == '.' || matches!(buf.ch(j), 'p' | 'P') {
                    if buf.ch(j) == '.' {
                        // "0x." with no hex digits is malformed; a dot
                        // with no digit after a hex integer is member
                        // access, not part of the number
                        if j == start + 2 && !is_hex(buf.ch(j + 1)) {
                            return Err(j);
                        }
                        if !is_hex(buf.ch(j + 1)) {
                            return Ok(j);
                        }
                        j += 1;
                        while is_hex_sep(buf.ch(j)) {
                            j += 1;
                        }
                    }
                    if buf.ch(j) == NUL {
                        return Ok(j);
                    }
                    if !matches!(buf.ch(j), 'p' | 'P') {
                        return Err(j);
                    }
                    j += 1;
                    if matches!(buf.ch(j), '+' | '-') {
                        j += 1;
                    }
                    if buf.ch(j) == NUL {
                        return Ok(j);
                    }
                    if !is_dec(buf.ch(j)) {
                        return Err(j);
                    }
                    j += 1;
                    while is_dec_sep(buf.ch(j)) {
                        j += 1;
                    }
                    if buf.ch(j - 1) == '_' {
                        return Err(j);
                    }
                }
                if is_float_suffix(buf.ch(j)) {
                    j += 1;
                }
                return Ok(j);
            }
            _ => octal = true,
        }
    } else if c == '.' {
        j -= 1;
    }

    // Decimal (or possibly octal) digit run
    while is_dec_sep(buf.ch(j)) {
        if matches!(buf.ch(j), '8' | '9') {
            nonoctal = true;
        }
        j += 1;
    }
    if buf.ch(j) == NUL {
        return Ok(j);
    }
    if j > start && buf.ch(j - 1) == '_' {
        return Err(j);
    }

    if buf.ch(j) == '.' {
        // The dot joins the number only when a digit follows
        if !is_dec(buf.ch(j + 1)) {
            return Ok(j);
        }
        j += 1;
        isfloat = true;
        j += 1;
        while is_dec_sep(buf.ch(j)) {
            j += 1;
        }
        if buf.ch(j) == NUL {
            return Ok(j);
        }
        if buf.ch(j - 1) == '_' {
            return Err(j);
        }
    }

    if matches!(buf.ch(j), 'e' | 'E') {
        j += 1;
        isfloat = true;
        if matches!(buf.ch(j), '+' | '-') {
            j += 1;
        }
        if buf.ch(j) == NUL {
            return Ok(j);
        }
        if !is_dec(buf.ch(j)) {
            return Err(j);
        }
        j += 1;
        while is_dec_sep(buf.ch(j)) {
            j += 1;
        }
        if buf.ch(j) == NUL {
            return Ok(j);
        }
        if buf.ch(j - 1) == '_' {
            return Err(j);
        }
    }

    if is_float_suffix(buf.ch(j)) {
        return Ok(j + 1);
    }
    if buf.ch(j) == NUL {
        return Ok(j);
    }
    if !isfloat {
        if octal && nonoctal {
            return Err(j);
        }
        if is_int_suffix(buf.ch(j)) {
            j += 1;
        }
    }
    Ok(j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jvm(text: &str) -> isize {
        scan_number(&LineBuf::new(text), 0, NumberFlavor::Jvm)
    }

    fn prefix(text: &str) -> isize {
        scan_number(&LineBuf::new(text), 0, NumberFlavor::Prefix)
    }

    fn relaxed(text: &str) -> isize {
        scan_number(&LineBuf::new(text), 0, NumberFlavor::Relaxed)
    }

    #[test]
    fn test_decimal_integers() {
        assert_eq!(jvm("42"), 2);
        assert_eq!(jvm("42;"), 2);
        assert_eq!(jvm("1_000"), 5);
        assert_eq!(jvm("1_000_000 "), 9);
        assert_eq!(jvm("7L"), 2);
        assert_eq!(jvm("7g;"), 2);
    }

    #[test]
    fn test_trailing_separator_is_malformed() {
        assert_eq!(jvm("1_;"), -2);
        assert_eq!(jvm("1_000_ "), -6);
    }

    #[test]
    fn test_trailing_separator_at_eol_is_permissive() {
        // Mid-typing: "1_" is a plausible prefix of "1_000"
        assert_eq!(jvm("1_"), 2);
    }

    #[test]
    fn test_floats() {
        assert_eq!(jvm("3.25"), 4);
        assert_eq!(jvm("3.25e10;"), 7);
        assert_eq!(jvm("3.25E-1 "), 7);
        assert_eq!(jvm("1e5"), 3);
        assert_eq!(jvm("2.5f"), 4);
        assert_eq!(jvm("6d;"), 2);
        assert_eq!(jvm("1e+"), 3); // truncated exponent at end of line
        assert_eq!(jvm("1e+;"), -3);
    }

    #[test]
    fn test_dot_followed_by_non_digit_is_not_consumed() {
        assert_eq!(jvm("1.toString()"), 1);
        assert_eq!(jvm("1..5"), 1);
        assert_eq!(jvm("3."), 1);
    }

    #[test]
    fn test_binary() {
        assert_eq!(jvm("0b1010"), 6);
        assert_eq!(jvm("0b10_10L;"), 8);
        assert_eq!(jvm("0b102"), -5);
        assert_eq!(jvm("0b2"), -3);
        assert_eq!(jvm("0b"), 2); // truncated at end of line
        assert_eq!(jvm("0b1_;"), -4);
    }

    #[test]
    fn test_octal() {
        assert_eq!(jvm("0755 "), 4);
        assert_eq!(jvm("0755;"), 4);
        assert_eq!(jvm("0778;"), -4);
        assert_eq!(jvm("0789 "), -4);
        // 8/9 are fine once the literal turns float
        assert_eq!(jvm("09.5 "), 4);
    }

    #[test]
    fn test_hex() {
        assert_eq!(jvm("0xFF"), 4);
        assert_eq!(jvm("0xdead_beefL;"), 12);
        assert_eq!(jvm("0x"), 2); // truncated
        assert_eq!(jvm("0xg"), -3);
        assert_eq!(jvm("0x1_;"), -4);
    }

    #[test]
    fn test_hex_floats() {
        assert_eq!(jvm("0x1.8p3"), 7);
        assert_eq!(jvm("0x1.8p3;"), 7);
        assert_eq!(jvm("0x1p-2 "), 6);
        assert_eq!(jvm("0x.8p2;"), 6);
        // Hex integer then member access
        assert_eq!(jvm("0xff.toString"), 4);
        // Fraction without an exponent is malformed
        assert_eq!(jvm("0x1.8;"), -5);
    }

    #[test]
    fn test_malformed_consumes_whole_run() {
        // The dispatcher must skip the same characters either way
        assert_eq!(jvm("0b102xyz "), -8);
        assert_eq!(jvm("12abc;"), -5);
    }

    #[test]
    fn test_prefix_flavor() {
        assert_eq!(prefix("42"), 2);
        assert_eq!(prefix("0o755"), 5);
        assert_eq!(prefix("0O7"), 3);
        assert_eq!(prefix("0xFF"), 4);
        assert_eq!(prefix("3.14"), 4);
        assert_eq!(prefix("3.14e2"), 6);
        assert_eq!(prefix("6.02e+23"), 8);
        // A dot needs a digit after it
        assert_eq!(prefix("2.x"), 1);
        // Exponent without digits is left alone
        assert_eq!(prefix("1.5ex"), 3);
    }

    #[test]
    fn test_relaxed_flavor() {
        assert_eq!(relaxed("42"), 2);
        assert_eq!(relaxed("0x1F"), 4);
        assert_eq!(relaxed("1.5e3"), 5);
        // Relaxed never reports malformed
        assert_eq!(relaxed("12abc"), 5);
    }

    #[test]
    fn test_scan_at_offset() {
        let buf = LineBuf::new("x = 0b102;");
        assert_eq!(scan_number(&buf, 4, NumberFlavor::Jvm), -5);
    }
}
