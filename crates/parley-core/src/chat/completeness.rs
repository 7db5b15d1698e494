//! Decides whether accumulated input is ready to be processed.
//!
//! Input is incomplete when it ends with a line-continuation backslash or
//! when its bracket counts do not balance. Only the counts matter: `)(` is
//! complete, `(` is not.

/// Marker at the end of a line that requests another input line.
pub const CONTINUATION_MARKER: char = '\\';

/// Returns `true` when `input` needs no further continuation lines.
pub fn is_complete(input: &str) -> bool {
    if input.ends_with(CONTINUATION_MARKER) {
        return false;
    }

    let mut braces: i64 = 0;
    let mut brackets: i64 = 0;
    let mut parens: i64 = 0;

    for c in input.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            '(' => parens += 1,
            ')' => parens -= 1,
            _ => {}
        }
    }

    braces == 0 && brackets == 0 && parens == 0
}
