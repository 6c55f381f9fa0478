//! Word boundaries around the cursor, independent of the signature scan.

fn is_word_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

fn is_remainder_char(ch: u8) -> bool {
    is_word_char(ch) || ch == b'?' || ch == b'!'
}

/// Start offset of the word that ends at `offset`.
///
/// Words are `[A-Za-z0-9_]` runs that may end in `?` or `!` and may begin
/// with `@@`, `@`, `$`, or a `:` that is not half of `::`.
pub(crate) fn beginning_of_word_at(code: &[u8], offset: usize) -> usize {
    // One past the leftmost character accepted so far.
    let mut cursor = offset;
    if cursor > 0 && matches!(code[cursor - 1], b'?' | b'!') {
        cursor -= 1;
    }
    while cursor > 0 && is_word_char(code[cursor - 1]) {
        cursor -= 1;
    }

    if cursor > 0 {
        let prev = cursor - 1;
        if prev > 0 && code[prev - 1] == b'@' && code[prev] == b'@' {
            cursor -= 2;
        } else if matches!(code[prev], b'@' | b'$') {
            cursor -= 1;
        } else if code[prev] == b':' && (prev == 0 || code[prev - 1] != b':') {
            cursor -= 1;
        }
    }
    cursor
}

/// End offset of the identifier characters that follow `offset`.
pub(crate) fn end_of_word_at(code: &[u8], offset: usize) -> usize {
    let mut cursor = offset;
    while cursor < code.len() && is_remainder_char(code[cursor]) {
        cursor += 1;
    }
    cursor
}
