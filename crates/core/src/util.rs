use rubyscope_api::Position;

/// Convert a byte offset into a line / UTF-16 column position. Offsets past
/// the end clamp to the end of the text; offsets inside a multi-byte
/// character count the character as started.
pub fn position_at(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut col = 0;
    for (i, c) in text[line_start..].char_indices() {
        if line_start + i >= offset {
            break;
        }
        col += c.len_utf16();
    }
    Position::new(line, col)
}

/// Convert a line / UTF-16 column position back into a byte offset. Returns
/// `None` when the line does not exist; columns past the end of the line
/// clamp to the line end.
pub fn offset_at(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        let newline = text[line_start..].find('\n')?;
        line_start += newline + 1;
    }
    let line_end = text[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(text.len());
    Some(line_start + utf16_col_to_byte_col(&text[line_start..line_end], position.col))
}

pub fn utf16_col_to_byte_col(line_content: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line_content.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_counts_lines_and_columns() {
        let text = "foo\nbar.baz\n";
        assert_eq!(position_at(text, 0), Position::new(0, 0));
        assert_eq!(position_at(text, 3), Position::new(0, 3));
        assert_eq!(position_at(text, 4), Position::new(1, 0));
        assert_eq!(position_at(text, 11), Position::new(1, 7));
        assert_eq!(position_at(text, 12), Position::new(2, 0));
        assert_eq!(position_at(text, 99), Position::new(2, 0));
    }

    #[test]
    fn test_position_at_uses_utf16_columns() {
        // 'é' is two bytes and one UTF-16 unit, '😀' is four bytes and two units.
        let text = "é😀x";
        assert_eq!(position_at(text, 2), Position::new(0, 1));
        assert_eq!(position_at(text, 6), Position::new(0, 3));
    }

    #[test]
    fn test_offset_at_round_trips_positions() {
        let text = "a = 1\né = 😀.to_s\n";
        for offset in [0, 4, 6, 8, 11, 15] {
            assert!(text.is_char_boundary(offset));
            assert_eq!(offset_at(text, position_at(text, offset)), Some(offset));
        }
        assert_eq!(offset_at(text, Position::new(7, 0)), None);
    }
}
