//! Backward signature scan.
//!
//! Walks from the cursor toward the start of the buffer, collecting the
//! dotted / `::` chain that ends at the cursor. Bracketed arguments are
//! dropped, string and comment regions come from the buffer's span index,
//! and nothing here ever fails: incomplete text just yields a shorter
//! signature.

use crate::source::SourceBuffer;

/// Signature text plus the offset where it starts in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignatureData {
    pub start: usize,
    pub signature: String,
}

#[derive(Debug, Default)]
struct Nesting {
    parens: i32,
    squares: i32,
    braces: i32,
}

impl Nesting {
    fn balanced(&self) -> bool {
        self.parens == 0 && self.squares == 0 && self.braces == 0
    }

    /// An opening bracket was crossed without its closer.
    fn unclosed(&self) -> bool {
        self.parens > 0 || self.squares > 0 || self.braces > 0
    }
}

fn is_blank(ch: u8) -> bool {
    matches!(ch, b' ' | b'\n' | b'\t' | b'\r')
}

fn is_signature_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, b':' | b'.' | b'_' | b'@' | b'$')
}

fn is_terminator(ch: u8) -> bool {
    matches!(ch, b'"' | b'\'' | b',' | b';' | b'%')
}

/// `%w[`, `%i[` and bare `%[` open percent literals, not index calls.
fn opens_percent_literal(code: &[u8], index: usize) -> bool {
    match index {
        0 => false,
        1 => code[0] == b'%',
        _ => {
            code[index - 1] == b'%'
                || (code[index - 2] == b'%' && code[index - 1].is_ascii_alphabetic())
        }
    }
}

fn leading_blanks(code: &[u8]) -> usize {
    code.iter().take_while(|&&b| is_blank(b)).count()
}

pub(crate) fn signature_at<B: SourceBuffer + ?Sized>(buffer: &B, offset: usize) -> SignatureData {
    let text = buffer.code();
    let code = text.as_bytes();
    let comments = buffer.comments();
    let strings = buffer.strings();

    let first = offset.checked_sub(1);
    let mut nesting = Nesting::default();
    // Built back to front, reversed at the end.
    let mut reversed: Vec<u8> = Vec::new();
    // Source index of the leftmost member collected so far.
    let mut head: Option<usize> = None;
    let mut in_whitespace = false;
    let mut start = 0;
    let mut index = offset;

    while index > 0 {
        index -= 1;

        if Some(index) != first && comments.covers(index) {
            start = index + 1;
            break;
        }
        let in_string = strings.covers(index);
        if in_string && !in_whitespace {
            continue;
        }

        let ch = code[index];
        if nesting.balanced() && is_blank(ch) {
            in_whitespace = true;
            continue;
        }
        if nesting.balanced() && in_whitespace {
            let rest = &code[index + 1..];
            let continues_chain = rest.get(leading_blanks(rest)) == Some(&b'.');
            if ch != b'.' && !continues_chain {
                start = index + 1 + leading_blanks(rest);
                break;
            }
        }
        if in_string {
            in_whitespace = false;
            continue;
        }

        match ch {
            b')' => nesting.parens -= 1,
            b']' => nesting.squares -= 1,
            b'}' => nesting.braces -= 1,
            b'(' => nesting.parens += 1,
            b'{' => nesting.braces += 1,
            b'[' => {
                nesting.squares += 1;
                if nesting.squares == 0 && !opens_percent_literal(code, index) {
                    reversed.extend_from_slice(b"][.");
                    head = Some(index);
                }
            }
            _ => {}
        }

        if nesting.balanced() {
            if is_terminator(ch) {
                start = index + 1;
                break;
            }
            if is_signature_char(ch) && (index == 0 || code[index - 1] != b'%') {
                reversed.push(ch);
                head = Some(index);
            }
            // A sigil ends the chain and stays part of it, so the start and
            // the phrase both begin on the sigil.
            if ch == b'$' {
                start = index;
                break;
            }
            if ch == b'@' {
                if index > 0 && code[index - 1] == b'@' {
                    reversed.push(b'@');
                    index -= 1;
                }
                start = index;
                break;
            }
        }
        // An opener without its closer: the chain began right after it.
        if nesting.unclosed() {
            start = index + 1;
            break;
        }
        in_whitespace = false;
    }

    let mut start = start.min(offset);
    while !text.is_char_boundary(start) {
        start += 1;
    }

    let mut signature: String = reversed.iter().rev().map(|&b| b as char).collect();
    if signature.starts_with('.') {
        if let Some(literal) = head.and_then(|h| buffer.literal_type_before(h)) {
            signature = format!("{literal}.new{signature}");
        }
    }

    SignatureData { start, signature }
}
