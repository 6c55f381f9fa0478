use rubyscope_api::Range;
use rubyscope_core::Span;
use rubyscope_core::util::position_at;
use tree_sitter::Node;

pub fn span_of(node: &Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Range between two byte offsets, in line / UTF-16 columns. Tree-sitter
/// points count bytes, so they are not used directly.
pub fn range_between(code: &str, start: usize, end: usize) -> Range {
    Range::from_to(position_at(code, start), position_at(code, end))
}

pub fn range_of(code: &str, node: &Node) -> Range {
    range_between(code, node.start_byte(), node.end_byte())
}

pub fn text_of<'c>(code: &'c str, node: &Node) -> &'c str {
    node.utf8_text(code.as_bytes()).unwrap_or_default()
}
