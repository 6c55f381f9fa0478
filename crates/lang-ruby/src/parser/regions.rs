//! Comment and string regions of a syntax tree.
//!
//! Interpolated code (`#{...}`) is cut out of the string region around it,
//! so a cursor inside an interpolation is treated as code. Strings nested in
//! the interpolation are regions of their own.

use super::utils::span_of;
use rubyscope_core::{Span, SpanSet};
use tree_sitter::{Node, TreeCursor};

const STRING_KINDS: &[&str] = &[
    "string",
    "heredoc_body",
    "subshell",
    "regex",
    "string_array",
    "symbol_array",
    "delimited_symbol",
    "character",
];

#[derive(Debug, Clone, Default)]
pub(crate) struct Regions {
    pub comments: SpanSet,
    pub strings: SpanSet,
}

impl Regions {
    pub fn collect(root: &Node) -> Self {
        let mut collector = Collector::default();
        let mut cursor = root.walk();
        collector.visit_node(root, &mut cursor);
        Self {
            comments: SpanSet::new(collector.comments),
            strings: SpanSet::new(collector.strings),
        }
    }
}

#[derive(Default)]
struct Collector {
    comments: Vec<Span>,
    strings: Vec<Span>,
}

impl Collector {
    fn visit_node(&mut self, node: &Node, cursor: &mut TreeCursor) {
        let kind = node.kind();
        if kind == "comment" {
            self.comments.push(span_of(node));
            return;
        }
        if STRING_KINDS.contains(&kind) {
            self.push_string(node);
            return;
        }

        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                self.visit_node(&child, cursor);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn push_string(&mut self, node: &Node) {
        let mut holes = Vec::new();
        find_interpolations(node, &mut holes);

        let mut begin = node.start_byte();
        for hole in holes {
            self.strings.push(Span::new(begin, hole.start_byte()));
            begin = hole.end_byte();
            let mut cursor = hole.walk();
            self.visit_node(&hole, &mut cursor);
        }
        self.strings.push(Span::new(begin, node.end_byte()));
    }
}

/// Outermost interpolation nodes below `node`, in source order.
fn find_interpolations<'t>(node: &Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "interpolation" {
            out.push(child);
        } else {
            find_interpolations(&child, out);
        }
    }
}
