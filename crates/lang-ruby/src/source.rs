//! Tree-sitter backed source buffer.

use crate::inference::literal_type;
use crate::parser::{Regions, RubyParser, ScopeBuilder, ScopeIndex};
use rubyscope_core::error::Result;
use rubyscope_core::pin::Pin;
use rubyscope_core::source::innermost_construct;
use rubyscope_core::{Construct, SourceBuffer, SpanSet};
use tree_sitter::Tree;
use tracing::debug;

/// An immutable, parsed snapshot of one Ruby file.
pub struct RubySource {
    code: String,
    tree: Tree,
    regions: Regions,
    scopes: ScopeIndex,
}

impl RubySource {
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        RubyParser::new()?.parse(code)
    }

    pub(crate) fn from_tree(code: String, tree: Tree) -> Self {
        let root = tree.root_node();
        let regions = Regions::collect(&root);
        let scopes = ScopeBuilder::new(&code).build(&root);
        debug!(
            comments = regions.comments.spans().len(),
            strings = regions.strings.spans().len(),
            constructs = scopes.constructs.len(),
            locals = scopes.locals.len(),
            definitions = scopes.definitions.len(),
            "ruby source indexed"
        );
        Self {
            code,
            tree,
            regions,
            scopes,
        }
    }

    /// Namespaces, methods, and the instance, class and global variables
    /// and constants assigned in the file, in source order.
    pub fn definition_pins(&self) -> &[Pin] {
        &self.scopes.definitions
    }
}

impl SourceBuffer for RubySource {
    fn code(&self) -> &str {
        &self.code
    }

    fn comments(&self) -> &SpanSet {
        &self.regions.comments
    }

    fn strings(&self) -> &SpanSet {
        &self.regions.strings
    }

    fn enclosing_construct(&self, offset: usize) -> Construct {
        innermost_construct(&self.scopes.constructs, offset)
    }

    fn literal_type_before(&self, offset: usize) -> Option<String> {
        let end = self.code.get(..offset)?.trim_end().len();
        if end == 0 {
            return None;
        }
        let mut node = self
            .tree
            .root_node()
            .descendant_for_byte_range(end - 1, end)?;
        // Climb while the enclosing node still ends here: the closing quote of
        // a string belongs to the string node.
        loop {
            if node.end_byte() != end {
                return None;
            }
            if let Some(name) = literal_type(node.kind()) {
                return Some(name.to_string());
            }
            node = node.parent()?;
        }
    }

    /// Start of the token under the cursor. Between tokens the cursor itself
    /// is used, so a blank line does not report the whole enclosing body.
    fn node_start_at(&self, offset: usize) -> usize {
        match self
            .tree
            .root_node()
            .descendant_for_byte_range(offset, offset)
        {
            Some(node) if node.child_count() == 0 && node.start_byte() <= offset => {
                node.start_byte()
            }
            _ => offset,
        }
    }

    fn local_variable_pins(&self) -> &[Pin] {
        &self.scopes.locals
    }
}
