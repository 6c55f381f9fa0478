//! The buffer collaborator: an immutable source snapshot the fragment
//! resolver reads from.

mod plain;
mod span;

pub use plain::PlainSource;
pub use span::{Span, SpanSet};

use crate::pin::Pin;
use rubyscope_api::{ConstructKind, Position, Scope};

/// The nearest definition-like construct around an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construct {
    pub kind: ConstructKind,
    /// Fully qualified namespace, e.g. `Foo::Bar`. Empty at top level.
    pub namespace: String,
    /// Local variable scope the construct opens: the namespace for classes
    /// and modules, `Foo#bar` or `Foo.bar` for methods.
    pub closure_path: String,
}

impl Construct {
    pub fn new(kind: ConstructKind, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            kind,
            closure_path: namespace.clone(),
            namespace,
        }
    }

    pub fn root() -> Self {
        Self::new(ConstructKind::Root, "")
    }

    pub fn with_closure_path(mut self, closure_path: impl Into<String>) -> Self {
        self.closure_path = closure_path.into();
        self
    }

    pub fn scope(&self) -> Scope {
        self.kind.scope()
    }
}

/// Smallest construct whose span strictly contains `offset`, or the root.
/// A cursor sitting on either edge of a definition is outside it.
pub fn innermost_construct(constructs: &[(Span, Construct)], offset: usize) -> Construct {
    constructs
        .iter()
        .filter(|(span, _)| span.begin < offset && offset < span.end)
        .min_by_key(|(span, _)| span.len())
        .map(|(_, construct)| construct.clone())
        .unwrap_or_else(Construct::root)
}

/// Read-only view of a parsed source snapshot.
///
/// Implementations must never change after construction: fragments borrow
/// the buffer and cache what they derive from it.
pub trait SourceBuffer {
    /// The full source text.
    fn code(&self) -> &str;

    /// Comment regions.
    fn comments(&self) -> &SpanSet;

    /// String literal regions, interpolated code excluded.
    fn strings(&self) -> &SpanSet;

    /// Nearest enclosing class, module or method around `offset`.
    fn enclosing_construct(&self, offset: usize) -> Construct;

    /// Type name of the literal expression ending right before `offset`
    /// (`String`, `Array`, `Hash`, `Integer`, ...), trailing whitespace
    /// skipped.
    fn literal_type_before(&self, _offset: usize) -> Option<String> {
        None
    }

    /// Start offset of the innermost syntax node at `offset`.
    fn node_start_at(&self, offset: usize) -> usize {
        offset
    }

    /// Every local variable declared in the buffer, in source order.
    fn local_variable_pins(&self) -> &[Pin];

    fn position_at(&self, offset: usize) -> Position {
        crate::util::position_at(self.code(), offset)
    }
}
