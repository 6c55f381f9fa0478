//! A parser-free buffer whose regions are supplied by the caller.
//!
//! Hosts without a syntax tree (or tests) describe comments, strings,
//! constructs and literals by hand.

use super::{Construct, SourceBuffer, Span, SpanSet, innermost_construct};
use crate::pin::Pin;
use rubyscope_api::ConstructKind;

#[derive(Debug, Clone, Default)]
pub struct PlainSource {
    code: String,
    comments: SpanSet,
    strings: SpanSet,
    constructs: Vec<(Span, Construct)>,
    literals: Vec<(usize, String)>,
    locals: Vec<Pin>,
}

impl PlainSource {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_comments(mut self, spans: Vec<Span>) -> Self {
        self.comments = SpanSet::new(spans);
        self
    }

    pub fn with_strings(mut self, spans: Vec<Span>) -> Self {
        self.strings = SpanSet::new(spans);
        self
    }

    pub fn with_construct(
        mut self,
        span: Span,
        kind: ConstructKind,
        namespace: impl Into<String>,
    ) -> Self {
        self.constructs.push((span, Construct::new(kind, namespace)));
        self
    }

    /// Like [`Self::with_construct`] for a construct built by the caller,
    /// e.g. a method with its own closure path.
    pub fn with_definition(mut self, span: Span, construct: Construct) -> Self {
        self.constructs.push((span, construct));
        self
    }

    /// Declare a literal of type `type_name` ending at byte `end`.
    pub fn with_literal(mut self, end: usize, type_name: impl Into<String>) -> Self {
        self.literals.push((end, type_name.into()));
        self
    }

    pub fn with_local(mut self, pin: Pin) -> Self {
        self.locals.push(pin);
        self
    }
}

impl SourceBuffer for PlainSource {
    fn code(&self) -> &str {
        &self.code
    }

    fn comments(&self) -> &SpanSet {
        &self.comments
    }

    fn strings(&self) -> &SpanSet {
        &self.strings
    }

    fn enclosing_construct(&self, offset: usize) -> Construct {
        innermost_construct(&self.constructs, offset)
    }

    fn literal_type_before(&self, offset: usize) -> Option<String> {
        let end = self
            .code
            .get(..offset)
            .unwrap_or(&self.code)
            .trim_end()
            .len();
        self.literals
            .iter()
            .find(|(literal_end, _)| *literal_end == end)
            .map(|(_, type_name)| type_name.clone())
    }

    fn local_variable_pins(&self) -> &[Pin] {
        &self.locals
    }
}
