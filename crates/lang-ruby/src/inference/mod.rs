//! Static type inference for Ruby locals.

pub mod literal;

use crate::parser::RubyParser;
use rubyscope_core::error::Result;
use rubyscope_core::pin::{LocalVariable, StaticTypeInference};
use rubyscope_core::types::ComplexType;
use tracing::debug;

pub use literal::{expression_type, literal_type};

/// Infers a local's type from the shape of its assigned expression: a
/// literal gives its core class, `Foo.new` gives `Foo`. Locals without an
/// assignment keep their declared type.
#[derive(Clone)]
pub struct AssignmentInference {
    parser: RubyParser,
}

impl AssignmentInference {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: RubyParser::new()?,
        })
    }

    pub fn with_parser(parser: RubyParser) -> Self {
        Self { parser }
    }

    fn infer_assignment(&self, assignment: &str) -> Option<String> {
        let tree = self.parser.parse_tree(assignment).ok()?;
        let root = tree.root_node();
        if root.named_child_count() != 1 {
            return None;
        }
        expression_type(&root.named_child(0)?, assignment)
    }
}

impl StaticTypeInference for AssignmentInference {
    fn infer(&self, pin: &LocalVariable) -> ComplexType {
        let Some(assignment) = pin.assignment() else {
            return pin.static_type().clone();
        };
        match self.infer_assignment(assignment) {
            Some(name) => ComplexType::simple(name),
            None => {
                debug!(name = pin.name(), assignment, "assignment shape not inferable");
                pin.static_type().clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubyscope_api::Range;
    use rubyscope_core::pin::Variable;

    fn local(assignment: Option<&str>) -> LocalVariable {
        let mut variable = Variable::new("x", "Foo#bar");
        if let Some(text) = assignment {
            variable = variable.with_assignment(text);
        }
        LocalVariable::new(variable, Range::default())
    }

    #[test]
    fn test_infers_from_assignment_shape() {
        let inference = AssignmentInference::new().unwrap();
        assert_eq!(inference.infer(&local(Some("'hi'"))).to_string(), "String");
        assert_eq!(inference.infer(&local(Some("Set.new([1])"))).to_string(), "Set");
        assert!(inference.infer(&local(Some("compute(1)"))).is_undefined());
        assert!(inference.infer(&local(None)).is_undefined());
    }
}
