//! Declaration records ("pins").
//!
//! Pins are a closed set of declaration kinds. Merge and visibility are
//! plain functions over the variant; a variable's effective type is never
//! stored here, see [`typify`].

pub mod typify;

use crate::types::ComplexType;
use rubyscope_api::{Position, Range, Scope};
use serde::{Deserialize, Serialize};

pub use typify::{
    DeclaredTypeInference, StaticTypeInference, effective_type, infer_type_from_runtime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceKind {
    Class,
    Module,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinKind {
    Namespace,
    Method,
    LocalVariable,
    InstanceVariable,
    ClassVariable,
    GlobalVariable,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespacePin {
    pub name: String,
    pub closure_path: String,
    pub location: Option<Range>,
    pub kind: NamespaceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodPin {
    pub name: String,
    pub closure_path: String,
    pub location: Option<Range>,
    pub scope: Scope,
    pub parameters: Vec<String>,
}

/// Shared shape of every variable-like declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    /// Path of the enclosing construct, e.g. `Foo#bar`.
    pub closure_path: String,
    pub location: Option<Range>,
    /// Source text of the assigned expression, if any.
    pub assignment: Option<String>,
    /// Type declared or inferred without running the code.
    pub static_type: ComplexType,
}

impl Variable {
    pub fn new(name: impl Into<String>, closure_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            closure_path: closure_path.into(),
            location: None,
            assignment: None,
            static_type: ComplexType::Undefined,
        }
    }

    pub fn with_location(mut self, location: Range) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_assignment(mut self, assignment: impl Into<String>) -> Self {
        self.assignment = Some(assignment.into());
        self
    }

    pub fn with_static_type(mut self, ty: ComplexType) -> Self {
        self.static_type = ty;
        self
    }

    fn same_declaration(&self, other: &Variable) -> bool {
        self.name == other.name
            && self.closure_path == other.closure_path
            && self.assignment == other.assignment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalVariable {
    pub variable: Variable,
    /// Where the variable can be seen from.
    pub presence: Range,
}

impl LocalVariable {
    pub fn new(variable: Variable, presence: Range) -> Self {
        Self { variable, presence }
    }

    pub fn name(&self) -> &str {
        &self.variable.name
    }

    pub fn closure_path(&self) -> &str {
        &self.variable.closure_path
    }

    pub fn static_type(&self) -> &ComplexType {
        &self.variable.static_type
    }

    pub fn assignment(&self) -> Option<&str> {
        self.variable.assignment.as_deref()
    }

    pub fn visible_from(&self, position: Position) -> bool {
        self.presence.contains_position(position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pin", rename_all = "snake_case")]
pub enum Pin {
    Namespace(NamespacePin),
    Method(MethodPin),
    LocalVariable(LocalVariable),
    InstanceVariable(Variable),
    ClassVariable(Variable),
    GlobalVariable(Variable),
    Constant(Variable),
}

impl Pin {
    pub fn kind(&self) -> PinKind {
        match self {
            Pin::Namespace(_) => PinKind::Namespace,
            Pin::Method(_) => PinKind::Method,
            Pin::LocalVariable(_) => PinKind::LocalVariable,
            Pin::InstanceVariable(_) => PinKind::InstanceVariable,
            Pin::ClassVariable(_) => PinKind::ClassVariable,
            Pin::GlobalVariable(_) => PinKind::GlobalVariable,
            Pin::Constant(_) => PinKind::Constant,
        }
    }

    fn variable(&self) -> Option<&Variable> {
        match self {
            Pin::LocalVariable(local) => Some(&local.variable),
            Pin::InstanceVariable(v)
            | Pin::ClassVariable(v)
            | Pin::GlobalVariable(v)
            | Pin::Constant(v) => Some(v),
            Pin::Namespace(_) | Pin::Method(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Pin::Namespace(ns) => &ns.name,
            Pin::Method(method) => &method.name,
            _ => self.variable().map_or("", |v| v.name.as_str()),
        }
    }

    pub fn closure_path(&self) -> &str {
        match self {
            Pin::Namespace(ns) => &ns.closure_path,
            Pin::Method(method) => &method.closure_path,
            _ => self.variable().map_or("", |v| v.closure_path.as_str()),
        }
    }

    pub fn location(&self) -> Option<Range> {
        match self {
            Pin::Namespace(ns) => ns.location,
            Pin::Method(method) => method.location,
            _ => self.variable().and_then(|v| v.location),
        }
    }

    /// Fully qualified path: `Foo::Bar` for namespaces, `Foo#bar` or
    /// `Foo.bar` for methods, the bare name for variables.
    pub fn path(&self) -> String {
        match self {
            Pin::Namespace(ns) if ns.closure_path.is_empty() => ns.name.clone(),
            Pin::Namespace(ns) => format!("{}::{}", ns.closure_path, ns.name),
            Pin::Method(method) => {
                let separator = match method.scope {
                    Scope::InstanceLevel => '#',
                    Scope::ClassLevel => '.',
                };
                format!("{}{}{}", method.closure_path, separator, method.name)
            }
            _ => self.name().to_string(),
        }
    }

    pub fn as_local_variable(&self) -> Option<&LocalVariable> {
        match self {
            Pin::LocalVariable(local) => Some(local),
            _ => None,
        }
    }

    /// Locals are visible inside their presence range; every other kind is
    /// visible everywhere in the file.
    pub fn visible_from(&self, position: Position) -> bool {
        match self {
            Pin::LocalVariable(local) => local.visible_from(position),
            _ => true,
        }
    }

    /// Reconcile two observations of the same declaration across edits.
    ///
    /// Returns `false` and leaves `self` untouched when `other` is a
    /// different declaration. On success `self` takes the newer location,
    /// and locals take the newer presence.
    pub fn try_merge(&mut self, other: &Pin) -> bool {
        let compatible = match (&*self, other) {
            (Pin::Namespace(a), Pin::Namespace(b)) => {
                a.name == b.name && a.closure_path == b.closure_path && a.kind == b.kind
            }
            (Pin::Method(a), Pin::Method(b)) => {
                a.name == b.name
                    && a.closure_path == b.closure_path
                    && a.scope == b.scope
                    && a.parameters == b.parameters
            }
            (Pin::LocalVariable(a), Pin::LocalVariable(b)) => {
                a.variable.same_declaration(&b.variable)
            }
            (Pin::InstanceVariable(a), Pin::InstanceVariable(b))
            | (Pin::ClassVariable(a), Pin::ClassVariable(b))
            | (Pin::GlobalVariable(a), Pin::GlobalVariable(b))
            | (Pin::Constant(a), Pin::Constant(b)) => a.same_declaration(b),
            _ => false,
        };
        if !compatible {
            return false;
        }

        match (self, other) {
            (Pin::Namespace(a), Pin::Namespace(b)) => a.location = b.location,
            (Pin::Method(a), Pin::Method(b)) => a.location = b.location,
            (Pin::LocalVariable(a), Pin::LocalVariable(b)) => {
                a.variable.location = b.variable.location;
                a.presence = b.presence;
            }
            (Pin::InstanceVariable(a), Pin::InstanceVariable(b))
            | (Pin::ClassVariable(a), Pin::ClassVariable(b))
            | (Pin::GlobalVariable(a), Pin::GlobalVariable(b))
            | (Pin::Constant(a), Pin::Constant(b)) => a.location = b.location,
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_line: usize, end_line: usize) -> Range {
        Range::from_to(Position::new(start_line, 0), Position::new(end_line, 0))
    }

    fn local(name: &str, presence: Range) -> Pin {
        Pin::LocalVariable(LocalVariable::new(
            Variable::new(name, "Foo#bar").with_assignment("1"),
            presence,
        ))
    }

    #[test]
    fn test_merge_keeps_latest_presence() {
        let mut old = local("x", range(1, 5));
        let new = local("x", range(2, 9));
        assert!(old.try_merge(&new));
        assert_eq!(old.as_local_variable().unwrap().presence, range(2, 9));
    }

    #[test]
    fn test_merge_rejects_identity_mismatch() {
        let mut old = local("x", range(1, 5));
        assert!(!old.try_merge(&local("y", range(2, 9))));
        assert_eq!(old.as_local_variable().unwrap().presence, range(1, 5));

        let reassigned = Pin::LocalVariable(LocalVariable::new(
            Variable::new("x", "Foo#bar").with_assignment("'a'"),
            range(2, 9),
        ));
        assert!(!old.try_merge(&reassigned));

        let ivar = Pin::InstanceVariable(Variable::new("x", "Foo#bar").with_assignment("1"));
        assert!(!old.try_merge(&ivar));
    }

    #[test]
    fn test_visibility() {
        let pin = local("x", range(2, 4));
        assert!(pin.visible_from(Position::new(3, 7)));
        assert!(!pin.visible_from(Position::new(5, 0)));

        let method = Pin::Method(MethodPin {
            name: "bar".into(),
            closure_path: "Foo".into(),
            location: None,
            scope: Scope::InstanceLevel,
            parameters: vec![],
        });
        assert!(method.visible_from(Position::new(100, 0)));
    }

    #[test]
    fn test_paths() {
        let method = Pin::Method(MethodPin {
            name: "build".into(),
            closure_path: "Foo::Bar".into(),
            location: None,
            scope: Scope::ClassLevel,
            parameters: vec![],
        });
        assert_eq!(method.path(), "Foo::Bar.build");

        let ns = Pin::Namespace(NamespacePin {
            name: "Bar".into(),
            closure_path: "Foo".into(),
            location: None,
            kind: NamespaceKind::Class,
        });
        assert_eq!(ns.path(), "Foo::Bar");
        assert_eq!(ns.kind(), PinKind::Namespace);
    }
}
