use super::symbol::Range;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether code at a position runs against a type definition itself or
/// against an instance of it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    ClassLevel,
    InstanceLevel,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::ClassLevel => write!(f, "class"),
            Scope::InstanceLevel => write!(f, "instance"),
        }
    }
}

/// Kind of the nearest definition-like construct enclosing an offset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    /// Top level of the file.
    Root,
    Class,
    Module,
    /// `def name`
    Method,
    /// `def self.name`
    SingletonMethod,
}

impl ConstructKind {
    /// Module and class bodies, singleton methods and the top level all run
    /// at class level. Only instance methods run against an instance.
    pub fn scope(&self) -> Scope {
        match self {
            ConstructKind::Method => Scope::InstanceLevel,
            _ => Scope::ClassLevel,
        }
    }
}

/// Everything a fragment knows about one cursor position, flattened for
/// transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct FragmentSnapshot {
    pub offset: usize,
    pub namespace: String,
    pub scope: Scope,
    pub signature: String,
    pub base: String,
    pub word: String,
    pub remainder: String,
    pub whole_word: String,
    pub whole_signature: String,
    pub phrase: String,
    pub signature_start: usize,
    pub in_string: bool,
    pub in_comment: bool,
    pub word_range: Range,
    pub whole_word_range: Range,
    pub visible_locals: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_instance_methods_are_instance_level() {
        assert_eq!(ConstructKind::Method.scope(), Scope::InstanceLevel);
        assert_eq!(ConstructKind::SingletonMethod.scope(), Scope::ClassLevel);
        assert_eq!(ConstructKind::Class.scope(), Scope::ClassLevel);
        assert_eq!(ConstructKind::Module.scope(), Scope::ClassLevel);
        assert_eq!(ConstructKind::Root.scope(), Scope::ClassLevel);
    }

    #[test]
    fn test_scope_serializes_snake_case() {
        let json = serde_json::to_string(&Scope::InstanceLevel).unwrap();
        assert_eq!(json, "\"instance_level\"");
    }
}
