//! Effective type of a local variable.
//!
//! Runtime samples beat static inference: for a language without type
//! declarations, an observed type is stronger evidence than a guess.

use super::{LocalVariable, Pin};
use crate::samples::RuntimeSamples;
use crate::types::ComplexType;
use tracing::info;

/// The static inference collaborator consulted when no runtime sample
/// applies.
pub trait StaticTypeInference {
    fn infer(&self, pin: &LocalVariable) -> ComplexType;
}

/// Returns whatever type the pin was declared with.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTypeInference;

impl StaticTypeInference for DeclaredTypeInference {
    fn infer(&self, pin: &LocalVariable) -> ComplexType {
        pin.static_type().clone()
    }
}

impl<F> StaticTypeInference for F
where
    F: Fn(&LocalVariable) -> ComplexType,
{
    fn infer(&self, pin: &LocalVariable) -> ComplexType {
        self(pin)
    }
}

/// Type from the runtime samples, or `Undefined` when the entry is missing,
/// empty, or unparseable.
pub fn infer_type_from_runtime(pin: &LocalVariable, samples: &RuntimeSamples) -> ComplexType {
    let Some(types) = samples.types_for(pin.closure_path(), pin.name()) else {
        return ComplexType::Undefined;
    };
    info!(
        "infer_type_from_runtime({}) --> {:?}",
        RuntimeSamples::key(pin.closure_path(), pin.name()),
        types
    );
    ComplexType::try_parse(types)
}

pub fn effective_type(
    pin: &LocalVariable,
    samples: &RuntimeSamples,
    inference: &dyn StaticTypeInference,
) -> ComplexType {
    let runtime_type = infer_type_from_runtime(pin, samples);
    if runtime_type.is_defined() {
        runtime_type
    } else {
        inference.infer(pin)
    }
}

impl Pin {
    /// Effective type for any pin: locals go through [`effective_type`],
    /// other variables report their static type, and everything else is
    /// `Undefined`.
    pub fn typify(&self, samples: &RuntimeSamples, inference: &dyn StaticTypeInference) -> ComplexType {
        match self {
            Pin::LocalVariable(local) => effective_type(local, samples, inference),
            Pin::InstanceVariable(v)
            | Pin::ClassVariable(v)
            | Pin::GlobalVariable(v)
            | Pin::Constant(v) => v.static_type.clone(),
            Pin::Namespace(_) | Pin::Method(_) => ComplexType::Undefined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::Variable;
    use rubyscope_api::Range;

    fn pin_with_static(ty: &str) -> LocalVariable {
        LocalVariable::new(
            Variable::new("count", "Foo#bar").with_static_type(ComplexType::parse(ty)),
            Range::default(),
        )
    }

    #[test]
    fn test_runtime_sample_wins() {
        let pin = pin_with_static("String");
        let mut samples = RuntimeSamples::new();
        samples.insert("Foo#bar", "count", ["Integer"]);

        let ty = effective_type(&pin, &samples, &DeclaredTypeInference);
        assert_eq!(ty, ComplexType::simple("Integer"));
    }

    #[test]
    fn test_absent_or_empty_sample_falls_back() {
        let pin = pin_with_static("String");
        let mut samples = RuntimeSamples::new();
        let ty = effective_type(&pin, &samples, &DeclaredTypeInference);
        assert_eq!(ty, ComplexType::simple("String"));

        samples.insert("Foo#bar", "count", Vec::<String>::new());
        let ty = effective_type(&pin, &samples, &DeclaredTypeInference);
        assert_eq!(ty, ComplexType::simple("String"));
    }

    #[test]
    fn test_unparseable_sample_falls_back() {
        let pin = pin_with_static("String");
        let mut samples = RuntimeSamples::new();
        samples.insert("Foo#bar", "count", ["#<Class:0x0001>"]);

        let ty = effective_type(&pin, &samples, &DeclaredTypeInference);
        assert_eq!(ty, ComplexType::simple("String"));
    }

    #[test]
    fn test_static_result_may_be_undefined() {
        let pin = LocalVariable::new(Variable::new("x", ""), Range::default());
        let ty = effective_type(&pin, &RuntimeSamples::new(), &DeclaredTypeInference);
        assert!(ty.is_undefined());
    }

    #[test]
    fn test_closure_inference() {
        let pin = LocalVariable::new(Variable::new("x", ""), Range::default());
        let inference = |_: &LocalVariable| ComplexType::simple("Symbol");
        let ty = effective_type(&pin, &RuntimeSamples::new(), &inference);
        assert_eq!(ty.to_string(), "Symbol");
    }
}
