use crate::cursor::CursorArgs;
use rubyscope_api::Range;
use rubyscope_core::pin::{LocalVariable, StaticTypeInference};
use rubyscope_core::{Fragment, RuntimeSamples, SourceBuffer};
use rubyscope_ruby::{AssignmentInference, RubySource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalReport {
    pub name: String,
    pub closure_path: String,
    pub assignment: Option<String>,
    pub presence: Range,
    /// Runtime-sampled type when one applies, else the inferred one.
    pub effective_type: String,
}

impl LocalReport {
    pub fn new(
        pin: &LocalVariable,
        samples: &RuntimeSamples,
        inference: &dyn StaticTypeInference,
    ) -> Self {
        Self {
            name: pin.name().to_string(),
            closure_path: pin.closure_path().to_string(),
            assignment: pin.assignment().map(str::to_string),
            presence: pin.presence,
            effective_type: rubyscope_core::pin::effective_type(pin, samples, inference)
                .to_string(),
        }
    }
}

pub fn run(
    cursor: &CursorArgs,
    samples: &RuntimeSamples,
    all: bool,
) -> anyhow::Result<Vec<LocalReport>> {
    let (source, offset) = cursor.load()?;
    collect(&source, offset, samples, all)
}

pub fn collect(
    source: &RubySource,
    offset: usize,
    samples: &RuntimeSamples,
    all: bool,
) -> anyhow::Result<Vec<LocalReport>> {
    let inference = AssignmentInference::new()?;
    let locals: Vec<&LocalVariable> = if all {
        source
            .local_variable_pins()
            .iter()
            .filter_map(|pin| pin.as_local_variable())
            .collect()
    } else {
        let fragment = Fragment::new(source, offset)?;
        fragment
            .visible_locals()
            .iter()
            .filter_map(|pin| pin.as_local_variable())
            .collect()
    };
    Ok(locals
        .into_iter()
        .map(|pin| LocalReport::new(pin, samples, &inference))
        .collect())
}
