use anyhow::Context;
use rubyscope_api::Range;
use rubyscope_core::pin::{Pin, PinKind};
use rubyscope_ruby::RubySource;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub kind: PinKind,
    /// `Foo::Bar`, `Foo#bar`, `Foo.bar`, or the bare variable name.
    pub path: String,
    pub closure_path: String,
    pub location: Option<Range>,
}

impl From<&Pin> for SymbolReport {
    fn from(pin: &Pin) -> Self {
        Self {
            kind: pin.kind(),
            path: pin.path(),
            closure_path: pin.closure_path().to_string(),
            location: pin.location(),
        }
    }
}

pub fn run(file: &Path) -> anyhow::Result<Vec<SymbolReport>> {
    let code = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    Ok(collect(&RubySource::parse(code)?))
}

pub fn collect(source: &RubySource) -> Vec<SymbolReport> {
    source
        .definition_pins()
        .iter()
        .map(SymbolReport::from)
        .collect()
}
