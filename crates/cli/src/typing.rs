use crate::cursor::CursorArgs;
use crate::locals::{LocalReport, collect};
use anyhow::bail;
use rubyscope_core::RuntimeSamples;

/// The most recent visible declaration of `name` at the cursor.
pub fn run(cursor: &CursorArgs, name: &str, samples: &RuntimeSamples) -> anyhow::Result<LocalReport> {
    let (source, offset) = cursor.load()?;
    let visible = collect(&source, offset, samples, false)?;
    match visible.into_iter().rev().find(|report| report.name == name) {
        Some(report) => Ok(report),
        None => bail!("no local variable `{name}` is visible at offset {offset}"),
    }
}
