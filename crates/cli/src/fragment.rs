use crate::cursor::CursorArgs;
use rubyscope_api::FragmentSnapshot;
use tracing::info;

pub fn run(cursor: &CursorArgs) -> anyhow::Result<FragmentSnapshot> {
    let (source, offset) = cursor.load()?;
    let snapshot = rubyscope_core::snapshot_at(&source, offset)?;
    info!(
        "Resolved fragment at {}:{} -> {:?}",
        cursor.file.display(),
        offset,
        snapshot.signature
    );
    Ok(snapshot)
}
