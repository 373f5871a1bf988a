use anyhow::Context;

use crate::stories::OutputRecord;

/// Pretty printed with two space indentation. Non-ASCII text is written as is.
pub(crate) fn save_as_json(path: &std::path::Path, records: &[OutputRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub(crate) fn print_record(out: &mut impl std::io::Write, record: &OutputRecord) -> anyhow::Result<()> {
    writeln!(out, "{record}")?;
    out.flush()?;
    Ok(())
}
