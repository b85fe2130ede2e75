//! Identifier-list files: one identifier per line, order preserved.

use std::path::Path;

use anyhow::Context;
use crn_types::Identifier;

/// Read an ordered identifier list from `path`.
///
/// Blank lines and lines starting with `#` are skipped; everything else is
/// trimmed and validated as an identifier.
pub fn read_identifier_list(path: &Path) -> anyhow::Result<Vec<Identifier>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read identifier list {}", path.display()))?;

    let mut identifiers = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let identifier = Identifier::new(line)
            .with_context(|| format!("invalid identifier on line {}", index + 1))?;
        identifiers.push(identifier);
    }
    Ok(identifiers)
}
