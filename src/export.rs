use std::{fs::File, io::Write, path::Path};

use crate::{core::engine::CalculationEntry, prelude::*};

/// Write the entries as CSV, one row per calculation.
pub fn write_entries<W: Write>(entries: &[CalculationEntry], writer: W) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    if entries.is_empty() {
        // Serializing writes the header along with the first record only.
        writer.write_record([
            "timestamp",
            "gate_count",
            "duration_hours",
            "requested_height",
            "used_height",
            "cfs_rate",
            "exact",
            "discharge",
        ])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

#[instrument(skip(entries), fields(len = entries.len()))]
pub fn export_entries(entries: &[CalculationEntry], path: &Path) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    write_entries(entries, file)?;
    info!("exported");
    Ok(())
}
