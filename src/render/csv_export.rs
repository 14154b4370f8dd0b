use super::{ExportError, TABLE_HEADERS, csv_file_name, table_rows};
use crate::entry::ScheduleEntry;
use crate::metadata::HeaderData;
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the header row and the sorted display rows as CSV.
pub fn write_schedule_csv<W: Write>(entries: &[ScheduleEntry], target: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(target);
    writer.write_record(TABLE_HEADERS)?;
    for row in table_rows(entries) {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `Escala_<month>.csv` into `dir`.
pub fn save_schedule_csv(
    entries: &[ScheduleEntry],
    header: &HeaderData,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let mut buf = Vec::new();
    write_schedule_csv(entries, &mut buf)?;

    let path = dir.join(csv_file_name(header));
    if let Err(err) = fs::write(&path, buf) {
        warn!("could not write {}: {err}", path.display());
        let _ = fs::remove_file(&path);
        return Err(err.into());
    }
    info!("exported {} schedule row(s) to {}", entries.len(), path.display());
    Ok(path)
}
