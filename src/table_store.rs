use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::formats::BookRecord;

/// Spreadsheet tools need the byte-order mark to detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn write_records(path: &Path, records: &[BookRecord]) -> anyhow::Result<()> {
    if let Some(parent_dir) = path.parent()
        && !parent_dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent_dir)
            .with_context(|| format!("create table dir: {}", parent_dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("create table: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM).context("write byte-order mark")?;

    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record).context("serialize book record")?;
    }
    writer
        .flush()
        .with_context(|| format!("flush table: {}", path.display()))?;

    Ok(())
}

pub fn read_records(path: &Path) -> anyhow::Result<Vec<BookRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read table: {}", path.display()))?;
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<BookRecord>().enumerate() {
        let record = row.with_context(|| format!("parse table row {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}
