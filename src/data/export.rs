use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::loader::COLUMNS;
use super::model::PenguinDataset;

/// Write the rows of `view` as CSV in the same layout the loader reads.
/// The header is written even when the view has no rows.
pub fn write_csv<W: Write>(dataset: &PenguinDataset, view: &FilteredView, out: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(COLUMNS).context("writing CSV header")?;
    let mut n = 0;
    for penguin in view.iter(dataset) {
        writer.serialize(penguin).context("writing CSV row")?;
        n += 1;
    }
    writer.flush().context("flushing CSV")?;
    Ok(n)
}

/// Export `view` to a CSV file at `path`, returning the number of rows written.
pub fn export_csv(dataset: &PenguinDataset, view: &FilteredView, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let n = write_csv(dataset, view, file)?;
    log::info!("Exported {n} rows to {}", path.display());
    Ok(n)
}
