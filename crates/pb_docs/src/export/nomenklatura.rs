//! Nomenklatura name list: one name per line, no header.

use anyhow::Result;
use pb_core::{Database, ExportConfig};
use std::io::Write;
use tracing::info;

use crate::csv::CsvOutput;

pub fn export<W: Write>(db: &Database, config: &ExportConfig, out: W) -> Result<usize> {
    let jurisdiction_code = config.jurisdiction_code.as_str();
    let mut csv = CsvOutput::new(out);

    db.for_each_organization(jurisdiction_code, |organization| {
        csv.row(&[Some(organization.name.as_str())])
    })?;

    let rows = csv.finish()?;
    info!("Exported {rows} organizations for {jurisdiction_code} (nomenklatura)");
    Ok(rows)
}
