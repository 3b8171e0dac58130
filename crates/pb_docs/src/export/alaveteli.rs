//! Alaveteli public body import format.
//!
//! `request_email` is the organization's own email only. Contact points are
//! people, and Alaveteli sends requests to the address on file.

use anyhow::Result;
use pb_core::{Database, ExportConfig, Organization};
use std::io::Write;
use tracing::info;

use crate::csv::CsvOutput;

pub const HEADERS: [&str; 3] = ["#id", "name", "request_email"];

pub fn row(organization: &Organization) -> [Option<&str>; 3] {
    [
        Some(organization.id.as_str()),
        Some(organization.name.as_str()),
        organization.contact_details.email(),
    ]
}

pub fn export<W: Write>(db: &Database, config: &ExportConfig, out: W) -> Result<usize> {
    let jurisdiction_code = config.jurisdiction_code.as_str();
    let mut csv = CsvOutput::new(out);
    csv.header(&HEADERS)?;

    db.for_each_organization(jurisdiction_code, |organization| {
        csv.row(&row(&organization))
    })?;

    let rows = csv.finish()?;
    info!("Exported {rows} organizations for {jurisdiction_code} (alaveteli)");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_contact_point_email() {
        let o: Organization = serde_json::from_value(json!({
            "_id": "x",
            "name": "X",
            "extras": {"contact_point": [{"email": "person@example.ca"}]}
        }))
        .unwrap();
        assert_eq!(row(&o), [Some("x"), Some("X"), None]);
    }

    #[test]
    fn uses_direct_email() {
        let o: Organization = serde_json::from_value(json!({
            "_id": "x",
            "name": "X",
            "contact_details": [{"type": "email", "value": "foi@example.ca"}]
        }))
        .unwrap();
        assert_eq!(row(&o)[2], Some("foi@example.ca"));
    }
}
