//! publicbodies.org registry format.
//!
//! Column layout follows the publicbodies `datapackage.json`.

use anyhow::Result;
use pb_core::{Database, ExportConfig, Organization};
use std::io::Write;
use tracing::info;

use crate::csv::CsvOutput;

pub const HEADERS: [&str; 17] = [
    "id",
    "name",
    "abbreviation",
    "other_names",
    "description",
    "classification",
    "parent_id",
    "founding_date",
    "dissolution_date",
    "image",
    "url",
    "jurisdiction_code",
    "email",
    "address",
    "contact",
    "tags",
    "source_url",
];

/// Maps one organization to a row. Email and address fall back to the
/// organization's contact points.
pub fn row<'a>(organization: &'a Organization, jurisdiction_code: &'a str) -> [Option<&'a str>; 17] {
    [
        Some(organization.id.as_str()),
        Some(organization.name.as_str()),
        None,
        None,
        None,
        organization.classification.as_deref(),
        organization.parent_id.as_deref(),
        None,
        None,
        None,
        None,
        Some(jurisdiction_code),
        organization.email_with_fallback(),
        organization.address_with_fallback(),
        None,
        None,
        organization.source_url(),
    ]
}

/// Writes the header and one row per organization in the configured
/// jurisdiction.
pub fn export<W: Write>(db: &Database, config: &ExportConfig, out: W) -> Result<usize> {
    let jurisdiction_code = config.jurisdiction_code.as_str();
    let mut csv = CsvOutput::new(out);
    csv.header(&HEADERS)?;

    db.for_each_organization(jurisdiction_code, |organization| {
        csv.row(&row(&organization, jurisdiction_code))
    })?;

    let rows = csv.finish()?;
    info!("Exported {rows} organizations for {jurisdiction_code} (public_bodies)");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn org(value: serde_json::Value) -> Organization {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_all_columns() {
        let o = org(json!({
            "_id": "ocd-organization/1",
            "name": "Treasury Board",
            "classification": "committee",
            "parent_id": "ocd-organization/0",
            "contact_details": [
                {"type": "email", "value": "info@tbs.example"},
                {"type": "address", "value": "90 Elgin St"}
            ],
            "sources": [{"url": "http://tbs.example/"}]
        }));
        let r = row(&o, "ocd-jurisdiction/country:ca");

        assert_eq!(r.len(), HEADERS.len());
        assert_eq!(r[0], Some("ocd-organization/1"));
        assert_eq!(r[1], Some("Treasury Board"));
        assert_eq!(r[5], Some("committee"));
        assert_eq!(r[6], Some("ocd-organization/0"));
        assert_eq!(r[11], Some("ocd-jurisdiction/country:ca"));
        assert_eq!(r[12], Some("info@tbs.example"));
        assert_eq!(r[13], Some("90 Elgin St"));
        assert_eq!(r[16], Some("http://tbs.example/"));
        for always_empty in [2, 3, 4, 7, 8, 9, 10, 14, 15] {
            assert_eq!(r[always_empty], None, "column {}", HEADERS[always_empty]);
        }
    }

    #[test]
    fn email_and_address_fall_back_to_contact_point() {
        let o = org(json!({
            "_id": "x",
            "name": "X",
            "extras": {"contact_point": [{"email": "a@b.com", "address": "1 Main St"}]}
        }));
        let r = row(&o, "j");
        assert_eq!(r[12], Some("a@b.com"));
        assert_eq!(r[13], Some("1 Main St"));
    }

    #[test]
    fn null_email_and_address_fall_back_to_contact_point() {
        let o = org(json!({
            "_id": "x",
            "name": "X",
            "contact_details": [
                {"type": "email", "value": null},
                {"type": "address", "value": null}
            ],
            "sources": [{"url": null}],
            "extras": {"contact_point": [{"email": "a@b.com", "address": "1 Main St"}]}
        }));
        let r = row(&o, "j");
        assert_eq!(r[12], Some("a@b.com"));
        assert_eq!(r[13], Some("1 Main St"));
        assert_eq!(r[16], None);
    }

    #[test]
    fn missing_everything_is_empty() {
        let o = org(json!({"_id": "x"}));
        let r = row(&o, "j");
        assert_eq!(r[5], None);
        assert_eq!(r[6], None);
        assert_eq!(r[12], None);
        assert_eq!(r[13], None);
        assert_eq!(r[16], None);
    }
}
