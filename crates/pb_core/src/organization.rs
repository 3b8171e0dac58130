use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Key in `extras` holding person-like fallback contacts.
pub const CONTACT_POINT_KEY: &str = "contact_point";

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

/// A scraped organization document, read-only.
///
/// Optional collections deserialize to empty when absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_details: ContactDetailList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extras: Map<String, Value>,
}

impl Organization {
    /// Parses a raw store document.
    pub fn from_document(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Direct email, else the first contact point carrying one.
    pub fn email_with_fallback(&self) -> Option<&str> {
        self.contact_details
            .email()
            .or_else(|| self.contact_point_value("email"))
    }

    /// Direct address, else the first contact point carrying one.
    pub fn address_with_fallback(&self) -> Option<&str> {
        self.contact_details
            .address()
            .or_else(|| self.contact_point_value("address"))
    }

    /// `url` of the first source. A first source without a url yields
    /// `None`; later sources are not consulted.
    pub fn source_url(&self) -> Option<&str> {
        self.sources.first().and_then(|source| source.url.as_deref())
    }

    /// Scans `extras.contact_point` in order and returns the first string
    /// value stored under `key`. Entries without the key, or with `null`,
    /// are skipped.
    fn contact_point_value(&self, key: &str) -> Option<&str> {
        let points = self.extras.get(CONTACT_POINT_KEY)?.as_array()?;
        for point in points {
            if let Some(value) = point.get(key).and_then(Value::as_str) {
                return Some(value);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Contact details
// ---------------------------------------------------------------------------

/// One typed contact entry (`email`, `voice`, `fax`, `address`, ...).
///
/// A `null` value is kept as `None` so lookups treat it as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An organization's contact details, looked up by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactDetailList(pub Vec<ContactDetail>);

impl ContactDetailList {
    /// Value of the first entry of the given type. If that entry has no
    /// value the result is `None`, even when a later entry has one.
    pub fn find_by_type(&self, kind: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|detail| detail.kind == kind)
            .and_then(|detail| detail.value.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.find_by_type("email")
    }

    pub fn address(&self) -> Option<&str> {
        self.find_by_type("address")
    }
}

/// Where a record was scraped from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
