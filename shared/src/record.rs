//! Record identity and display-layer search
//!
//! Every resource served by the HR backend is keyed by an `id` and exposes a
//! handful of text fields that the dashboard narrows on locally.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend identifier, normalized to a string.
///
/// Most tables answer numeric ids, a few answer strings; both land here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// A row of a paginated resource.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &RecordId;

    /// Text fields matched by [`Record::matches`].
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match over the search fields.
    ///
    /// An empty term matches everything.
    fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Narrow already-fetched records to those matching `term`.
pub fn filter_records<'a, R: Record>(records: &'a [R], term: &str) -> Vec<&'a R> {
    records.iter().filter(|r| r.matches(term)).collect()
}
