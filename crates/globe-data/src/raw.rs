//! Raw reference catalog as exported by Heavens-Above.
//!
//! ```json
//! { "lines": [[17, 23, 41], ...], "line": { "s17": [0.12, 1.53, "Betelgeuse"], ... } }
//! ```

use crate::error::CatalogResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// A reference from a line to a star record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarRef {
    /// Numeric star id, stored in the mapping under `s{id}`
    Id(u64),
    /// Symbol used verbatim as the mapping key
    Symbol(String),
}

impl StarRef {
    pub fn symbol(&self) -> Cow<'_, str> {
        match self {
            StarRef::Id(id) => Cow::Owned(format!("s{id}")),
            StarRef::Symbol(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl fmt::Display for StarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarRef::Id(id) => write!(f, "{id}"),
            StarRef::Symbol(s) => f.write_str(s),
        }
    }
}

/// Raw catalog: constellation lines of symbolic references plus the
/// symbol -> record mapping. Records carry `[dec, ra, ...extras]`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    pub lines: Vec<Vec<StarRef>>,
    #[serde(rename = "line")]
    pub records: HashMap<String, Vec<Value>>,
}

impl RawCatalog {
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        tracing::info!("Loading raw catalog from {:?}", path);
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Total number of references across all lines
    pub fn reference_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_and_symbolic_refs() {
        let raw = RawCatalog::from_json_str(
            r#"{"lines": [[1, "s2"]], "line": {"s1": [0, 0], "s2": [1, 2, "x"]}}"#,
        )
        .unwrap();
        assert_eq!(raw.lines[0], vec![StarRef::Id(1), StarRef::Symbol("s2".into())]);
        assert_eq!(raw.lines[0][0].symbol(), "s1");
        assert_eq!(raw.lines[0][1].symbol(), "s2");
        assert_eq!(raw.reference_count(), 2);
        assert_eq!(raw.records["s2"].len(), 3);
    }
}
