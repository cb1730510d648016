//! Flattens the raw reference catalog into the compacted format.
//!
//! Every reference of every line is resolved through the record mapping. Each
//! distinct record gets the next index in first-encounter order; a record
//! reused by several lines keeps one slot. Records are identified by their
//! mapping key, never by coordinate value, so two keys with equal
//! coordinates stay two stars.

use crate::catalog::CompactCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::raw::RawCatalog;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Counters reported after a compaction run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionStats {
    pub lines: usize,
    pub references: usize,
    pub stars: usize,
    pub unused_records: usize,
}

/// Compact a raw catalog. Any unresolvable reference aborts the run.
pub fn compact(raw: &RawCatalog) -> CatalogResult<CompactCatalog> {
    compact_with_stats(raw).map(|(catalog, _)| catalog)
}

pub fn compact_with_stats(raw: &RawCatalog) -> CatalogResult<(CompactCatalog, CompactionStats)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut stars: Vec<[Number; 2]> = Vec::new();
    let mut lines = Vec::with_capacity(raw.lines.len());

    for line in &raw.lines {
        if line.is_empty() {
            tracing::warn!("Empty constellation line kept as-is");
        }

        let mut indices = Vec::with_capacity(line.len());
        for star in line {
            let symbol = star.symbol();
            let (key, record) = raw
                .records
                .get_key_value(&*symbol)
                .ok_or_else(|| CatalogError::Lookup { reference: star.to_string() })?;

            let index = match slots.get(key.as_str()) {
                Some(&index) => index,
                None => {
                    let index = stars.len();
                    stars.push(coordinate_pair(key, record)?);
                    slots.insert(key.as_str(), index);
                    index
                }
            };
            indices.push(index);
        }
        lines.push(indices);
    }

    let stats = CompactionStats {
        lines: lines.len(),
        references: raw.reference_count(),
        stars: stars.len(),
        unused_records: raw.records.len() - stars.len(),
    };
    tracing::info!(
        "Compacted {} references in {} lines into {} stars ({} records unused)",
        stats.references, stats.lines, stats.stars, stats.unused_records
    );

    Ok((CompactCatalog { stars, lines }, stats))
}

/// First two fields of a record: declination and right ascension, copied as
/// the number tokens they were written as
fn coordinate_pair(key: &str, record: &[Value]) -> CatalogResult<[Number; 2]> {
    match (record.first(), record.get(1)) {
        (Some(Value::Number(dec)), Some(Value::Number(ra))) => Ok([dec.clone(), ra.clone()]),
        _ => Err(CatalogError::MalformedStar { reference: key.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawCatalog {
        RawCatalog::from_json_str(json).unwrap()
    }

    fn coords(catalog: &CompactCatalog) -> Vec<[f64; 2]> {
        catalog.stars().map(|star| [star.dec, star.ra]).collect()
    }

    #[test]
    fn test_two_star_example() {
        let catalog = compact(&raw(
            r#"{"lines": [["s1", "s2"]], "line": {"s1": [0, 0, "Name1"], "s2": [1.57, 3.14, "Name2"]}}"#,
        ))
        .unwrap();
        assert_eq!(coords(&catalog), vec![[0.0, 0.0], [1.57, 3.14]]);
        assert_eq!(serde_json::to_string(&catalog.stars).unwrap(), "[[0,0],[1.57,3.14]]");
        assert_eq!(catalog.lines, vec![vec![0, 1]]);
    }

    #[test]
    fn test_shared_star_gets_one_slot() {
        let (catalog, stats) = compact_with_stats(&raw(
            r#"{
                "lines": [["s1", "s2", "s3"], ["s4", "s2"], ["s3", "s1"]],
                "line": {"s1": [0.1, 0.2], "s2": [0.3, 0.4], "s3": [0.5, 0.6], "s4": [0.7, 0.8], "s5": [0, 0]}
            }"#,
        ))
        .unwrap();
        assert_eq!(catalog.stars.len(), 4);
        assert_eq!(catalog.lines, vec![vec![0, 1, 2], vec![3, 1], vec![2, 0]]);
        assert_eq!(catalog.lines[0][1], catalog.lines[1][1]);
        assert_eq!(stats, CompactionStats { lines: 3, references: 7, stars: 4, unused_records: 1 });
    }

    #[test]
    fn test_equal_coordinates_are_distinct_stars() {
        let catalog = compact(&raw(
            r#"{"lines": [["a", "b", "a"]], "line": {"a": [1, 1], "b": [1, 1]}}"#,
        ))
        .unwrap();
        assert_eq!(coords(&catalog), vec![[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(catalog.lines, vec![vec![0, 1, 0]]);
    }

    #[test]
    fn test_numeric_references_use_s_prefix() {
        let catalog = compact(&raw(
            r#"{"lines": [[42, 7], [7]], "line": {"s7": [0.5, 1.5, "Rigel"], "s42": [0.25, 1.25]}}"#,
        ))
        .unwrap();
        assert_eq!(coords(&catalog), vec![[0.25, 1.25], [0.5, 1.5]]);
        assert_eq!(catalog.lines, vec![vec![0, 1], vec![1]]);
    }

    #[test]
    fn test_unknown_reference_fails() {
        let err = compact(&raw(r#"{"lines": [["s1"], ["s9"]], "line": {"s1": [0, 0]}}"#))
            .unwrap_err();
        match err {
            CatalogError::Lookup { reference } => assert_eq!(reference, "s9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_numeric_reference_reports_id() {
        let err = compact(&raw(r#"{"lines": [[3]], "line": {}}"#)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid reference \"3\"");
    }

    #[test]
    fn test_malformed_record_fails() {
        let err = compact(&raw(r#"{"lines": [["s1"]], "line": {"s1": ["north", 0]}}"#))
            .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedStar { .. }));
    }

    #[test]
    fn test_output_is_deterministic() {
        let input = r#"{
            "lines": [["s3", "s1"], ["s2", "s3", "s4"]],
            "line": {"s1": [0.1, 0.2], "s2": [0.3, 0.4], "s3": [0.5, 0.6], "s4": [0.7, 0.8]}
        }"#;
        let first = compact(&raw(input)).unwrap().to_pretty_json().unwrap();
        let second = compact(&raw(input)).unwrap().to_pretty_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = compact(&RawCatalog::default()).unwrap();
        assert!(catalog.stars.is_empty());
        assert!(catalog.lines.is_empty());
    }
}
