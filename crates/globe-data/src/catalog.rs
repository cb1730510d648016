//! Compacted catalog: deduplicated stars addressed by index.

use crate::error::{CatalogError, CatalogResult};
use globe_core::EquatorialCoord;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Number;
use std::fs;
use std::io::Write;
use std::path::Path;

/// `{ "stars": [[dec, ra], ...], "lines": [[index, ...], ...] }`
///
/// Coordinates keep their JSON number tokens, so an integer `0` in the raw
/// catalog is written back as `0` rather than `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompactCatalog {
    pub stars: Vec<[Number; 2]>,
    pub lines: Vec<Vec<usize>>,
}

impl CompactCatalog {
    /// Build from float pairs. Line indices are not checked here.
    pub fn from_coords(stars: Vec<[f64; 2]>, lines: Vec<Vec<usize>>) -> CatalogResult<Self> {
        let stars = stars
            .into_iter()
            .enumerate()
            .map(|(index, [dec, ra])| match (Number::from_f64(dec), Number::from_f64(ra)) {
                (Some(dec), Some(ra)) => Ok([dec, ra]),
                _ => Err(CatalogError::NonFinite { index }),
            })
            .collect::<CatalogResult<_>>()?;
        Ok(Self { stars, lines })
    }

    /// Parse and check that every line index points at a star
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        tracing::info!("Loading compacted catalog from {:?}", path);
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} stars, {} lines", catalog.stars.len(), catalog.lines.len());
        Ok(catalog)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let stars = self.stars.len();
        for (line, indices) in self.lines.iter().enumerate() {
            for (position, &index) in indices.iter().enumerate() {
                if index >= stars {
                    return Err(CatalogError::IndexOutOfRange { line, position, index, stars });
                }
            }
        }
        Ok(())
    }

    pub fn star(&self, index: usize) -> Option<EquatorialCoord> {
        let [dec, ra] = self.stars.get(index)?;
        Some(EquatorialCoord::new(dec.as_f64()?, ra.as_f64()?))
    }

    pub fn stars(&self) -> impl Iterator<Item = EquatorialCoord> + '_ {
        (0..self.stars.len()).filter_map(|index| self.star(index))
    }

    /// Resolve the indices of line `line` to coordinates
    pub fn line_coords(&self, line: usize) -> CatalogResult<Vec<EquatorialCoord>> {
        let Some(indices) = self.lines.get(line) else {
            return Ok(Vec::new());
        };
        indices
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                self.star(index).ok_or(CatalogError::IndexOutOfRange {
                    line,
                    position,
                    index,
                    stars: self.stars.len(),
                })
            })
            .collect()
    }

    /// Pretty JSON, one tab per indentation level
    pub fn write_pretty<W: Write>(&self, writer: W) -> CatalogResult<()> {
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> CatalogResult<String> {
        let mut buf = Vec::new();
        self.write_pretty(&mut buf)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        let mut json = self.to_pretty_json()?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompactCatalog {
        CompactCatalog::from_coords(vec![[0.0, 0.0], [1.57, 3.14]], vec![vec![0, 1]]).unwrap()
    }

    #[test]
    fn test_pretty_json_uses_tabs() {
        let json = sample().to_pretty_json().unwrap();
        assert!(json.starts_with("{\n\t\"stars\": [\n\t\t[\n\t\t\t0.0,"));
        assert!(!json.contains("  "), "no space indentation expected:\n{json}");
    }

    #[test]
    fn test_integer_coordinates_are_written_back_as_integers() {
        let catalog =
            CompactCatalog::from_json_str(r#"{"stars": [[0, 0], [1.57, 3.14]], "lines": [[0, 1]]}"#)
                .unwrap();
        assert_eq!(
            catalog.to_pretty_json().unwrap(),
            "{\n\t\"stars\": [\n\t\t[\n\t\t\t0,\n\t\t\t0\n\t\t],\n\t\t[\n\t\t\t1.57,\n\t\t\t3.14\n\t\t]\n\t],\n\t\"lines\": [\n\t\t[\n\t\t\t0,\n\t\t\t1\n\t\t]\n\t]\n}"
        );
        assert_eq!(catalog.star(0), Some(EquatorialCoord::new(0.0, 0.0)));
    }

    #[test]
    fn test_from_coords_rejects_non_finite() {
        let err = CompactCatalog::from_coords(vec![[0.0, 0.0], [f64::NAN, 1.0]], Vec::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NonFinite { index: 1 }));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = CompactCatalog::from_json_str(r#"{"stars": [[0, 0]], "lines": [[0, 3]]}"#)
            .unwrap_err();
        match err {
            CatalogError::IndexOutOfRange { line, position, index, stars } => {
                assert_eq!((line, position, index, stars), (0, 1, 3, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_index() {
        let err = CompactCatalog::from_json_str(r#"{"stars": [[0, 0]], "lines": [[-1]]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_line_coords_resolves_in_order() {
        let catalog = sample();
        let coords = catalog.line_coords(0).unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1], EquatorialCoord::new(1.57, 3.14));
        assert!(catalog.line_coords(7).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.json");
        sample().save(&path).unwrap();
        assert_eq!(CompactCatalog::load(&path).unwrap(), sample());
    }
}
