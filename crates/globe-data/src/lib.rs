//! Star catalog data: the raw Heavens-Above style reference catalog, the
//! compactor that flattens it, and the compacted index-addressed format the
//! globe loads at startup.

pub mod catalog;
pub mod compactor;
pub mod error;
pub mod raw;

pub use catalog::CompactCatalog;
pub use compactor::{compact, compact_with_stats, CompactionStats};
pub use error::{CatalogError, CatalogResult};
pub use raw::{RawCatalog, StarRef};
