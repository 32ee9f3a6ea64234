use serde::{Deserialize, Serialize};

use super::IsoImage;

/// A downloadable OS image definition curated by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: u64,
}

impl CatalogEntry {
    /// Fuzzy match against downloaded files: an ISO whose name contains the
    /// entry name (case-insensitive) or whose path contains the entry filename.
    pub fn is_downloaded_in(&self, isos: &[IsoImage]) -> bool {
        let name = self.name.to_lowercase();
        isos.iter()
            .any(|iso| iso.name.to_lowercase().contains(&name) || iso.path.contains(&self.filename))
    }
}

/// Payload of `GET /iso/catalog`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OsCatalog {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}
