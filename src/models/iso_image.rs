use serde::{Deserialize, Serialize};

/// An ISO file already present in the backend's storage. `path` is the unique key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoImage {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified: String,
}

/// Payload of `GET /iso/scan`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IsoScan {
    #[serde(default)]
    pub available_isos: Vec<IsoImage>,
}
