use reqwest::Method;
use serde_json::json;

use super::{ApiError, KvmClient};
use crate::models::{CatalogEntry, DownloadIsoRequest, IsoImage, IsoScan, OsCatalog};

impl KvmClient {
    /// ISO files currently present in the backend's storage.
    pub async fn list_isos(&self) -> Result<Vec<IsoImage>, ApiError> {
        let scan: IsoScan = self.call(Method::GET, "/iso/scan", None, None).await?;
        Ok(scan.available_isos)
    }

    /// Ask the backend to rescan its ISO directory.
    pub async fn rescan_isos(&self) -> Result<(), ApiError> {
        self.call_unit(Method::POST, "/iso/scan", None, None).await
    }

    pub async fn os_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let catalog: OsCatalog = self.call(Method::GET, "/iso/catalog", None, None).await?;
        Ok(catalog.catalog)
    }

    /// Start an asynchronous download on the backend. Returns once the
    /// download is accepted, not when it completes.
    pub async fn download_iso(&self, request: &DownloadIsoRequest) -> Result<(), ApiError> {
        let body = json!({ "url": request.url, "filename": request.filename });
        self.call_unit(Method::POST, "/iso/download", Some(body), None).await
    }

    pub async fn delete_iso(&self, iso_path: &str) -> Result<(), ApiError> {
        let body = json!({ "iso_path": iso_path });
        self.call_unit(Method::DELETE, "/iso/delete", Some(body), None).await
    }
}
