use async_trait::async_trait;

use super::{ApiError, KvmClient, VmAction};
use crate::models::{
    ApiInfo, CatalogEntry, CreateVmRequest, DownloadIsoRequest, HostStats, IsoImage, VirtualMachine,
};

/// The REST surface the view controller depends on. [`KvmClient`] talks to
/// the real backend; tests substitute an in-memory implementation.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn api_info(&self) -> Result<ApiInfo, ApiError>;
    async fn host_stats(&self) -> Result<HostStats, ApiError>;

    async fn list_vms(&self) -> Result<Vec<VirtualMachine>, ApiError>;
    async fn get_vm(&self, name: &str) -> Result<VirtualMachine, ApiError>;
    async fn create_vm(&self, request: &CreateVmRequest) -> Result<(), ApiError>;
    async fn vm_action(&self, name: &str, action: VmAction) -> Result<(), ApiError>;
    async fn delete_vm(&self, name: &str, delete_disks: bool) -> Result<(), ApiError>;

    async fn list_isos(&self) -> Result<Vec<IsoImage>, ApiError>;
    async fn rescan_isos(&self) -> Result<(), ApiError>;
    async fn os_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError>;
    async fn download_iso(&self, request: &DownloadIsoRequest) -> Result<(), ApiError>;
    async fn delete_iso(&self, iso_path: &str) -> Result<(), ApiError>;

    /// URL the console frame should load for a VM.
    fn console_url(&self, name: &str) -> String;
}

#[async_trait]
impl Backend for KvmClient {
    async fn api_info(&self) -> Result<ApiInfo, ApiError> {
        KvmClient::api_info(self).await
    }

    async fn host_stats(&self) -> Result<HostStats, ApiError> {
        KvmClient::host_stats(self).await
    }

    async fn list_vms(&self) -> Result<Vec<VirtualMachine>, ApiError> {
        KvmClient::list_vms(self).await
    }

    async fn get_vm(&self, name: &str) -> Result<VirtualMachine, ApiError> {
        KvmClient::get_vm(self, name).await
    }

    async fn create_vm(&self, request: &CreateVmRequest) -> Result<(), ApiError> {
        KvmClient::create_vm(self, request).await
    }

    async fn vm_action(&self, name: &str, action: VmAction) -> Result<(), ApiError> {
        KvmClient::vm_action(self, name, action).await
    }

    async fn delete_vm(&self, name: &str, delete_disks: bool) -> Result<(), ApiError> {
        KvmClient::delete_vm(self, name, delete_disks).await
    }

    async fn list_isos(&self) -> Result<Vec<IsoImage>, ApiError> {
        KvmClient::list_isos(self).await
    }

    async fn rescan_isos(&self) -> Result<(), ApiError> {
        KvmClient::rescan_isos(self).await
    }

    async fn os_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        KvmClient::os_catalog(self).await
    }

    async fn download_iso(&self, request: &DownloadIsoRequest) -> Result<(), ApiError> {
        KvmClient::download_iso(self, request).await
    }

    async fn delete_iso(&self, iso_path: &str) -> Result<(), ApiError> {
        KvmClient::delete_iso(self, iso_path).await
    }

    fn console_url(&self, name: &str) -> String {
        KvmClient::console_url(self, name)
    }
}
