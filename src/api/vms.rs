use reqwest::Method;

use super::client::segment;
use super::{ApiError, KvmClient};
use crate::models::{CreateVmRequest, VirtualMachine};

/// Lifecycle operations posted to `/vms/{name}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmAction {
    Start,
    Stop,
    ForceStop,
    Restart,
}

impl VmAction {
    pub fn path_segment(&self) -> &'static str {
        match self {
            VmAction::Start => "start",
            VmAction::Stop | VmAction::ForceStop => "stop",
            VmAction::Restart => "restart",
        }
    }

    fn params(&self) -> Option<Vec<(String, String)>> {
        match self {
            VmAction::ForceStop => Some(vec![("force".to_string(), "true".to_string())]),
            _ => None,
        }
    }
}

impl KvmClient {
    pub async fn list_vms(&self) -> Result<Vec<VirtualMachine>, ApiError> {
        self.call(Method::GET, "/vms", None, None).await
    }

    pub async fn get_vm(&self, name: &str) -> Result<VirtualMachine, ApiError> {
        let endpoint = format!("/vms/{}", segment(name));
        self.call(Method::GET, &endpoint, None, None).await
    }

    pub async fn create_vm(&self, request: &CreateVmRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.call_unit(Method::POST, "/vms", Some(body), None).await
    }

    pub async fn vm_action(&self, name: &str, action: VmAction) -> Result<(), ApiError> {
        let endpoint = format!("/vms/{}/{}", segment(name), action.path_segment());
        self.call_unit(Method::POST, &endpoint, None, action.params()).await
    }

    pub async fn delete_vm(&self, name: &str, delete_disks: bool) -> Result<(), ApiError> {
        let endpoint = format!("/vms/{}", segment(name));
        let params = vec![("delete_disks".to_string(), delete_disks.to_string())];
        self.call_unit(Method::DELETE, &endpoint, None, Some(params)).await
    }

    /// Browser-facing URL of the backend's console viewer for a VM.
    pub fn console_url(&self, name: &str) -> String {
        format!("{}/vms/{}/console/viewer", self.base_url(), segment(name))
    }
}

