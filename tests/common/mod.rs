#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use kvm_panel::api::{ApiError, Backend, VmAction};
use kvm_panel::controller::{ControllerSettings, ViewController};
use kvm_panel::document::HtmlDocument;
use kvm_panel::models::{
    ApiInfo, CatalogEntry, CreateVmRequest, DownloadIsoRequest, HostStats, IsoImage, ResourceUsage,
    VirtualMachine, VmMemory,
};

pub fn vm(name: &str, active: bool) -> VirtualMachine {
    VirtualMachine {
        name: name.into(),
        uuid: format!("uuid-{}", name),
        is_active: active,
        memory: VmMemory { max: 2048 * 1024 * 1024, used: None },
        vcpus: 2,
        id: None,
        state: None,
        cpu_time: None,
    }
}

pub fn iso(name: &str, path: &str, size: u64) -> IsoImage {
    IsoImage {
        name: name.into(),
        path: path.into(),
        size,
        modified: "2024-01-15T10:30:00".into(),
    }
}

pub fn catalog_entry(name: &str, filename: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.into(),
        filename: filename.into(),
        url: format!("https://mirror.example/{}", filename),
        description: format!("{} installer", name),
        size: 1024 * 1024 * 1024,
    }
}

pub fn stats(cpu: f64, mem: (u64, u64), disk: (u64, u64)) -> HostStats {
    HostStats {
        cpu_percent: cpu,
        memory: ResourceUsage { used: mem.0, total: mem.1 },
        disk: ResourceUsage { used: disk.0, total: disk.1 },
        ..Default::default()
    }
}

/// In-memory backend. Every call is recorded as a short string such as
/// `list_vms` or `vm_action:web01:Stop`; failures are armed per call name.
#[derive(Default)]
pub struct FakeBackend {
    pub vms: Mutex<Vec<VirtualMachine>>,
    pub isos: Mutex<Vec<IsoImage>>,
    pub catalog: Mutex<Vec<CatalogEntry>>,
    pub stats: Mutex<HostStats>,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<CreateVmRequest>>,
    pub downloads: Mutex<Vec<DownloadIsoRequest>>,
    failures: Mutex<HashMap<String, ApiError>>,
    stats_delay: Mutex<Option<Duration>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vms(self, vms: Vec<VirtualMachine>) -> Self {
        *self.vms.lock().unwrap() = vms;
        self
    }

    pub fn with_isos(self, isos: Vec<IsoImage>) -> Self {
        *self.isos.lock().unwrap() = isos;
        self
    }

    pub fn with_catalog(self, catalog: Vec<CatalogEntry>) -> Self {
        *self.catalog.lock().unwrap() = catalog;
        self
    }

    pub fn with_stats(self, stats: HostStats) -> Self {
        *self.stats.lock().unwrap() = stats;
        self
    }

    /// Make every later call named `call` fail with `err`.
    pub fn fail(&self, call: &str, err: ApiError) {
        self.failures.lock().unwrap().insert(call.to_string(), err);
    }

    pub fn delay_stats(&self, delay: Duration) {
        *self.stats_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls matching `call` exactly, or `call` followed by `:detail`.
    pub fn count(&self, call: &str) -> usize {
        let prefix = format!("{}:", call);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == call || c.starts_with(&prefix))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: &str, detail: Option<String>) -> Result<(), ApiError> {
        let entry = match detail {
            Some(d) => format!("{}:{}", call, d),
            None => call.to_string(),
        };
        self.calls.lock().unwrap().push(entry);
        match self.failures.lock().unwrap().get(call) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn api_info(&self) -> Result<ApiInfo, ApiError> {
        self.record("api_info", None)?;
        Ok(ApiInfo { name: "KVM Manager API".into(), version: "1.0.0".into(), demo_mode: true })
    }

    async fn host_stats(&self) -> Result<HostStats, ApiError> {
        self.record("host_stats", None)?;
        let delay = *self.stats_delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn list_vms(&self) -> Result<Vec<VirtualMachine>, ApiError> {
        self.record("list_vms", None)?;
        Ok(self.vms.lock().unwrap().clone())
    }

    async fn get_vm(&self, name: &str) -> Result<VirtualMachine, ApiError> {
        self.record("get_vm", Some(name.to_string()))?;
        self.vms
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.name == name)
            .cloned()
            .ok_or(ApiError::Application { status: 404, detail: Some("ВМ не найдена".into()) })
    }

    async fn create_vm(&self, request: &CreateVmRequest) -> Result<(), ApiError> {
        self.record("create_vm", Some(request.name.clone()))?;
        self.created.lock().unwrap().push(request.clone());
        self.vms.lock().unwrap().push(vm(&request.name, false));
        Ok(())
    }

    async fn vm_action(&self, name: &str, action: VmAction) -> Result<(), ApiError> {
        self.record("vm_action", Some(format!("{}:{:?}", name, action)))?;
        let mut vms = self.vms.lock().unwrap();
        if let Some(v) = vms.iter_mut().find(|v| v.name == name) {
            v.is_active = matches!(action, VmAction::Start | VmAction::Restart);
        }
        Ok(())
    }

    async fn delete_vm(&self, name: &str, delete_disks: bool) -> Result<(), ApiError> {
        self.record("delete_vm", Some(format!("{}:{}", name, delete_disks)))?;
        self.vms.lock().unwrap().retain(|v| v.name != name);
        Ok(())
    }

    async fn list_isos(&self) -> Result<Vec<IsoImage>, ApiError> {
        self.record("list_isos", None)?;
        Ok(self.isos.lock().unwrap().clone())
    }

    async fn rescan_isos(&self) -> Result<(), ApiError> {
        self.record("rescan_isos", None)
    }

    async fn os_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        self.record("os_catalog", None)?;
        Ok(self.catalog.lock().unwrap().clone())
    }

    async fn download_iso(&self, request: &DownloadIsoRequest) -> Result<(), ApiError> {
        self.record("download_iso", Some(request.url.clone()))?;
        self.downloads.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn delete_iso(&self, iso_path: &str) -> Result<(), ApiError> {
        self.record("delete_iso", Some(iso_path.to_string()))?;
        self.isos.lock().unwrap().retain(|i| i.path != iso_path);
        Ok(())
    }

    fn console_url(&self, name: &str) -> String {
        format!("http://kvm.test/api/vms/{}/console/viewer", name)
    }
}

pub fn settings() -> ControllerSettings {
    ControllerSettings {
        poll_interval: Duration::from_secs(5),
        alert_ttl: Duration::from_secs(5),
        download_refresh_delay: Duration::from_secs(2),
    }
}

pub fn controller(backend: FakeBackend) -> (Arc<FakeBackend>, ViewController<FakeBackend, HtmlDocument>) {
    let backend = Arc::new(backend);
    let controller = ViewController::new(backend.clone(), HtmlDocument::new(), settings());
    (backend, controller)
}
