//! The view controller: caches backend collections, renders the active page
//! into a [`Document`] and turns user actions into REST calls.

mod confirm;
mod poller;

pub use confirm::{AssumeYes, Confirm, FollowUpAnswer, ScriptedConfirm, StdinConfirm};
pub use poller::StatsPoller;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::api::{ApiError, Backend, VmAction};
use crate::config;
use crate::document::{Document, FormId, Slot};
use crate::models::{
    Alert, AlertLevel, CatalogEntry, CreateVmForm, CreateVmRequest, DownloadIsoForm,
    DownloadIsoRequest, IsoImage, Page, VirtualMachine,
};
use crate::render;

/// Timings of the controller's background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Host stats refresh period while the dashboard is shown.
    pub poll_interval: Duration,
    /// Lifetime of a notification before it is removed.
    pub alert_ttl: Duration,
    /// Wait between starting an ISO download and reloading the images view.
    pub download_refresh_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(config::DEFAULT_POLL_INTERVAL_SECS),
            alert_ttl: Duration::from_secs(config::DEFAULT_ALERT_TTL_SECS),
            download_refresh_delay: Duration::from_secs(config::DEFAULT_DOWNLOAD_REFRESH_DELAY_SECS),
        }
    }
}

impl ControllerSettings {
    pub fn from_env() -> Self {
        Self {
            poll_interval: config::get_poll_interval(),
            alert_ttl: config::get_alert_ttl(),
            download_refresh_delay: config::get_download_refresh_delay(),
        }
    }
}

/// Result of a user action, after its notification has been shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// Client-side validation failed; nothing was sent.
    Rejected,
    Failed(ApiError),
}

impl ActionOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, ActionOutcome::Done)
    }
}

#[derive(Debug, Default)]
struct Cache {
    vms: Vec<VirtualMachine>,
    available_isos: Vec<IsoImage>,
    downloaded_isos: Vec<IsoImage>,
    os_catalog: Vec<CatalogEntry>,
}

/// Cheap to clone: every clone drives the same cache, page and document.
pub struct ViewController<B: Backend, D: Document> {
    backend: Arc<B>,
    document: D,
    settings: ControllerSettings,
    cache: Arc<Mutex<Cache>>,
    current_page: Arc<Mutex<Page>>,
    poller: Arc<Mutex<Option<StatsPoller>>>,
    stats_in_flight: Arc<AtomicBool>,
    next_alert_id: Arc<AtomicU64>,
}

impl<B: Backend, D: Document> Clone for ViewController<B, D> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            document: self.document.clone(),
            settings: self.settings,
            cache: self.cache.clone(),
            current_page: self.current_page.clone(),
            poller: self.poller.clone(),
            stats_in_flight: self.stats_in_flight.clone(),
            next_alert_id: self.next_alert_id.clone(),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<B: Backend, D: Document> ViewController<B, D> {
    pub fn new(backend: Arc<B>, document: D, settings: ControllerSettings) -> Self {
        Self {
            backend,
            document,
            settings,
            cache: Arc::new(Mutex::new(Cache::default())),
            current_page: Arc::new(Mutex::new(Page::Dashboard)),
            poller: Arc::new(Mutex::new(None)),
            stats_in_flight: Arc::new(AtomicBool::new(false)),
            next_alert_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Show the dashboard and start the stats refresh.
    pub async fn init(&self) {
        self.show_page(Page::Dashboard.to_str()).await;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn current_page(&self) -> Page {
        *lock(&self.current_page)
    }

    pub fn vms(&self) -> Vec<VirtualMachine> {
        lock(&self.cache).vms.clone()
    }

    pub fn available_isos(&self) -> Vec<IsoImage> {
        lock(&self.cache).available_isos.clone()
    }

    pub fn downloaded_isos(&self) -> Vec<IsoImage> {
        lock(&self.cache).downloaded_isos.clone()
    }

    pub fn os_catalog(&self) -> Vec<CatalogEntry> {
        lock(&self.cache).os_catalog.clone()
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Switch the visible page and load its data. Unknown names hide every
    /// page and load nothing; the current page stays as it was.
    pub async fn show_page(&self, name: &str) {
        let page = Page::from_str(name);
        self.document.show_page(page);
        self.document.set_active_nav(page);

        let Some(page) = page else {
            tracing::warn!(name, "Unknown page requested");
            return;
        };
        *lock(&self.current_page) = page;
        if page == Page::Dashboard {
            self.start_stats_update();
        } else {
            self.stop_stats_update();
        }

        match page {
            Page::Dashboard => self.load_dashboard().await,
            Page::Vms => self.load_vms().await,
            Page::CreateVm => self.load_create_vm_data().await,
            Page::Images => self.load_images_data().await,
        }
    }

    pub async fn refresh_current_page(&self) {
        let page = self.current_page();
        self.show_page(page.to_str()).await;
    }

    // ---------------------------------------------------------------------
    // Loaders
    // ---------------------------------------------------------------------

    pub async fn load_dashboard(&self) {
        self.update_host_stats().await;
        self.load_active_vms().await;
    }

    /// Returns false when skipped because a refresh was already running.
    pub async fn update_host_stats(&self) -> bool {
        poller::refresh_host_stats(&*self.backend, &self.document, &self.stats_in_flight).await
    }

    pub async fn load_active_vms(&self) {
        match self.backend.list_vms().await {
            Ok(vms) => {
                self.document.set_text(Slot::TotalVms, vms.len().to_string());
                self.document.set_html(Slot::ActiveVmsList, render::active_vms_list(&vms));
                lock(&self.cache).vms = vms;
            }
            Err(e) => {
                self.show_error(format!("Ошибка загрузки ВМ: {}", e));
            }
        }
    }

    pub async fn load_vms(&self) {
        match self.backend.list_vms().await {
            Ok(vms) => {
                self.document.set_html(Slot::VmsTable, render::vms_table(&vms));
                lock(&self.cache).vms = vms;
            }
            Err(e) => {
                self.show_error(format!("Ошибка загрузки ВМ: {}", e));
            }
        }
    }

    pub async fn load_create_vm_data(&self) {
        self.load_available_isos().await;
        self.populate_iso_select();
    }

    pub async fn load_available_isos(&self) {
        let isos = match self.backend.list_isos().await {
            Ok(isos) => isos,
            Err(e) => {
                tracing::error!(%e, "Failed to load ISO images");
                Vec::new()
            }
        };
        lock(&self.cache).available_isos = isos;
    }

    pub fn populate_iso_select(&self) {
        let html = render::iso_options(&lock(&self.cache).available_isos);
        self.document.set_html(Slot::IsoSelect, html);
    }

    pub async fn load_images_data(&self) {
        self.load_os_catalog().await;
        self.load_downloaded_isos().await;
        self.display_os_catalog();
        self.display_downloaded_isos();
    }

    pub async fn load_os_catalog(&self) {
        let catalog = match self.backend.os_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(%e, "Failed to load OS catalog");
                Vec::new()
            }
        };
        lock(&self.cache).os_catalog = catalog;
    }

    pub async fn load_downloaded_isos(&self) {
        let isos = match self.backend.list_isos().await {
            Ok(isos) => isos,
            Err(e) => {
                tracing::error!(%e, "Failed to load downloaded ISO images");
                Vec::new()
            }
        };
        lock(&self.cache).downloaded_isos = isos;
    }

    pub fn display_os_catalog(&self) {
        let html = {
            let cache = lock(&self.cache);
            render::os_catalog_list(&cache.os_catalog, &cache.downloaded_isos)
        };
        self.document.set_html(Slot::OsCatalogList, html);
    }

    pub fn display_downloaded_isos(&self) {
        let html = render::downloaded_isos_table(&lock(&self.cache).downloaded_isos);
        self.document.set_html(Slot::DownloadedIsosTable, html);
    }

    // ---------------------------------------------------------------------
    // Stats polling
    // ---------------------------------------------------------------------

    /// Start the periodic host stats refresh; no-op when already running.
    pub fn start_stats_update(&self) {
        let mut poller = lock(&self.poller);
        if poller.as_ref().is_some_and(StatsPoller::is_running) {
            return;
        }
        tracing::debug!(interval = ?self.settings.poll_interval, "Starting host stats polling");
        *poller = Some(StatsPoller::spawn(
            self.backend.clone(),
            self.document.clone(),
            self.current_page.clone(),
            self.stats_in_flight.clone(),
            self.settings.poll_interval,
        ));
    }

    pub fn stop_stats_update(&self) {
        if lock(&self.poller).take().is_some() {
            tracing::debug!("Stopped host stats polling");
        }
    }

    pub fn is_polling(&self) -> bool {
        lock(&self.poller).as_ref().is_some_and(StatsPoller::is_running)
    }

    // ---------------------------------------------------------------------
    // VM actions
    // ---------------------------------------------------------------------

    pub async fn start_vm(&self, name: &str) -> ActionOutcome {
        self.vm_action(name, VmAction::Start, format!("ВМ '{}' запущена", name), "Ошибка запуска ВМ")
            .await
    }

    pub async fn stop_vm(&self, name: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&format!("Остановить ВМ '{}'?", name)) {
            return ActionOutcome::Cancelled;
        }
        self.vm_action(name, VmAction::Stop, format!("ВМ '{}' остановлена", name), "Ошибка остановки ВМ")
            .await
    }

    /// Like [`stop_vm`](Self::stop_vm) but asks the backend to pull the plug.
    pub async fn force_stop_vm(&self, name: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&format!("Принудительно остановить ВМ '{}'?", name)) {
            return ActionOutcome::Cancelled;
        }
        self.vm_action(name, VmAction::ForceStop, format!("ВМ '{}' остановлена", name), "Ошибка остановки ВМ")
            .await
    }

    pub async fn restart_vm(&self, name: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&format!("Перезагрузить ВМ '{}'?", name)) {
            return ActionOutcome::Cancelled;
        }
        self.vm_action(name, VmAction::Restart, format!("ВМ '{}' перезагружена", name), "Ошибка перезагрузки ВМ")
            .await
    }

    /// Asks twice: once to delete at all, once whether the disks go too.
    pub async fn delete_vm(&self, name: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&format!("Удалить ВМ '{}'? Это действие нельзя отменить!", name)) {
            return ActionOutcome::Cancelled;
        }
        let delete_disks = confirm.confirm("Также удалить диски ВМ?");

        let result = self.backend.delete_vm(name, delete_disks).await;
        self.finish_action(result, format!("ВМ '{}' удалена", name), "Ошибка удаления ВМ")
            .await
    }

    async fn vm_action(&self, name: &str, action: VmAction, success: String, context: &str) -> ActionOutcome {
        let result = self.backend.vm_action(name, action).await;
        self.finish_action(result, success, context).await
    }

    /// Notify, and on success reload whatever page is showing.
    async fn finish_action(&self, result: Result<(), ApiError>, success: String, context: &str) -> ActionOutcome {
        match result {
            Ok(()) => {
                self.show_success(success);
                self.refresh_current_page().await;
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message(context));
                ActionOutcome::Failed(e)
            }
        }
    }

    pub fn open_console(&self, name: &str) {
        let src = self.backend.console_url(name);
        self.document.open_console(name, &src);
    }

    pub fn close_console(&self) {
        self.document.close_console();
    }

    // ---------------------------------------------------------------------
    // ISO and catalog actions
    // ---------------------------------------------------------------------

    pub async fn scan_isos(&self) -> ActionOutcome {
        match self.backend.rescan_isos().await {
            Ok(()) => {
                self.show_success("Сканирование ISO завершено");
                self.load_images_data().await;
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message("Ошибка сканирования ISO"));
                ActionOutcome::Failed(e)
            }
        }
    }

    pub fn show_download_dialog(&self) {
        self.document.set_download_dialog(true);
    }

    pub fn close_download_dialog(&self) {
        self.document.set_download_dialog(false);
    }

    /// Start a download from the dialog. An empty URL is rejected before any
    /// request is made.
    pub async fn download_iso(&self, form: &DownloadIsoForm) -> ActionOutcome {
        let url = form.url.trim();
        if url.is_empty() {
            self.show_error("Введите URL для скачивания");
            return ActionOutcome::Rejected;
        }
        let filename = form.filename.trim();
        let request = DownloadIsoRequest {
            url: url.to_string(),
            filename: if filename.is_empty() { None } else { Some(filename.to_string()) },
        };

        match self.backend.download_iso(&request).await {
            Ok(()) => {
                self.show_success("Загрузка ISO начата");
                self.document.set_download_dialog(false);
                self.document.reset_form(FormId::DownloadIso);
                self.schedule_images_refresh();
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message("Ошибка скачивания ISO"));
                ActionOutcome::Failed(e)
            }
        }
    }

    pub async fn download_os_from_catalog(&self, url: &str, filename: &str) -> ActionOutcome {
        let request = DownloadIsoRequest {
            url: url.to_string(),
            filename: Some(filename.to_string()),
        };
        match self.backend.download_iso(&request).await {
            Ok(()) => {
                self.show_success(format!("Загрузка {} начата", filename));
                self.schedule_images_refresh();
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message("Ошибка скачивания ISO"));
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Downloads report no completion; reload after a fixed delay instead.
    fn schedule_images_refresh(&self) {
        let this = self.clone();
        let delay = self.settings.download_refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.load_images_data().await;
        });
    }

    pub async fn delete_iso(&self, iso_path: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm("Удалить ISO образ? Это действие нельзя отменить!") {
            return ActionOutcome::Cancelled;
        }
        match self.backend.delete_iso(iso_path).await {
            Ok(()) => {
                self.show_success("ISO образ удален");
                self.load_images_data().await;
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message("Ошибка удаления ISO"));
                ActionOutcome::Failed(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // VM creation
    // ---------------------------------------------------------------------

    pub async fn create_vm(&self, form: &CreateVmForm) -> ActionOutcome {
        let request = CreateVmRequest::from(form);
        match self.backend.create_vm(&request).await {
            Ok(()) => {
                self.show_success(format!("ВМ '{}' создана", request.name));
                self.document.reset_form(FormId::CreateVm);
                self.show_page(Page::Vms.to_str()).await;
                ActionOutcome::Done
            }
            Err(e) => {
                self.show_error(e.user_message("Ошибка создания ВМ"));
                ActionOutcome::Failed(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    pub fn show_success(&self, message: impl Into<String>) -> u64 {
        self.show_alert(AlertLevel::Success, message.into())
    }

    pub fn show_error(&self, message: impl Into<String>) -> u64 {
        self.show_alert(AlertLevel::Error, message.into())
    }

    /// Append an alert and schedule its removal. Returns the alert id.
    pub fn show_alert(&self, level: AlertLevel, message: String) -> u64 {
        let id = self.next_alert_id.fetch_add(1, Ordering::Relaxed);
        match level {
            AlertLevel::Success => tracing::info!(id, %message, "notification"),
            AlertLevel::Error => tracing::warn!(id, %message, "notification"),
        }
        self.document.append_alert(Alert { id, level, message });

        let document = self.document.clone();
        let ttl = self.settings.alert_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            document.remove_alert(id);
        });
        id
    }

    pub fn dismiss_alert(&self, id: u64) -> bool {
        self.document.remove_alert(id)
    }
}
