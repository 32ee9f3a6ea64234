use askama::Template;

use crate::document::{ConsoleFrame, DocumentSnapshot, Slot};
use crate::models::Page;

pub struct NavItem {
    pub page: &'static str,
    pub title: &'static str,
    pub active: bool,
}

/// The single-page shell: every page is rendered, only the visible one is
/// displayed.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    pub api_hostname: String,
    pub alerts: Vec<String>,

    pub title: &'static str,
    pub nav: Vec<NavItem>,
    pub show_dashboard: bool,
    pub show_vms: bool,
    pub show_create_vm: bool,
    pub show_images: bool,

    pub cpu_usage: String,
    pub memory_usage: String,
    pub disk_usage: String,
    pub total_vms: String,
    pub active_vms_list: String,
    pub vms_table: String,
    pub iso_options: String,
    pub os_catalog_list: String,
    pub downloaded_isos_table: String,

    pub download_dialog_open: bool,
    pub console: Option<ConsoleFrame>,
    pub poll_interval_ms: u128,
}

impl PanelTemplate {
    pub fn from_snapshot(snapshot: DocumentSnapshot, api_hostname: String, alerts: Vec<String>, poll_interval_ms: u128) -> Self {
        let nav = Page::ALL
            .iter()
            .map(|p| NavItem {
                page: p.to_str(),
                title: p.title(),
                active: snapshot.active_nav == Some(*p),
            })
            .collect();
        let slot = |s: Slot| snapshot.slot(s).to_string();

        Self {
            api_hostname,
            alerts,
            title: snapshot.visible_page.map(|p| p.title()).unwrap_or("KVM Panel"),
            nav,
            show_dashboard: snapshot.is_visible(Page::Dashboard),
            show_vms: snapshot.is_visible(Page::Vms),
            show_create_vm: snapshot.is_visible(Page::CreateVm),
            show_images: snapshot.is_visible(Page::Images),
            cpu_usage: slot(Slot::CpuUsage),
            memory_usage: slot(Slot::MemoryUsage),
            disk_usage: slot(Slot::DiskUsage),
            total_vms: slot(Slot::TotalVms),
            active_vms_list: slot(Slot::ActiveVmsList),
            vms_table: slot(Slot::VmsTable),
            iso_options: slot(Slot::IsoSelect),
            os_catalog_list: slot(Slot::OsCatalogList),
            downloaded_isos_table: slot(Slot::DownloadedIsosTable),
            download_dialog_open: snapshot.download_dialog_open,
            console: snapshot.console.clone(),
            poll_interval_ms,
        }
    }
}
