//! The rendering surface the view controller writes into.
//!
//! A [`Document`] plays the role the DOM plays in a browser: pages that can be
//! shown or hidden, a navigation bar with one active entry, named slots whose
//! text or markup gets replaced, and a stack of transient alerts.

mod html;
mod terminal;

pub use html::{ConsoleFrame, DocumentSnapshot, HtmlDocument};
pub use terminal::TerminalDocument;

use crate::models::{Alert, Page};

/// Named elements the controller fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    CpuUsage,
    MemoryUsage,
    DiskUsage,
    TotalVms,
    ActiveVmsList,
    VmsTable,
    IsoSelect,
    OsCatalogList,
    DownloadedIsosTable,
}

impl Slot {
    /// Element id in the page shell.
    pub fn id(&self) -> &'static str {
        match self {
            Slot::CpuUsage => "cpu-usage",
            Slot::MemoryUsage => "memory-usage",
            Slot::DiskUsage => "disk-usage",
            Slot::TotalVms => "total-vms",
            Slot::ActiveVmsList => "active-vms-list",
            Slot::VmsTable => "vms-table",
            Slot::IsoSelect => "vm-iso",
            Slot::OsCatalogList => "os-catalog-list",
            Slot::DownloadedIsosTable => "downloaded-isos-table",
        }
    }
}

/// Forms whose inputs get cleared after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    CreateVm,
    DownloadIso,
}

pub trait Document: Clone + Send + Sync + 'static {
    /// Hide every page, then show `page` if it exists.
    fn show_page(&self, page: Option<Page>);
    /// Mark the navigation entry of `page` active and clear the others.
    fn set_active_nav(&self, page: Option<Page>);
    /// Replace the text content of a slot.
    fn set_text(&self, slot: Slot, text: String);
    /// Replace the inner markup of a slot.
    fn set_html(&self, slot: Slot, html: String);
    fn append_alert(&self, alert: Alert);
    /// Returns false when the alert was already gone.
    fn remove_alert(&self, id: u64) -> bool;
    fn reset_form(&self, form: FormId);
    fn set_download_dialog(&self, open: bool);
    fn open_console(&self, vm_name: &str, src: &str);
    fn close_console(&self);
}
