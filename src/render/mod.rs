//! Markup fragments for the panel. Every function here is a pure function of
//! its records; the controller decides where the fragments go.

use askama::Template;

use crate::models::{Alert, CatalogEntry, ConfirmationAction, IsoImage, VirtualMachine};
use crate::utils::{format_file_size, format_timestamp, get_os_icon};

const NO_ACTIVE_VMS: &str = "Нет активных виртуальных машин";
const NO_VMS: &str = "Нет виртуальных машин";
const CATALOG_UNAVAILABLE: &str = "Каталог ОС недоступен";
const NO_DOWNLOADED_ISOS: &str = "Нет скачанных ISO образов";

#[derive(Template)]
#[template(path = "fragments/vm_card.html")]
struct VmCardTemplate<'a> {
    vm: &'a VirtualMachine,
    compact: bool,
    links: VmLinks,
    status_icon: &'static str,
    status_class: &'static str,
}

#[derive(Template)]
#[template(path = "fragments/vm_row.html")]
struct VmRowTemplate<'a> {
    vm: &'a VirtualMachine,
    links: VmLinks,
    status_icon: &'static str,
    status_class: &'static str,
}

#[derive(Template)]
#[template(path = "fragments/vm_actions.html")]
struct VmActionsTemplate<'a> {
    vm: &'a VirtualMachine,
    links: VmLinks,
}

/// Targets of the action buttons of one VM.
struct VmLinks {
    console: String,
    start: String,
    stop: String,
    force_stop: String,
    restart: String,
    delete: String,
}

impl VmLinks {
    fn new(vm: &VirtualMachine) -> Self {
        let name = urlencoding::encode(&vm.name);
        Self {
            console: format!("/console/{}", name),
            start: format!("/vms/{}/start", name),
            stop: ConfirmationAction::StopVm.confirm_href(&vm.name),
            force_stop: ConfirmationAction::ForceStopVm.confirm_href(&vm.name),
            restart: ConfirmationAction::RestartVm.confirm_href(&vm.name),
            delete: ConfirmationAction::DeleteVm.confirm_href(&vm.name),
        }
    }
}

#[derive(Template)]
#[template(path = "fragments/catalog_card.html")]
struct CatalogCardTemplate<'a> {
    entry: &'a CatalogEntry,
    icon: &'static str,
    size: String,
    downloaded: bool,
}

#[derive(Template)]
#[template(path = "fragments/iso_row.html")]
struct IsoRowTemplate<'a> {
    iso: &'a IsoImage,
    size: String,
    modified: String,
    delete_href: String,
}

#[derive(Template)]
#[template(path = "fragments/iso_option.html")]
struct IsoOptionTemplate<'a> {
    iso: &'a IsoImage,
    size: String,
}

#[derive(Template)]
#[template(path = "fragments/alert.html")]
struct AlertTemplate<'a> {
    alert: &'a Alert,
}

#[derive(Template)]
#[template(path = "fragments/empty_state.html")]
struct EmptyStateTemplate<'a> {
    message: &'a str,
    table: bool,
    colspan: usize,
}

fn render_fragment<T: Template>(t: T) -> String {
    match t.render() {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(%e, "Fragment render error");
            String::new()
        }
    }
}

fn status_icon(vm: &VirtualMachine) -> (&'static str, &'static str) {
    if vm.is_active {
        ("fa-play-circle", "status-running")
    } else {
        ("fa-stop-circle", "status-stopped")
    }
}

/// Card for one VM; `compact` cards are narrower (dashboard grid).
pub fn vm_card(vm: &VirtualMachine, compact: bool) -> String {
    let (status_icon, status_class) = status_icon(vm);
    render_fragment(VmCardTemplate {
        vm,
        compact,
        links: VmLinks::new(vm),
        status_icon,
        status_class,
    })
}

pub fn vm_table_row(vm: &VirtualMachine) -> String {
    let (status_icon, status_class) = status_icon(vm);
    render_fragment(VmRowTemplate {
        vm,
        links: VmLinks::new(vm),
        status_icon,
        status_class,
    })
}

/// Running VMs get console, stop, force stop and restart; stopped ones get start.
/// Every VM gets delete.
pub fn vm_action_buttons(vm: &VirtualMachine) -> String {
    render_fragment(VmActionsTemplate { vm, links: VmLinks::new(vm) })
}

/// Dashboard grid of running VMs.
pub fn active_vms_list(vms: &[VirtualMachine]) -> String {
    let cards: Vec<String> = vms.iter().filter(|vm| vm.is_active).map(|vm| vm_card(vm, true)).collect();
    if cards.is_empty() {
        return empty_state(NO_ACTIVE_VMS, None);
    }
    cards.concat()
}

pub fn vms_table(vms: &[VirtualMachine]) -> String {
    if vms.is_empty() {
        return empty_state(NO_VMS, Some(5));
    }
    vms.iter().map(vm_table_row).collect()
}

pub fn catalog_card(entry: &CatalogEntry, downloaded: bool) -> String {
    render_fragment(CatalogCardTemplate {
        entry,
        icon: get_os_icon(&entry.name),
        size: format_file_size(entry.size),
        downloaded,
    })
}

/// Catalog grid; each entry is checked against the downloaded ISOs.
pub fn os_catalog_list(catalog: &[CatalogEntry], downloaded: &[IsoImage]) -> String {
    if catalog.is_empty() {
        return empty_state(CATALOG_UNAVAILABLE, None);
    }
    catalog
        .iter()
        .map(|entry| catalog_card(entry, entry.is_downloaded_in(downloaded)))
        .collect()
}

pub fn iso_table_row(iso: &IsoImage) -> String {
    render_fragment(IsoRowTemplate {
        iso,
        size: format_file_size(iso.size),
        modified: format_timestamp(&iso.modified),
        delete_href: ConfirmationAction::DeleteIso.confirm_href(&iso.path),
    })
}

pub fn downloaded_isos_table(isos: &[IsoImage]) -> String {
    if isos.is_empty() {
        return empty_state(NO_DOWNLOADED_ISOS, Some(4));
    }
    isos.iter().map(iso_table_row).collect()
}

pub fn iso_option(iso: &IsoImage) -> String {
    render_fragment(IsoOptionTemplate { iso, size: format_file_size(iso.size) })
}

/// Options appended after the fixed "no ISO" entry of the select.
pub fn iso_options(isos: &[IsoImage]) -> String {
    isos.iter().map(iso_option).collect()
}

pub fn alert(alert: &Alert) -> String {
    render_fragment(AlertTemplate { alert })
}

/// Placeholder for an empty list; `colspan` renders a table row.
pub fn empty_state(message: &str, colspan: Option<usize>) -> String {
    render_fragment(EmptyStateTemplate {
        message,
        table: colspan.is_some(),
        colspan: colspan.unwrap_or(0),
    })
}
