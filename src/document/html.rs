use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Document, FormId, Slot};
use crate::models::{Alert, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleFrame {
    pub vm_name: String,
    pub src: String,
}

/// Everything currently visible in an [`HtmlDocument`].
#[derive(Clone, Debug, Default)]
pub struct DocumentSnapshot {
    pub visible_page: Option<Page>,
    pub active_nav: Option<Page>,
    pub slots: HashMap<Slot, String>,
    pub alerts: Vec<Alert>,
    pub console: Option<ConsoleFrame>,
    pub download_dialog_open: bool,
    /// How many times each form was cleared.
    pub form_resets: HashMap<FormId, u64>,
}

impl DocumentSnapshot {
    /// Slot content, empty when never written.
    pub fn slot(&self, slot: Slot) -> &str {
        self.slots.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn is_visible(&self, page: Page) -> bool {
        self.visible_page == Some(page)
    }

    pub fn resets(&self, form: FormId) -> u64 {
        self.form_resets.get(&form).copied().unwrap_or(0)
    }
}

/// In-memory document shared between the controller and the web shell that
/// renders it. Cloning yields another handle to the same document.
#[derive(Clone, Debug, Default)]
pub struct HtmlDocument {
    inner: Arc<Mutex<DocumentSnapshot>>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, DocumentSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state().clone()
    }
}

impl Document for HtmlDocument {
    fn show_page(&self, page: Option<Page>) {
        self.state().visible_page = page;
    }

    fn set_active_nav(&self, page: Option<Page>) {
        self.state().active_nav = page;
    }

    fn set_text(&self, slot: Slot, text: String) {
        self.state().slots.insert(slot, text);
    }

    fn set_html(&self, slot: Slot, html: String) {
        self.state().slots.insert(slot, html);
    }

    fn append_alert(&self, alert: Alert) {
        self.state().alerts.push(alert);
    }

    fn remove_alert(&self, id: u64) -> bool {
        let mut state = self.state();
        let before = state.alerts.len();
        state.alerts.retain(|a| a.id != id);
        state.alerts.len() != before
    }

    fn reset_form(&self, form: FormId) {
        *self.state().form_resets.entry(form).or_insert(0) += 1;
    }

    fn set_download_dialog(&self, open: bool) {
        self.state().download_dialog_open = open;
    }

    fn open_console(&self, vm_name: &str, src: &str) {
        self.state().console = Some(ConsoleFrame {
            vm_name: vm_name.to_string(),
            src: src.to_string(),
        });
    }

    fn close_console(&self) {
        self.state().console = None;
    }
}
