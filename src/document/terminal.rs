use std::sync::{Arc, Mutex, PoisonError};

use yansi::Paint;

use super::{Document, FormId, Slot};
use crate::models::{Alert, AlertLevel, Page};

#[derive(Default, Debug)]
struct StatsLine {
    cpu: String,
    memory: String,
}

/// Document that prints to the terminal. Markup slots are not shown; the
/// three host-stat displays are printed as one line once the disk value
/// (the last one written per refresh) arrives.
#[derive(Clone, Debug, Default)]
pub struct TerminalDocument {
    stats: Arc<Mutex<StatsLine>>,
}

impl TerminalDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Document for TerminalDocument {
    fn show_page(&self, page: Option<Page>) {
        tracing::debug!(?page, "show page");
    }

    fn set_active_nav(&self, _page: Option<Page>) {}

    fn set_text(&self, slot: Slot, text: String) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        match slot {
            Slot::CpuUsage => stats.cpu = text,
            Slot::MemoryUsage => stats.memory = text,
            Slot::DiskUsage => {
                println!(
                    "{} {}  {} {}  {} {}",
                    Paint::new("CPU").bold(),
                    Paint::new(&stats.cpu).cyan(),
                    Paint::new("Memory").bold(),
                    Paint::new(&stats.memory).cyan(),
                    Paint::new("Disk").bold(),
                    Paint::new(&text).cyan()
                );
            }
            Slot::TotalVms => println!("{} {}", Paint::new("VMs:").bold(), text),
            _ => println!("{}", text),
        }
    }

    fn set_html(&self, slot: Slot, _html: String) {
        tracing::trace!(slot = slot.id(), "markup slot updated");
    }

    fn append_alert(&self, alert: Alert) {
        match alert.level {
            AlertLevel::Success => println!("{} {}", Paint::new("✔").green().bold(), Paint::new(&alert.message).green()),
            AlertLevel::Error => eprintln!("{} {}", Paint::new("✘").red().bold(), Paint::new(&alert.message).red()),
        }
    }

    fn remove_alert(&self, _id: u64) -> bool {
        false
    }

    fn reset_form(&self, _form: FormId) {}

    fn set_download_dialog(&self, _open: bool) {}

    fn open_console(&self, vm_name: &str, src: &str) {
        println!(
            "{} {}: {}",
            Paint::new("Console for").green(),
            vm_name,
            Paint::new(src).cyan().underline()
        );
    }

    fn close_console(&self) {}
}
