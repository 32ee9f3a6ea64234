use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::Backend;
use crate::document::{Document, Slot};
use crate::models::Page;

/// Clears the in-progress flag when the refresh ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fetch host stats and write the three percentage displays.
///
/// Returns false without issuing a request when another refresh is still in
/// flight. Failures are logged and leave the displays untouched.
pub(crate) async fn refresh_host_stats<B, D>(backend: &B, document: &D, in_flight: &AtomicBool) -> bool
where
    B: Backend + ?Sized,
    D: Document,
{
    if in_flight.swap(true, Ordering::AcqRel) {
        tracing::debug!("host stats refresh already in flight; skipping");
        return false;
    }
    let _guard = InFlight(in_flight);

    match backend.host_stats().await {
        Ok(stats) => {
            document.set_text(Slot::CpuUsage, stats.cpu_display());
            document.set_text(Slot::MemoryUsage, stats.memory_display());
            document.set_text(Slot::DiskUsage, stats.disk_display());
        }
        Err(e) => {
            tracing::error!(%e, "Failed to update host stats");
        }
    }
    true
}

/// Background task refreshing host stats on a fixed interval while the
/// dashboard is the current page. Dropping the handle stops the task.
pub struct StatsPoller {
    handle: JoinHandle<()>,
}

impl StatsPoller {
    pub(crate) fn spawn<B, D>(
        backend: Arc<B>,
        document: D,
        current_page: Arc<Mutex<Page>>,
        in_flight: Arc<AtomicBool>,
        interval: Duration,
    ) -> Self
    where
        B: Backend,
        D: Document,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the page load already fetched stats.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let page = *current_page.lock().unwrap_or_else(PoisonError::into_inner);
                if page != Page::Dashboard {
                    continue;
                }
                // Not awaited inline: a slow backend must not stretch the interval.
                let backend = backend.clone();
                let document = document.clone();
                let in_flight = in_flight.clone();
                tokio::spawn(async move {
                    refresh_host_stats(&*backend, &document, &in_flight).await;
                });
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
