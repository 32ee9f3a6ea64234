pub mod virtual_machine;
pub mod iso_image;
pub mod catalog_entry;
pub mod host_stats;
pub mod page;
pub mod forms;
pub mod notification;
pub mod confirmation;
pub mod app_state;

pub use virtual_machine::{VirtualMachine, VmMemory};
pub use iso_image::{IsoImage, IsoScan};
pub use catalog_entry::{CatalogEntry, OsCatalog};
pub use host_stats::{ApiInfo, HostStats, ResourceUsage};
pub use page::Page;
pub use forms::{CreateVmForm, CreateVmRequest, DownloadIsoForm, DownloadIsoRequest};
pub use notification::{Alert, AlertLevel};
pub use confirmation::ConfirmationAction;
pub use app_state::AppState;
