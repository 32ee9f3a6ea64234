// REST client for the KVM backend
pub mod error;
pub mod client;
pub mod backend;
pub mod host;
pub mod vms;
pub mod iso;

pub use error::ApiError;
pub use client::{set_silent, KvmClient};
pub use backend::Backend;
pub use vms::VmAction;
