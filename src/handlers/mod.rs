pub mod helpers;
pub mod pages;
pub mod vms;
pub mod iso;
pub mod system;
