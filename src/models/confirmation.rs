use serde::{Deserialize, Serialize};

/// Destructive actions that go through a confirmation page first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfirmationAction {
    StopVm,
    ForceStopVm,
    RestartVm,
    DeleteVm,
    DeleteIso,
}

impl ConfirmationAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "stop-vm" => Some(Self::StopVm),
            "force-stop-vm" => Some(Self::ForceStopVm),
            "restart-vm" => Some(Self::RestartVm),
            "delete-vm" => Some(Self::DeleteVm),
            "delete-iso" => Some(Self::DeleteIso),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::StopVm => "stop-vm",
            Self::ForceStopVm => "force-stop-vm",
            Self::RestartVm => "restart-vm",
            Self::DeleteVm => "delete-vm",
            Self::DeleteIso => "delete-iso",
        }
    }

    /// Link to the confirmation page for `target` (a VM name or ISO path).
    pub fn confirm_href(&self, target: &str) -> String {
        format!("/confirm/{}?target={}", self.to_str(), urlencoding::encode(target))
    }
}
