use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub total: u64,
}

impl ResourceUsage {
    /// Percentage used; an unknown total reads as zero.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64 * 100.0
        }
    }
}

/// Payload of `GET /host/stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostStats {
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub memory: ResourceUsage,
    #[serde(default)]
    pub disk: ResourceUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
}

impl HostStats {
    pub fn cpu_display(&self) -> String {
        format!("{:.1}%", self.cpu_percent)
    }

    pub fn memory_display(&self) -> String {
        format!("{:.1}%", self.memory.percent())
    }

    pub fn disk_display(&self) -> String {
        format!("{:.1}%", self.disk.percent())
    }
}

/// Payload of the API root, used to validate connectivity.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub demo_mode: bool,
}
