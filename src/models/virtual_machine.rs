use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmMemory {
    /// Maximum memory in bytes.
    pub max: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
}

/// A virtual machine as reported by the backend. `name` is the unique key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub name: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub memory: VmMemory,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_time: Option<u64>,
}

impl VirtualMachine {
    /// Memory ceiling in whole megabytes, rounded to nearest.
    pub fn memory_mb(&self) -> u64 {
        (self.memory.max as f64 / 1024.0 / 1024.0).round() as u64
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_active {
            "Запущена"
        } else {
            "Остановлена"
        }
    }
}
