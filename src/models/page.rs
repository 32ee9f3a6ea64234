use serde::{Deserialize, Serialize};

/// The four views of the panel. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    Vms,
    CreateVm,
    Images,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Vms, Page::CreateVm, Page::Images];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dashboard" => Some(Self::Dashboard),
            "vms" => Some(Self::Vms),
            "create-vm" => Some(Self::CreateVm),
            "images" => Some(Self::Images),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Vms => "vms",
            Self::CreateVm => "create-vm",
            Self::Images => "images",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Дашборд",
            Self::Vms => "Виртуальные машины",
            Self::CreateVm => "Создать ВМ",
            Self::Images => "ISO образы",
        }
    }

    /// Element id of the page container.
    pub fn element_id(&self) -> String {
        format!("{}-page", self.to_str())
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_str(page.to_str()), Some(page));
        }
        assert_eq!(Page::from_str("settings"), None);
        assert_eq!(Page::CreateVm.element_id(), "create-vm-page");
    }
}
