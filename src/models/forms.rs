use serde::{Deserialize, Serialize};

use crate::utils::parse_number;

/// Raw values of the VM creation form, as typed by the user.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateVmForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub vcpus: String,
    #[serde(default)]
    pub disk_size: String,
    #[serde(default)]
    pub iso_path: String,
    #[serde(default)]
    pub network: String,
}

/// Body of `POST /vms`. Numbers that fail to parse are sent as `null`
/// and left for the backend to reject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVmRequest {
    pub name: String,
    pub memory: Option<i64>,
    pub vcpus: Option<i64>,
    pub disk_size: Option<i64>,
    pub iso_path: Option<String>,
    pub network: String,
}

impl From<&CreateVmForm> for CreateVmRequest {
    fn from(form: &CreateVmForm) -> Self {
        let iso_path = form.iso_path.trim();
        Self {
            name: form.name.clone(),
            memory: parse_number(&form.memory),
            vcpus: parse_number(&form.vcpus),
            disk_size: parse_number(&form.disk_size),
            iso_path: if iso_path.is_empty() { None } else { Some(iso_path.to_string()) },
            network: form.network.clone(),
        }
    }
}

/// Raw values of the ISO download dialog.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DownloadIsoForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub filename: String,
}

/// Body of `POST /iso/download`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadIsoRequest {
    pub url: String,
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_coerces_numbers() {
        let form = CreateVmForm {
            name: "db1".into(),
            memory: "2048".into(),
            vcpus: " 2 ".into(),
            disk_size: "abc".into(),
            iso_path: "".into(),
            network: "default".into(),
        };
        let req = CreateVmRequest::from(&form);
        assert_eq!(req.memory, Some(2048));
        assert_eq!(req.vcpus, Some(2));
        assert_eq!(req.disk_size, None);
        assert_eq!(req.iso_path, None);

        let body = serde_json::to_value(&req).unwrap();
        assert!(body["disk_size"].is_null());
        assert!(body["iso_path"].is_null());
    }
}
