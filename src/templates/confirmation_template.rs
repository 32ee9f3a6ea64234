use askama::Template;

pub struct ConfirmCheckbox {
    pub name: String,
    pub label: String,
}

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmationTemplate {
    pub api_hostname: String,
    pub alerts: Vec<String>,

    pub title: String,
    pub message: String,
    pub target_url: String,
    pub confirm_label: String,
    pub cancel_url: String,
    pub button_class: String,
    pub hidden_fields: Vec<(String, String)>,
    /// Second question asked on the same page (delete disks too?).
    pub checkbox: Option<ConfirmCheckbox>,
}
