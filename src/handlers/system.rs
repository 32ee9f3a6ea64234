use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::api::Backend;
use crate::models::{AppState, ConfirmationAction};
use crate::templates::{ConfirmCheckbox, ConfirmationTemplate};
use super::helpers::{back_to_panel, build_template_globals, render_template, TemplateGlobals};

#[derive(Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    target: String,
}

/// Confirmation page shown before a destructive action is posted.
pub async fn confirmation_get<B: Backend>(
    State(state): State<AppState<B>>,
    Path(action): Path<String>,
    Query(q): Query<ConfirmQuery>,
) -> impl IntoResponse {
    let Some(action) = ConfirmationAction::from_str(&action) else {
        return Redirect::to("/").into_response();
    };
    let target = q.target;
    let encoded = urlencoding::encode(&target).into_owned();

    let (title, message, target_url, confirm_label, hidden_fields, checkbox) = match action {
        ConfirmationAction::StopVm => (
            "Остановить ВМ",
            format!("Остановить ВМ '{}'?", target),
            format!("/vms/{}/stop", encoded),
            "Остановить",
            vec![],
            None,
        ),
        ConfirmationAction::ForceStopVm => (
            "Принудительная остановка",
            format!("Принудительно остановить ВМ '{}'?", target),
            format!("/vms/{}/force-stop", encoded),
            "Остановить",
            vec![],
            None,
        ),
        ConfirmationAction::RestartVm => (
            "Перезагрузить ВМ",
            format!("Перезагрузить ВМ '{}'?", target),
            format!("/vms/{}/restart", encoded),
            "Перезагрузить",
            vec![],
            None,
        ),
        ConfirmationAction::DeleteVm => (
            "Удалить ВМ",
            format!("Удалить ВМ '{}'? Это действие нельзя отменить!", target),
            format!("/vms/{}/delete", encoded),
            "Удалить",
            vec![],
            Some(ConfirmCheckbox {
                name: "delete_disks".into(),
                label: "Также удалить диски ВМ?".into(),
            }),
        ),
        ConfirmationAction::DeleteIso => (
            "Удалить ISO образ",
            "Удалить ISO образ? Это действие нельзя отменить!".to_string(),
            "/iso/delete".to_string(),
            "Удалить",
            vec![("iso_path".to_string(), target.clone())],
            None,
        ),
    };

    let button_class = match action {
        ConfirmationAction::RestartVm => "btn-warning",
        _ => "btn-danger",
    };

    let TemplateGlobals { api_hostname, alerts } = build_template_globals(&state);
    render_template(ConfirmationTemplate {
        api_hostname,
        alerts,
        title: title.to_string(),
        message,
        target_url,
        confirm_label: confirm_label.to_string(),
        cancel_url: "/".to_string(),
        button_class: button_class.to_string(),
        hidden_fields,
        checkbox,
    })
}

pub async fn alert_dismiss_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    state.controller.dismiss_alert(id);
    back_to_panel()
}
