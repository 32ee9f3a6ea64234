use std::collections::HashMap;

use axum::{
    extract::{Form, Path, State},
    response::IntoResponse,
};

use crate::api::Backend;
use crate::models::{AppState, CreateVmForm};
use super::helpers::{back_to_panel, confirm_answers};

pub async fn vm_start_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    state.controller.start_vm(&name).await;
    back_to_panel()
}

pub async fn vm_stop_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let confirm = confirm_answers(&form, &["confirmed"]);
    state.controller.stop_vm(&name, &confirm).await;
    back_to_panel()
}

pub async fn vm_force_stop_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let confirm = confirm_answers(&form, &["confirmed"]);
    state.controller.force_stop_vm(&name, &confirm).await;
    back_to_panel()
}

pub async fn vm_restart_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let confirm = confirm_answers(&form, &["confirmed"]);
    state.controller.restart_vm(&name, &confirm).await;
    back_to_panel()
}

pub async fn vm_delete_post<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let confirm = confirm_answers(&form, &["confirmed", "delete_disks"]);
    state.controller.delete_vm(&name, &confirm).await;
    back_to_panel()
}

pub async fn vm_create_post<B: Backend>(
    State(state): State<AppState<B>>,
    Form(form): Form<CreateVmForm>,
) -> impl IntoResponse {
    state.controller.create_vm(&form).await;
    back_to_panel()
}

pub async fn console_get<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    state.controller.open_console(&name);
    back_to_panel()
}

pub async fn console_close_post<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    state.controller.close_console();
    back_to_panel()
}
