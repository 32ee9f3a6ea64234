use std::collections::HashMap;

use axum::{
    extract::{Form, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::api::Backend;
use crate::models::{AppState, DownloadIsoForm};
use super::helpers::{back_to_panel, confirm_answers};

#[derive(Deserialize)]
pub struct CatalogDownloadForm {
    url: String,
    filename: String,
}

pub async fn iso_scan_post<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    state.controller.scan_isos().await;
    back_to_panel()
}

pub async fn iso_download_dialog_get<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    state.controller.show_download_dialog();
    back_to_panel()
}

pub async fn iso_download_cancel_post<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    state.controller.close_download_dialog();
    back_to_panel()
}

pub async fn iso_download_post<B: Backend>(
    State(state): State<AppState<B>>,
    Form(form): Form<DownloadIsoForm>,
) -> impl IntoResponse {
    state.controller.download_iso(&form).await;
    back_to_panel()
}

pub async fn iso_catalog_download_post<B: Backend>(
    State(state): State<AppState<B>>,
    Form(form): Form<CatalogDownloadForm>,
) -> impl IntoResponse {
    state.controller.download_os_from_catalog(&form.url, &form.filename).await;
    back_to_panel()
}

pub async fn iso_delete_post<B: Backend>(
    State(state): State<AppState<B>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let iso_path = form.get("iso_path").cloned().unwrap_or_default();
    let confirm = confirm_answers(&form, &["confirmed"]);
    state.controller.delete_iso(&iso_path, &confirm).await;
    back_to_panel()
}
