use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::api::Backend;
use crate::document::Slot;
use crate::models::AppState;
use super::helpers::render_panel;

const STAT_SLOTS: [Slot; 4] = [Slot::CpuUsage, Slot::MemoryUsage, Slot::DiskUsage, Slot::TotalVms];

pub async fn root_get<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    render_panel(&state)
}

pub async fn page_get<B: Backend>(
    State(state): State<AppState<B>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    state.controller.show_page(&name).await;
    render_panel(&state)
}

/// Current values of the dashboard displays, polled by the shell.
pub async fn stats_get<B: Backend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    let snapshot = state.document.snapshot();
    let values: HashMap<&'static str, String> = STAT_SLOTS
        .iter()
        .map(|s| (s.id(), snapshot.slot(*s).to_string()))
        .collect();
    Json(values)
}
