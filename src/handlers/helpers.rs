use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::api::Backend;
use crate::controller::ScriptedConfirm;
use crate::models::AppState;
use crate::render;
use crate::templates::PanelTemplate;
use crate::utils::{hostname_from_url, parse_flag};

#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub alerts: Vec<String>,
}

pub fn build_template_globals<B: Backend>(state: &AppState<B>) -> TemplateGlobals {
    let alerts = state.document.snapshot().alerts.iter().map(render::alert).collect();
    TemplateGlobals {
        api_hostname: hostname_from_url(&state.api_base_url),
        alerts,
    }
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Render the shell from the current document state.
pub fn render_panel<B: Backend>(state: &AppState<B>) -> Response {
    let TemplateGlobals { api_hostname, alerts } = build_template_globals(state);
    let poll_interval_ms = state.controller.settings().poll_interval.as_millis();
    render_template(PanelTemplate::from_snapshot(
        state.document.snapshot(),
        api_hostname,
        alerts,
        poll_interval_ms,
    ))
}

/// Actions redirect back to the shell, which shows whatever page is current.
pub fn back_to_panel() -> Redirect {
    Redirect::to("/")
}

/// Turn posted confirmation fields into answers, in question order.
pub fn confirm_answers(form: &HashMap<String, String>, fields: &[&str]) -> ScriptedConfirm {
    ScriptedConfirm::new(fields.iter().map(|f| parse_flag(form.get(*f).map(String::as_str))))
}
