use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::Backend;
use crate::handlers::{iso, pages, system, vms};
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app<B: Backend>(state: AppState<B>) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    // The panel reflects shared live state; never let a browser reuse a page.
    let panel_routes = Router::new()
        .route("/", get(pages::root_get::<B>))
        .route("/page/:name", get(pages::page_get::<B>))
        .route("/fragments/stats", get(pages::stats_get::<B>))
        .route("/vms", post(vms::vm_create_post::<B>))
        .route("/vms/:name/start", post(vms::vm_start_post::<B>))
        .route("/vms/:name/stop", post(vms::vm_stop_post::<B>))
        .route("/vms/:name/force-stop", post(vms::vm_force_stop_post::<B>))
        .route("/vms/:name/restart", post(vms::vm_restart_post::<B>))
        .route("/vms/:name/delete", post(vms::vm_delete_post::<B>))
        .route("/console/close", post(vms::console_close_post::<B>))
        .route("/console/:name", get(vms::console_get::<B>))
        .route("/iso/scan", post(iso::iso_scan_post::<B>))
        .route(
            "/iso/download",
            get(iso::iso_download_dialog_get::<B>).post(iso::iso_download_post::<B>),
        )
        .route("/iso/download/cancel", post(iso::iso_download_cancel_post::<B>))
        .route("/iso/catalog-download", post(iso::iso_catalog_download_post::<B>))
        .route("/iso/delete", post(iso::iso_delete_post::<B>))
        .route("/confirm/:action", get(system::confirmation_get::<B>))
        .route("/alerts/:id/dismiss", post(system::alert_dismiss_post::<B>))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move {
                    (
                        [(CONTENT_TYPE, "text/css"), (CACHE_CONTROL, "public, max-age=3600")],
                        css,
                    )
                }
            }),
        )
        .merge(panel_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
