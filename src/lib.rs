pub mod api;
pub mod config;
pub mod controller;
pub mod document;
pub mod handlers;
pub mod models;
pub mod render;
pub mod routes;
pub mod templates;
pub mod utils;

pub use api::{ApiError, Backend, KvmClient};
pub use controller::{Confirm, ControllerSettings, ViewController};
pub use document::{Document, HtmlDocument, TerminalDocument};
pub use models::Page;
