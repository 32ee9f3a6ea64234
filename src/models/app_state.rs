use crate::api::{Backend, KvmClient};
use crate::controller::ViewController;
use crate::document::HtmlDocument;

/// Shared state of the web panel. One controller drives one document for
/// every connected browser.
pub struct AppState<B: Backend = KvmClient> {
    pub controller: ViewController<B, HtmlDocument>,
    pub document: HtmlDocument,
    pub api_base_url: String,
    pub custom_css: Option<String>,
}

impl<B: Backend> AppState<B> {
    pub fn new(controller: ViewController<B, HtmlDocument>, api_base_url: impl Into<String>) -> Self {
        let document = controller.document().clone();
        Self {
            controller,
            document,
            api_base_url: api_base_url.into(),
            custom_css: None,
        }
    }
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            document: self.document.clone(),
            api_base_url: self.api_base_url.clone(),
            custom_css: self.custom_css.clone(),
        }
    }
}
