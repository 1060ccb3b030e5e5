/// Browser collaborators: tab query, clipboard, file save, clock

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlDocument, HtmlTextAreaElement, Url};
use yew::NodeRef;
use crate::error::ExportError;
use crate::export::CaptureTime;
use crate::tab_data::{TabInfo, TabQuery};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn query_tabs(query_info: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    async fn write_clipboard_text(text: &str) -> Result<JsValue, JsValue>;
}

/// Lists the tabs of the window the popup belongs to
pub trait TabSource {
    async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ExportError>;
}

/// Primary clipboard write plus the selection-based fallback.
/// Both report the failure reason as text.
pub trait ClipboardAccess {
    async fn write_text(&self, text: &str) -> Result<(), String>;

    fn copy_selection(&self) -> Result<(), String>;
}

/// Saves an in-memory text file under a given name
pub trait FileSaver {
    fn save_text(&self, filename: &str, contents: &str) -> Result<(), ExportError>;
}

pub trait Clock {
    fn now(&self) -> CaptureTime;
}

/// The real browser, as seen from the popup page
#[derive(Clone)]
pub struct WebPlatform {
    display: NodeRef,
}

impl WebPlatform {
    /// `display` must point at the URL textarea; the legacy copy selects it
    pub fn new(display: NodeRef) -> WebPlatform {
        WebPlatform { display }
    }
}

impl TabSource for WebPlatform {
    async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ExportError> {
        let query_js = serde_wasm_bindgen::to_value(&TabQuery::current_window())
            .map_err(|e| ExportError::TabQuery(format!("Failed to serialize query: {:?}", e)))?;

        let tabs_js = query_tabs(&query_js)
            .await
            .map_err(|e| ExportError::TabQuery(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| ExportError::TabQuery(format!("Failed to parse tabs: {:?}", e)))
    }
}

impl ClipboardAccess for WebPlatform {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        write_clipboard_text(text)
            .await
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }

    fn copy_selection(&self) -> Result<(), String> {
        let textarea = self
            .display
            .cast::<HtmlTextAreaElement>()
            .ok_or_else(|| "display element is not mounted".to_string())?;
        textarea.select();

        let document = html_document()?;
        match document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err("copy command was rejected".to_string()),
            Err(e) => Err(format!("{:?}", e)),
        }
    }
}

impl FileSaver for WebPlatform {
    fn save_text(&self, filename: &str, contents: &str) -> Result<(), ExportError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type("text/plain;charset=utf-8");

        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| ExportError::Save(format!("Failed to create blob: {:?}", e)))?;
        let object_url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| ExportError::Save(format!("Failed to create object URL: {:?}", e)))?;

        let result = click_download_link(&object_url, filename);

        // Release the blob whether or not the click went through
        if let Err(e) = Url::revoke_object_url(&object_url) {
            log::warn!("Failed to revoke {}: {:?}", object_url, e);
        }

        result
    }
}

impl Clock for WebPlatform {
    fn now(&self) -> CaptureTime {
        CaptureTime::from_js_date(&js_sys::Date::new_0())
    }
}

// Helper functions

fn html_document() -> Result<HtmlDocument, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_string())?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| "document is not an HTML document".to_string())
}

fn click_download_link(href: &str, filename: &str) -> Result<(), ExportError> {
    let document = html_document().map_err(ExportError::Save)?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Save("no document body".to_string()))?;

    let link = document
        .create_element("a")
        .map_err(|e| ExportError::Save(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ExportError::Save("created element is not a link".to_string()))?;
    link.set_href(href);
    link.set_download(filename);
    link.set_attribute("style", "display: none")
        .map_err(|e| ExportError::Save(format!("{:?}", e)))?;

    body.append_child(&link)
        .map_err(|e| ExportError::Save(format!("{:?}", e)))?;
    link.click();
    body.remove_child(&link)
        .map_err(|e| ExportError::Save(format!("{:?}", e)))?;

    Ok(())
}
