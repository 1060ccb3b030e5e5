/// Popup controller: fetch, render, copy, download, refresh

use crate::browser::{ClipboardAccess, Clock, FileSaver, TabSource};
use crate::config::PopupConfig;
use crate::error::{ContentAction, ExportError};
use crate::export::{download_filename, is_blank};
use crate::notification::Notification;
use crate::tab_data::TabUrlList;

/// The parts of the popup page the controller reads and writes
pub trait PopupView {
    fn display_text(&self) -> String;
    fn set_display_text(&self, text: String);
    fn set_tab_count(&self, count: usize);
    fn set_refresh_enabled(&self, enabled: bool);
    fn set_placeholder(&self, placeholder: &str);
    fn notify(&self, notification: Notification);
}

pub struct PopupController<P, V> {
    platform: P,
    view: V,
    config: PopupConfig,
}

impl<P, V> PopupController<P, V>
where
    P: TabSource + ClipboardAccess + FileSaver + Clock,
    V: PopupView,
{
    pub fn new(platform: P, view: V, config: PopupConfig) -> Self {
        PopupController {
            platform,
            view,
            config,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn fetch_tab_urls(&self) -> Result<TabUrlList, ExportError> {
        let tabs = self.platform.current_window_tabs().await?;
        let urls = TabUrlList::from_tabs(&tabs);
        log::info!("Fetched {} URLs from {} tabs", urls.len(), tabs.len());
        Ok(urls)
    }

    pub fn render(&self, urls: &TabUrlList) {
        self.view.set_display_text(urls.to_display_text());
        self.view.set_tab_count(urls.len());
    }

    /// Fetch and render; a failed fetch clears the display
    pub async fn display_urls(&self) {
        match self.fetch_tab_urls().await {
            Ok(urls) => self.render(&urls),
            Err(e) => {
                log::error!("{}", e);
                self.view.set_display_text(String::new());
                self.view.set_tab_count(0);
                self.notify_error(&e);
            }
        }
    }

    pub async fn copy(&self) {
        match self.try_copy().await {
            Ok(()) => self.notify_success("✓ Copied to clipboard!"),
            Err(e) => {
                log::error!("{}", e);
                self.notify_error(&e);
            }
        }
    }

    async fn try_copy(&self) -> Result<(), ExportError> {
        let text = self.view.display_text();
        if is_blank(&text) {
            return Err(ExportError::EmptyContent(ContentAction::Copy));
        }

        let primary = match self.platform.write_text(&text).await {
            Ok(()) => return Ok(()),
            Err(reason) => reason,
        };
        log::warn!("Clipboard write failed, falling back to selection copy: {}", primary);

        self.platform
            .copy_selection()
            .map_err(|fallback| ExportError::Clipboard { primary, fallback })
    }

    pub fn download(&self) {
        match self.try_download() {
            Ok(filename) => self.notify_success(format!("✓ Downloaded {}!", filename)),
            Err(e) => {
                log::error!("{}", e);
                self.notify_error(&e);
            }
        }
    }

    fn try_download(&self) -> Result<String, ExportError> {
        let text = self.view.display_text();
        if is_blank(&text) {
            return Err(ExportError::EmptyContent(ContentAction::Download));
        }

        let filename = download_filename(&self.config.filename_prefix, &self.platform.now());
        self.platform.save_text(&filename, &text)?;
        Ok(filename)
    }

    /// Re-fetch with the refresh control disabled.
    ///
    /// Announces success even when the fetch failed; the fetch error
    /// notification is replaced right away.
    pub async fn refresh(&self) {
        self.view.set_refresh_enabled(false);
        self.view.set_placeholder(&self.config.loading_placeholder);

        self.display_urls().await;

        self.view.set_refresh_enabled(true);
        self.notify_success("✓ URL list refreshed!");
    }

    fn notify_success(&self, message: impl Into<String>) {
        self.view
            .notify(Notification::success(message, self.config.notification_duration_ms));
    }

    fn notify_error(&self, error: &ExportError) {
        self.view.notify(Notification::error(
            error.user_message(),
            self.config.notification_duration_ms,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CaptureTime;
    use crate::notification::Severity;
    use crate::tab_data::TabInfo;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakePlatform {
        tabs: Option<Vec<TabInfo>>, // None makes the query reject
        clipboard_works: bool,
        selection_copy_works: bool,
        save_works: bool,
        clipboard: RefCell<Option<String>>,
        clipboard_calls: Cell<usize>,
        selection_calls: Cell<usize>,
        saved: RefCell<Vec<(String, String)>>,
    }

    impl FakePlatform {
        fn with_urls(urls: &[Option<&str>]) -> FakePlatform {
            let tabs = urls
                .iter()
                .enumerate()
                .map(|(i, url)| TabInfo {
                    id: Some(i as i32),
                    index: i as i32,
                    url: url.map(str::to_string),
                    title: None,
                })
                .collect();

            FakePlatform {
                tabs: Some(tabs),
                clipboard_works: true,
                selection_copy_works: true,
                save_works: true,
                ..FakePlatform::default()
            }
        }

        fn failing_query() -> FakePlatform {
            FakePlatform {
                tabs: None,
                ..FakePlatform::with_urls(&[])
            }
        }
    }

    impl TabSource for FakePlatform {
        async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ExportError> {
            self.tabs
                .clone()
                .ok_or_else(|| ExportError::TabQuery("No current window".to_string()))
        }
    }

    impl ClipboardAccess for FakePlatform {
        async fn write_text(&self, text: &str) -> Result<(), String> {
            self.clipboard_calls.set(self.clipboard_calls.get() + 1);
            if self.clipboard_works {
                *self.clipboard.borrow_mut() = Some(text.to_string());
                Ok(())
            } else {
                Err("NotAllowedError: Document is not focused".to_string())
            }
        }

        fn copy_selection(&self) -> Result<(), String> {
            self.selection_calls.set(self.selection_calls.get() + 1);
            if self.selection_copy_works {
                Ok(())
            } else {
                Err("copy command was rejected".to_string())
            }
        }
    }

    impl FileSaver for FakePlatform {
        fn save_text(&self, filename: &str, contents: &str) -> Result<(), ExportError> {
            if !self.save_works {
                return Err(ExportError::Save("Failed to create blob".to_string()));
            }
            self.saved
                .borrow_mut()
                .push((filename.to_string(), contents.to_string()));
            Ok(())
        }
    }

    impl Clock for FakePlatform {
        fn now(&self) -> CaptureTime {
            CaptureTime {
                year: 2024,
                month: 10,
                day: 28,
                hour: 9,
                minute: 3,
                second: 7,
            }
        }
    }

    #[derive(Default)]
    struct FakeView {
        display: RefCell<String>,
        count: Cell<usize>,
        refresh_enabled: Cell<bool>,
        refresh_toggles: RefCell<Vec<bool>>,
        placeholder: RefCell<String>,
        notifications: RefCell<Vec<Notification>>,
    }

    impl FakeView {
        fn with_text(text: &str) -> FakeView {
            let view = FakeView::default();
            *view.display.borrow_mut() = text.to_string();
            view
        }

        fn last_notification(&self) -> Notification {
            self.notifications.borrow().last().cloned().unwrap()
        }
    }

    impl PopupView for FakeView {
        fn display_text(&self) -> String {
            self.display.borrow().clone()
        }

        fn set_display_text(&self, text: String) {
            *self.display.borrow_mut() = text;
        }

        fn set_tab_count(&self, count: usize) {
            self.count.set(count);
        }

        fn set_refresh_enabled(&self, enabled: bool) {
            self.refresh_enabled.set(enabled);
            self.refresh_toggles.borrow_mut().push(enabled);
        }

        fn set_placeholder(&self, placeholder: &str) {
            *self.placeholder.borrow_mut() = placeholder.to_string();
        }

        fn notify(&self, notification: Notification) {
            self.notifications.borrow_mut().push(notification);
        }
    }

    fn create_controller(
        platform: FakePlatform,
        view: FakeView,
    ) -> PopupController<FakePlatform, FakeView> {
        PopupController::new(platform, view, PopupConfig::default())
    }

    #[test]
    fn test_display_urls_renders_every_tab_in_order() {
        let controller = create_controller(
            FakePlatform::with_urls(&[
                Some("https://google.com"),
                Some("https://github.com"),
                Some("chrome://newtab/"),
            ]),
            FakeView::default(),
        );

        block_on(controller.display_urls());

        let view = controller.view();
        assert_eq!(view.count.get(), 3);
        assert_eq!(
            view.display_text(),
            "https://google.com\nhttps://github.com\nchrome://newtab/"
        );
        assert!(view.notifications.borrow().is_empty());
    }

    #[test]
    fn test_tabs_without_url_are_not_counted() {
        let controller = create_controller(
            FakePlatform::with_urls(&[Some("https://google.com"), None, Some(""), Some("https://docs.rs")]),
            FakeView::default(),
        );

        block_on(controller.display_urls());

        assert_eq!(controller.view().count.get(), 2);
        assert_eq!(controller.view().display_text().lines().count(), 2);
    }

    #[test]
    fn test_fetch_failure_clears_display() {
        let controller = create_controller(
            FakePlatform::failing_query(),
            FakeView::with_text("https://stale.example"),
        );
        controller.view().count.set(1);

        block_on(controller.display_urls());

        let view = controller.view();
        assert_eq!(view.display_text(), "");
        assert_eq!(view.count.get(), 0);
        let notification = view.last_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Failed to fetch tab URLs");
    }

    #[test]
    fn test_fetch_tab_urls_propagates_query_error() {
        let controller = create_controller(FakePlatform::failing_query(), FakeView::default());

        let result = block_on(controller.fetch_tab_urls());

        assert!(matches!(result, Err(ExportError::TabQuery(_))));
    }

    #[test]
    fn test_copy_blank_never_touches_clipboard() {
        let controller = create_controller(FakePlatform::with_urls(&[]), FakeView::with_text("  \n "));

        block_on(controller.copy());

        assert_eq!(controller.platform.clipboard_calls.get(), 0);
        assert_eq!(controller.platform.selection_calls.get(), 0);
        let notification = controller.view().last_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "No URLs to copy");
    }

    #[test]
    fn test_copy_places_exact_text_on_clipboard() {
        let text = "https://google.com\nhttps://github.com";
        let controller = create_controller(FakePlatform::with_urls(&[]), FakeView::with_text(text));

        block_on(controller.copy());

        assert_eq!(controller.platform.clipboard.borrow().as_deref(), Some(text));
        assert_eq!(controller.platform.selection_calls.get(), 0);
        assert_eq!(controller.view().last_notification().severity, Severity::Success);
    }

    #[test]
    fn test_copy_falls_back_to_selection() {
        let platform = FakePlatform {
            clipboard_works: false,
            ..FakePlatform::with_urls(&[])
        };
        let controller = create_controller(platform, FakeView::with_text("https://google.com"));

        block_on(controller.copy());

        assert_eq!(controller.platform.clipboard_calls.get(), 1);
        assert_eq!(controller.platform.selection_calls.get(), 1);
        assert_eq!(controller.view().last_notification().severity, Severity::Success);
    }

    #[test]
    fn test_copy_reports_when_both_paths_fail() {
        let platform = FakePlatform {
            clipboard_works: false,
            selection_copy_works: false,
            ..FakePlatform::with_urls(&[])
        };
        let controller = create_controller(platform, FakeView::with_text("https://google.com"));

        let result = block_on(controller.try_copy());
        assert!(matches!(result, Err(ExportError::Clipboard { .. })));

        block_on(controller.copy());
        let notification = controller.view().last_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Copy failed");
    }

    #[test]
    fn test_download_blank_builds_no_file() {
        let controller = create_controller(FakePlatform::with_urls(&[]), FakeView::with_text(""));

        controller.download();

        assert!(controller.platform.saved.borrow().is_empty());
        let notification = controller.view().last_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "No URLs to download");
    }

    #[test]
    fn test_download_names_file_after_capture_time() {
        let controller = create_controller(FakePlatform::with_urls(&[]), FakeView::with_text("a\nb"));

        controller.download();

        let saved = controller.platform.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "tab-urls_2024-10-28_09-03-07.txt");
        assert_eq!(saved[0].1, "a\nb");

        let notification = controller.view().last_notification();
        assert_eq!(notification.severity, Severity::Success);
        assert!(notification.message.contains("tab-urls_2024-10-28_09-03-07.txt"));
    }

    #[test]
    fn test_download_save_failure_is_reported() {
        let platform = FakePlatform {
            save_works: false,
            ..FakePlatform::with_urls(&[])
        };
        let controller = create_controller(platform, FakeView::with_text("a\nb"));

        controller.download();

        let notification = controller.view().last_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Download failed");
    }

    #[test]
    fn test_refresh_reenables_control_after_success() {
        let controller = create_controller(
            FakePlatform::with_urls(&[Some("https://google.com")]),
            FakeView::default(),
        );

        block_on(controller.refresh());

        let view = controller.view();
        assert_eq!(*view.refresh_toggles.borrow(), vec![false, true]);
        assert_eq!(*view.placeholder.borrow(), PopupConfig::default().loading_placeholder);
        assert_eq!(view.count.get(), 1);
        assert_eq!(view.last_notification().severity, Severity::Success);
    }

    #[test]
    fn test_refresh_reenables_control_after_failed_fetch() {
        let controller = create_controller(FakePlatform::failing_query(), FakeView::default());

        block_on(controller.refresh());

        let view = controller.view();
        assert!(view.refresh_enabled.get());
        assert_eq!(*view.refresh_toggles.borrow(), vec![false, true]);
        assert_eq!(view.count.get(), 0);

        // The fetch error is posted, then overwritten by the refresh success message
        let notifications = view.notifications.borrow();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].severity, Severity::Error);
        assert_eq!(notifications[1].severity, Severity::Success);
    }
}
