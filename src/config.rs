/// Compile-time defaults for the popup

/// Texts and timings used by the controller and notification center
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    /// How long a notification stays visible, in milliseconds
    pub notification_duration_ms: u32,
    /// Delay before a posted notification is revealed, in milliseconds
    pub notification_show_delay_ms: u32,
    pub filename_prefix: String,
    pub loading_placeholder: String,
    pub idle_placeholder: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            notification_duration_ms: 2500,
            notification_show_delay_ms: 10,
            filename_prefix: "tab-urls".to_string(),
            loading_placeholder: "Fetching URLs...".to_string(),
            idle_placeholder: "Tab URLs will appear here".to_string(),
        }
    }
}
