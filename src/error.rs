/// Error kinds surfaced by the popup handlers
use std::fmt;
use thiserror::Error;

/// Which action found nothing to work with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    Copy,
    Download,
}

impl fmt::Display for ContentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentAction::Copy => write!(f, "copy"),
            ContentAction::Download => write!(f, "download"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("tab query failed: {0}")]
    TabQuery(String),

    #[error("clipboard write failed ({primary}); fallback copy failed ({fallback})")]
    Clipboard { primary: String, fallback: String },

    #[error("nothing to {0}")]
    EmptyContent(ContentAction),

    #[error("could not save file: {0}")]
    Save(String),
}

impl ExportError {
    /// Short text for the notification region
    pub fn user_message(&self) -> String {
        match self {
            ExportError::TabQuery(_) => "Failed to fetch tab URLs".to_string(),
            ExportError::Clipboard { .. } => "Copy failed".to_string(),
            ExportError::EmptyContent(action) => format!("No URLs to {}", action),
            ExportError::Save(_) => "Download failed".to_string(),
        }
    }
}
