/// Transient status messages and their show/hide bookkeeping

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration_ms: u32) -> Notification {
        Notification {
            message: message.into(),
            severity: Severity::Success,
            duration_ms,
        }
    }

    pub fn error(message: impl Into<String>, duration_ms: u32) -> Notification {
        Notification {
            message: message.into(),
            severity: Severity::Error,
            duration_ms,
        }
    }
}

/// The single notification slot.
///
/// Every `post` hands out a fresh ticket. `reveal` and `dismiss` only act on the
/// current ticket, so a timer left over from an earlier notification can never
/// hide or show a later one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    current: Option<Notification>,
    visible: bool,
    ticket: u64,
}

impl NotificationState {
    pub fn post(&mut self, notification: Notification) -> u64 {
        self.ticket += 1;
        self.current = Some(notification);
        self.visible = false;
        self.ticket
    }

    pub fn reveal(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.current.is_none() {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn dismiss(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn css_class(&self) -> String {
        let severity = self
            .current
            .as_ref()
            .map(|n| n.severity.css_class())
            .unwrap_or("success");

        if self.visible {
            format!("notification {}", severity)
        } else {
            format!("notification {} hidden", severity)
        }
    }
}
