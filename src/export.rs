/// Export helpers: capture time, download filename, blank check

/// Local wall-clock time at the moment an export was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime {
    pub year: u32,
    pub month: u32, // 1-12
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CaptureTime {
    /// Read the local-time fields of a JS `Date`
    pub fn from_js_date(date: &js_sys::Date) -> CaptureTime {
        CaptureTime {
            year: date.get_full_year(),
            month: date.get_month() + 1,
            day: date.get_date(),
            hour: date.get_hours(),
            minute: date.get_minutes(),
            second: date.get_seconds(),
        }
    }

    /// `YYYY-MM-DD_HH-MM-SS`
    pub fn file_stamp(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Build `<prefix>_<stamp>.txt`
pub fn download_filename(prefix: &str, time: &CaptureTime) -> String {
    format!("{}_{}.txt", prefix, time.file_stamp())
}

/// True when there is nothing worth copying or saving
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
