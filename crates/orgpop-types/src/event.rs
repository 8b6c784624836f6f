/// A single date-stamped event extracted from an outline file.
///
/// `month` is 0-based (calendar-widget convention). Callers doing month
/// arithmetic must remember this offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub year: i32,
    /// 0-based month (January = 0)
    pub month: u32,
    /// 1-based day of month
    pub day: u32,
    /// Heading text the event was found under; empty if none was seen yet
    pub label: String,
}

impl RawEvent {
    /// Build an event from a 1-based calendar month.
    ///
    /// Normalization to 0-based happens here and nowhere else. A calendar
    /// month of 0 has no 0-based form and yields `None`.
    pub fn new(year: i32, month: u32, day: u32, label: String) -> Option<Self> {
        let month = month.checked_sub(1)?;
        Some(Self {
            year,
            month,
            day,
            label,
        })
    }
}
