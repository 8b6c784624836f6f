use orgpop_types::RawEvent;
use std::collections::BTreeMap;

/// Day-of-month to event labels, for one month. Labels keep scan order.
pub type DayMap = BTreeMap<u32, Vec<String>>;

static EMPTY_MONTH: DayMap = BTreeMap::new();

/// Three-level ordered date index: year, 0-based month, 1-based day.
///
/// `insert` creates intermediate levels on first write. Reads never create
/// anything and never fail; the index is built once per invocation and
/// then only queried.
#[derive(Debug, Default)]
pub struct EventIndex {
    years: BTreeMap<i32, BTreeMap<u32, DayMap>>,
    event_count: usize,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event's label at its (year, month, day) key path.
    pub fn insert(&mut self, event: RawEvent) {
        self.years
            .entry(event.year)
            .or_default()
            .entry(event.month)
            .or_default()
            .entry(event.day)
            .or_default()
            .push(event.label);
        self.event_count += 1;
    }

    /// Day map for a (year, 0-based month), empty if nothing was recorded.
    pub fn month(&self, year: i32, month: u32) -> &DayMap {
        self.years
            .get(&year)
            .and_then(|months| months.get(&month))
            .unwrap_or(&EMPTY_MONTH)
    }

    /// Labels for a single day, in scan order.
    ///
    /// `None` means no entry was ever recorded for that day, which is
    /// distinct from a recorded-but-empty list.
    pub fn day(&self, year: i32, month: u32, day: u32) -> Option<&[String]> {
        self.years
            .get(&year)?
            .get(&month)?
            .get(&day)
            .map(Vec::as_slice)
    }

    /// Total number of labels recorded.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}
