use crate::args::{OutputFormat, Placement};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use is_terminal::IsTerminal;
use orgpop_index::{DayMap, EventIndex};
use owo_colors::OwoColorize;
use serde::Serialize;

/// One month of the agenda, assembled from the two read-only index
/// queries. This is the whole surface the popup frontend consumes.
pub struct MonthView {
    first_of_month: NaiveDate,
    selected: NaiveDate,
    days: DayMap,
    selected_events: Option<Vec<String>>,
    placement: Option<Placement>,
}

impl MonthView {
    pub fn build(index: &EventIndex, selected: NaiveDate, placement: Option<Placement>) -> Self {
        let first_of_month = selected.with_day(1).unwrap_or(selected);
        let days = index.month(selected.year(), selected.month0()).clone();
        let selected_events = index
            .day(selected.year(), selected.month0(), selected.day())
            .map(<[String]>::to_vec);

        Self {
            first_of_month,
            selected,
            days,
            selected_events,
            placement,
        }
    }

    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Plain => {
                let colored = std::io::stdout().is_terminal();
                print!("{}", self.to_plain(colored));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&self.to_model())?);
            }
        }
        Ok(())
    }

    /// Month grid with event days marked, then the selected day's labels.
    fn to_plain(&self, colored: bool) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();

        let title = self.first_of_month.format("%B %Y").to_string();
        let _ = writeln!(out, "{}", format!("{title:^20}").trim_end());
        let _ = writeln!(out, "Mo Tu We Th Fr Sa Su");

        let lead = self.first_of_month.weekday().num_days_from_monday() as usize;
        let mut line = "   ".repeat(lead);
        let mut slot = lead;

        for day in 1..=days_in_month(self.first_of_month) {
            let marked = self.days.contains_key(&day);
            let cell = format!("{day:>2}");
            if colored && marked {
                let _ = write!(line, "{}", cell.bold());
            } else {
                line.push_str(&cell);
            }
            line.push(if marked { '*' } else { ' ' });

            slot += 1;
            if slot == 7 {
                let _ = writeln!(out, "{}", line.trim_end());
                line.clear();
                slot = 0;
            }
        }
        if !line.trim_end().is_empty() {
            let _ = writeln!(out, "{}", line.trim_end());
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", self.selected.format("%Y-%m-%d"));
        match &self.selected_events {
            Some(events) if !events.is_empty() => {
                for label in events {
                    let shown = if label.is_empty() { "(untitled)" } else { label };
                    let _ = writeln!(out, "  - {shown}");
                }
            }
            _ => {
                let _ = writeln!(out, "  (no events)");
            }
        }

        out
    }

    fn to_model(&self) -> MonthModel<'_> {
        MonthModel {
            year: self.first_of_month.year(),
            month: self.first_of_month.month0(),
            selected: self.selected.format("%Y-%m-%d").to_string(),
            days: &self.days,
            events: self.selected_events.as_deref(),
            placement: self.placement.map(PlacementModel::from),
        }
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(31)
}

/// Machine-readable rendering of the same view. `month` stays 0-based,
/// matching the index convention; `events` is null when the selected day
/// was never recorded.
#[derive(Serialize)]
struct MonthModel<'a> {
    year: i32,
    month: u32,
    selected: String,
    days: &'a DayMap,
    events: Option<&'a [String]>,
    placement: Option<PlacementModel>,
}

#[derive(Serialize)]
struct PlacementModel {
    corner: &'static str,
    x: i32,
    y: i32,
}

impl From<Placement> for PlacementModel {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::TopLeft { x, y } => Self {
                corner: "top-left",
                x,
                y,
            },
            Placement::TopRight { x, y } => Self {
                corner: "top-right",
                x,
                y,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgpop_types::RawEvent;

    fn index_with(events: &[(i32, u32, u32, &str)]) -> EventIndex {
        let mut index = EventIndex::new();
        for &(year, month, day, label) in events {
            index.insert(RawEvent::new(year, month, day, label.to_string()).unwrap());
        }
        index
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_plain_marks_event_days() {
        let index = index_with(&[(2024, 3, 5, "Meeting prep"), (2024, 3, 7, "Dentist")]);
        let view = MonthView::build(&index, date(2024, 3, 5), None);
        let plain = view.to_plain(false);

        assert!(plain.contains("March 2024"), "{plain}");
        assert!(plain.contains(" 5*"), "{plain}");
        assert!(plain.contains(" 7*"), "{plain}");
        assert!(plain.contains(" 6 "), "{plain}");
        assert!(plain.contains("2024-03-05:"), "{plain}");
        assert!(plain.contains("  - Meeting prep"), "{plain}");
    }

    #[test]
    fn test_plain_for_day_without_events() {
        let index = index_with(&[(2024, 3, 5, "Meeting prep")]);
        let view = MonthView::build(&index, date(2024, 3, 6), None);
        let plain = view.to_plain(false);

        assert!(plain.contains("2024-03-06:"), "{plain}");
        assert!(plain.contains("(no events)"), "{plain}");
    }

    #[test]
    fn test_grid_layout_for_known_month() {
        // March 2024 starts on a Friday; the first line holds 1..3.
        let view = MonthView::build(&EventIndex::new(), date(2024, 3, 15), None);
        let plain = view.to_plain(false);
        let grid_line = plain.lines().nth(2).unwrap();

        // Four leading empty slots of three columns each, then 1..3.
        assert_eq!(grid_line, format!("{} 1  2  3", " ".repeat(12)));
    }

    #[test]
    fn test_json_model_distinguishes_absent_from_empty() {
        let index = index_with(&[(2024, 3, 5, "Meeting prep")]);

        let absent = MonthView::build(&index, date(2024, 3, 6), None);
        let value = serde_json::to_value(absent.to_model()).unwrap();
        assert!(value["events"].is_null());

        let present = MonthView::build(&index, date(2024, 3, 5), None);
        let value = serde_json::to_value(present.to_model()).unwrap();
        assert_eq!(value["events"][0], "Meeting prep");
        assert_eq!(value["days"]["5"][0], "Meeting prep");
        assert_eq!(value["month"], 2);
    }

    #[test]
    fn test_json_model_carries_placement() {
        let view = MonthView::build(
            &EventIndex::new(),
            date(2024, 3, 5),
            Some(Placement::TopRight { x: 30, y: 4 }),
        );
        let value = serde_json::to_value(view.to_model()).unwrap();

        assert_eq!(value["placement"]["corner"], "top-right");
        assert_eq!(value["placement"]["x"], 30);
        assert_eq!(value["placement"]["y"], 4);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)), 28);
        assert_eq!(days_in_month(date(2024, 12, 1)), 31);
    }
}
