use std::collections::{hash_map::Entry, HashMap};

use miette::Diagnostic;
use serde::{ser::SerializeMap, Serialize, Serializer};
use thiserror::Error;
use time::Date;

mod observation;
pub mod stats;
mod summary;
pub mod window;

pub use observation::{parse_timestamp, Observation, ObservationError};
pub use summary::{
    summarize_day, Reading, Summary, INSUFFICIENT_DATA, RAIN_DECIMALS, TEMPERATURE_DECIMALS,
};
pub use window::{between_hours, HourWindow, WindowError};

pub const MORNING_HOURS: (u8, u8) = (6, 12);
pub const AFTERNOON_HOURS: (u8, u8) = (12, 18);

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Window(#[from] WindowError),
}

/// Observations sharing a calendar date.
#[derive(Debug, Clone)]
pub struct DayGroup<'a> {
    pub date: Date,
    pub observations: Vec<&'a Observation>,
}

/// Buckets observations by date. Groups come out in the order their date is
/// first seen.
pub fn group_by_date(observations: &[Observation]) -> Vec<DayGroup<'_>> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<Date, usize> = HashMap::new();

    for observation in observations {
        let date = observation.date();
        match index.entry(date) {
            Entry::Occupied(entry) => groups[*entry.get()].observations.push(observation),
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push(DayGroup {
                    date,
                    observations: vec![observation],
                });
            }
        }
    }

    groups
}

/// `Sunday February 18`
pub fn format_date(date: Date) -> String {
    format!("{} {} {}", date.weekday(), date.month(), date.day())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: Date,
    pub label: String,
    pub summary: Summary,
}

/// Per-day summaries keyed by their formatted date, in first-seen order.
///
/// Labels are unique: a date whose plain label is already taken by another
/// year gets its year appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySummaries {
    days: Vec<DaySummary>,
}

impl DailySummaries {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Summary labelled `label`.
    pub fn get(&self, label: &str) -> Option<&Summary> {
        self.days
            .iter()
            .find(|day| day.label == label)
            .map(|day| &day.summary)
    }

    pub fn get_date(&self, date: Date) -> Option<&Summary> {
        self.days
            .iter()
            .find(|day| day.date == date)
            .map(|day| &day.summary)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|day| day.label.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DaySummary> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a DailySummaries {
    type Item = &'a DaySummary;
    type IntoIter = std::slice::Iter<'a, DaySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for DailySummaries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.label, &day.summary)?;
        }
        map.end()
    }
}

/// Summarizes each calendar date in `observations` into its morning
/// (06:00-12:00) and afternoon (12:00-18:00) averages plus the day's high
/// and low temperature.
pub fn summarize(observations: &[Observation]) -> Result<DailySummaries, Error> {
    let morning = HourWindow::new(MORNING_HOURS.0, MORNING_HOURS.1)?;
    let afternoon = HourWindow::new(AFTERNOON_HOURS.0, AFTERNOON_HOURS.1)?;

    let groups = group_by_date(observations);
    log::debug!(
        "summarizing {} observations over {} days",
        observations.len(),
        groups.len()
    );

    let mut days: Vec<DaySummary> = Vec::with_capacity(groups.len());
    for group in groups {
        let mut label = format_date(group.date);
        if let Some(other) = days.iter().find(|day| day.label == label) {
            // Keys must stay unique once serialized.
            let unique = format!("{label} {}", group.date.year());
            log::warn!(
                "{} is already labelled `{label}`, using `{unique}` for {}",
                other.date,
                group.date
            );
            label = unique;
        }

        days.push(DaySummary {
            date: group.date,
            summary: summarize_day(&group.observations, &morning, &afternoon),
            label,
        });
    }

    Ok(DailySummaries { days })
}
