use std::ops::Range;

use miette::Diagnostic;
use thiserror::Error;

use crate::Observation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum WindowError {
    #[error("Window starts at {start}h but ends at {end}h")]
    #[diagnostic(help("the start hour must not be after the end hour"))]
    Reversed { start: u8, end: u8 },
    #[error("Hour out of range: {hour}")]
    #[diagnostic(help("hours are expected between 0 and 24"))]
    OutOfRange { hour: u8 },
}

/// A half-open range of hours of the day, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    start: u8,
    end: u8,
}

impl HourWindow {
    pub fn new(start: u8, end: u8) -> Result<Self, WindowError> {
        if let Some(hour) = [start, end].into_iter().find(|hour| *hour > 24) {
            return Err(WindowError::OutOfRange { hour });
        }
        if start > end {
            return Err(WindowError::Reversed { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn hours(&self) -> Range<u8> {
        self.start..self.end
    }

    pub fn contains(&self, observation: &Observation) -> bool {
        self.hours().contains(&observation.hour())
    }

    /// Observations falling inside the window, in their original order.
    pub fn select<'a, I>(&self, observations: I) -> Vec<&'a Observation>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        observations
            .into_iter()
            .filter(|obs| self.contains(obs))
            .collect()
    }
}

/// Builds a predicate matching observations whose hour lies in `start..end`.
pub fn between_hours(start: u8, end: u8) -> Result<impl Fn(&Observation) -> bool, WindowError> {
    let window = HourWindow::new(start, end)?;
    Ok(move |observation: &Observation| window.contains(observation))
}
