use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    stats::{self, EmptyError},
    window::HourWindow,
    Observation,
};

pub const INSUFFICIENT_DATA: &str = "Insufficient forecast data";
pub const TEMPERATURE_DECIMALS: u32 = 0;
pub const RAIN_DECIMALS: u32 = 2;

/// An averaged value, or the marker left when nothing fell in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    InsufficientData,
}

impl Reading {
    /// Average of `values` rounded to `decimals`, falling back to
    /// [`Reading::InsufficientData`] when `values` is empty.
    pub fn average(values: &[f64], decimals: u32) -> Self {
        stats::average(values).map(|avg| stats::round_to(avg, decimals)).into()
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData)
    }
}

impl From<Result<f64, EmptyError>> for Reading {
    fn from(result: Result<f64, EmptyError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(EmptyError) => Self::InsufficientData,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::InsufficientData => f.write_str(INSUFFICIENT_DATA),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::InsufficientData => serializer.serialize_str(INSUFFICIENT_DATA),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub morning_average_temperature: Reading,
    pub morning_chance_of_rain: Reading,
    pub afternoon_average_temperature: Reading,
    pub afternoon_chance_of_rain: Reading,
    pub high_temperature: f64,
    pub low_temperature: f64,
}

/// Summarizes one day of observations.
///
/// The high and low cover every observation of the day, including those
/// outside both windows. An empty day yields `-inf` as high and `inf` as low.
pub fn summarize_day(
    observations: &[&Observation],
    morning: &HourWindow,
    afternoon: &HourWindow,
) -> Summary {
    let morning = morning.select(observations.iter().copied());
    let afternoon = afternoon.select(observations.iter().copied());
    log::trace!(
        "{} observations, {} in the morning, {} in the afternoon",
        observations.len(),
        morning.len(),
        afternoon.len()
    );

    let (morning_temp, morning_rain) = split(&morning);
    let (afternoon_temp, afternoon_rain) = split(&afternoon);

    let temperatures = observations.iter().map(|obs| obs.average_temperature);
    let high_temperature = temperatures.clone().fold(f64::NEG_INFINITY, f64::max);
    let low_temperature = temperatures.fold(f64::INFINITY, f64::min);

    Summary {
        morning_average_temperature: Reading::average(&morning_temp, TEMPERATURE_DECIMALS),
        morning_chance_of_rain: Reading::average(&morning_rain, RAIN_DECIMALS),
        afternoon_average_temperature: Reading::average(&afternoon_temp, TEMPERATURE_DECIMALS),
        afternoon_chance_of_rain: Reading::average(&afternoon_rain, RAIN_DECIMALS),
        high_temperature,
        low_temperature,
    }
}

fn split(observations: &[&Observation]) -> (Vec<f64>, Vec<f64>) {
    observations
        .iter()
        .map(|obs| (obs.average_temperature, obs.probability_of_rain))
        .unzip()
}
