// Diurnal model - deterministic daily curves behind the generated signals
use chrono::{DateTime, TimeZone, Timelike};
use std::f64::consts::PI;

/// Fractional hour of day in `[0, 24)`.
pub fn fractional_hour<Tz: TimeZone>(time: &DateTime<Tz>) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3_600.0
}

fn daily_phase(hour: f64) -> f64 {
    ((hour - 6.0) * PI / 12.0).sin()
}

/// Peaks at 28 °C around 12:00 and bottoms out at 12 °C around 00:00.
pub fn temperature_base(hour: f64) -> f64 {
    20.0 + 8.0 * daily_phase(hour)
}

/// Mirror image of the temperature curve.
pub fn humidity_base(hour: f64) -> f64 {
    60.0 - 10.0 * daily_phase(hour)
}

pub fn energy_base(hour: u32) -> f64 {
    let multiplier = if (9..=18).contains(&hour) { 1.0 } else { 0.3 };
    400.0 + 200.0 * multiplier
}

/// Time-of-day traffic regime. Hours are whole local hours, ranges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficRegime {
    RushHour,
    Midday,
    OffPeak,
}

impl TrafficRegime {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            7..=9 | 17..=19 => TrafficRegime::RushHour,
            10..=16 => TrafficRegime::Midday,
            _ => TrafficRegime::OffPeak,
        }
    }

    /// Mean traffic factor for the regime.
    pub fn center(&self) -> f64 {
        match self {
            TrafficRegime::RushHour => 0.8,
            TrafficRegime::Midday => 0.5,
            TrafficRegime::OffPeak => 0.2,
        }
    }

    /// Standard deviation of the jitter added to `center`.
    pub fn jitter(&self) -> f64 {
        match self {
            TrafficRegime::RushHour => 0.1,
            TrafficRegime::Midday => 0.1,
            TrafficRegime::OffPeak => 0.05,
        }
    }
}
