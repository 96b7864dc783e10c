// Air quality bands and alert levels
use serde::Serialize;
use std::fmt;

/// US EPA style AQI severity bands, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    pub const ALL: [AqiBand; 6] = [
        AqiBand::Good,
        AqiBand::Moderate,
        AqiBand::UnhealthyForSensitive,
        AqiBand::Unhealthy,
        AqiBand::VeryUnhealthy,
        AqiBand::Hazardous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::UnhealthyForSensitive => "Unhealthy for Sensitive",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::VeryUnhealthy => "Very Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AqiBand::Good => "#00E400",
            AqiBand::Moderate => "#FFFF00",
            AqiBand::UnhealthyForSensitive => "#FF7E00",
            AqiBand::Unhealthy => "#FF0000",
            AqiBand::VeryUnhealthy => "#8F3F97",
            AqiBand::Hazardous => "#7E0023",
        }
    }
}

impl fmt::Display for AqiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map an AQI value to its band. Upper breakpoints are inclusive.
///
/// Anything at or below 50 is `Good`; NaN lands in `Hazardous`.
pub fn classify_aqi(value: f64) -> AqiBand {
    if value <= 50.0 {
        AqiBand::Good
    } else if value <= 100.0 {
        AqiBand::Moderate
    } else if value <= 150.0 {
        AqiBand::UnhealthyForSensitive
    } else if value <= 200.0 {
        AqiBand::Unhealthy
    } else if value <= 300.0 {
        AqiBand::VeryUnhealthy
    } else {
        AqiBand::Hazardous
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AlertLevel {
    Nominal,
    Advisory,
    Alert,
}

impl AlertLevel {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi > 150.0 {
            AlertLevel::Alert
        } else if aqi > 100.0 {
            AlertLevel::Advisory
        } else {
            AlertLevel::Nominal
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AlertLevel::Nominal => "All systems nominal",
            AlertLevel::Advisory => "Sensitive groups should limit outdoor activity",
            AlertLevel::Alert => "Unhealthy air quality levels detected",
        }
    }
}
