// Telemetry data domain models
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// The six global value channels. Timestamps are kept alongside, not as a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Temperature,
    Humidity,
    Aqi,
    TrafficDensity,
    VehicleSpeed,
    EnergyConsumption,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Aqi,
        Channel::TrafficDensity,
        Channel::VehicleSpeed,
        Channel::EnergyConsumption,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
            Channel::Aqi => "",
            Channel::TrafficDensity => "%",
            Channel::VehicleSpeed => "km/h",
            Channel::EnergyConsumption => "kW",
        }
    }
}

/// One tick of global readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryReading {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub aqi: f64,
    pub traffic_density: f64,
    pub vehicle_speed: f64,
    pub energy_consumption: f64,
}

impl TelemetryReading {
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Aqi => self.aqi,
            Channel::TrafficDensity => self.traffic_density,
            Channel::VehicleSpeed => self.vehicle_speed,
            Channel::EnergyConsumption => self.energy_consumption,
        }
    }
}

/// Seven parallel sequences, oldest first. Index `i` across all of them is one tick.
///
/// Fields are private so the only way to grow the series is [`GlobalSeries::push`],
/// which keeps every sequence the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalSeries {
    timestamps: VecDeque<DateTime<Utc>>,
    temperature: VecDeque<f64>,
    humidity: VecDeque<f64>,
    aqi: VecDeque<f64>,
    traffic_density: VecDeque<f64>,
    vehicle_speed: VecDeque<f64>,
    energy_consumption: VecDeque<f64>,
}

impl GlobalSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(capacity),
            temperature: VecDeque::with_capacity(capacity),
            humidity: VecDeque::with_capacity(capacity),
            aqi: VecDeque::with_capacity(capacity),
            traffic_density: VecDeque::with_capacity(capacity),
            vehicle_speed: VecDeque::with_capacity(capacity),
            energy_consumption: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one tick, dropping the oldest tick first once `capacity` is reached.
    pub(crate) fn push(&mut self, reading: TelemetryReading, capacity: usize) {
        while self.len() >= capacity.max(1) {
            self.pop_oldest();
        }

        self.timestamps.push_back(reading.timestamp);
        self.temperature.push_back(reading.temperature);
        self.humidity.push_back(reading.humidity);
        self.aqi.push_back(reading.aqi);
        self.traffic_density.push_back(reading.traffic_density);
        self.vehicle_speed.push_back(reading.vehicle_speed);
        self.energy_consumption.push_back(reading.energy_consumption);
    }

    fn pop_oldest(&mut self) {
        self.timestamps.pop_front();
        self.temperature.pop_front();
        self.humidity.pop_front();
        self.aqi.pop_front();
        self.traffic_density.pop_front();
        self.vehicle_speed.pop_front();
        self.energy_consumption.pop_front();
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &VecDeque<DateTime<Utc>> {
        &self.timestamps
    }

    pub fn temperature(&self) -> &VecDeque<f64> {
        &self.temperature
    }

    pub fn humidity(&self) -> &VecDeque<f64> {
        &self.humidity
    }

    pub fn aqi(&self) -> &VecDeque<f64> {
        &self.aqi
    }

    pub fn traffic_density(&self) -> &VecDeque<f64> {
        &self.traffic_density
    }

    pub fn vehicle_speed(&self) -> &VecDeque<f64> {
        &self.vehicle_speed
    }

    pub fn energy_consumption(&self) -> &VecDeque<f64> {
        &self.energy_consumption
    }

    pub fn channel(&self, channel: Channel) -> &VecDeque<f64> {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::Aqi => &self.aqi,
            Channel::TrafficDensity => &self.traffic_density,
            Channel::VehicleSpeed => &self.vehicle_speed,
            Channel::EnergyConsumption => &self.energy_consumption,
        }
    }

    /// Pair a channel with the timestamp sequence, oldest first.
    pub fn points(&self, channel: Channel) -> Vec<TimeSeriesPoint> {
        self.timestamps
            .iter()
            .zip(self.channel(channel))
            .map(|(time, value)| TimeSeriesPoint::new(time.timestamp_millis(), *value))
            .collect()
    }

    pub fn reading_at(&self, index: usize) -> Option<TelemetryReading> {
        Some(TelemetryReading {
            timestamp: *self.timestamps.get(index)?,
            temperature: *self.temperature.get(index)?,
            humidity: *self.humidity.get(index)?,
            aqi: *self.aqi.get(index)?,
            traffic_density: *self.traffic_density.get(index)?,
            vehicle_speed: *self.vehicle_speed.get(index)?,
            energy_consumption: *self.energy_consumption.get(index)?,
        })
    }

    pub fn latest(&self) -> Option<TelemetryReading> {
        self.len().checked_sub(1).and_then(|index| self.reading_at(index))
    }
}

/// Congestion bucket used for colouring traffic density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
}

impl TrafficLevel {
    pub fn from_density(density: f64) -> Self {
        if density > 75.0 {
            TrafficLevel::Heavy
        } else if density > 50.0 {
            TrafficLevel::Moderate
        } else {
            TrafficLevel::Light
        }
    }
}
