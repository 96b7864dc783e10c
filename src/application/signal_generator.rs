// Signal generator - produces one correlated multi-channel tick per call
use crate::application::clock::{Clock, SystemClock};
use crate::application::diurnal::{self, TrafficRegime};
use crate::application::series_store::BoundedSeriesStore;
use crate::domain::location::{Location, LocationState};
use crate::domain::snapshot::Snapshot;
use crate::domain::telemetry::TelemetryReading;
use crate::error::ConfigurationError;
use chrono::{Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::collections::HashSet;
use std::sync::Arc;

const AQI_FLOOR: f64 = 0.0;
const SPEED_FLOOR: f64 = 5.0;
const DENSITY_MIN: f64 = 0.0;
const DENSITY_MAX: f64 = 100.0;

/// Draw from N(0, sigma).
fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * sigma
}

/// Owns the global history and the per-location state table.
///
/// Single writer: `tick` takes `&mut self`. Snapshots it returns are detached
/// values and may be read anywhere.
pub struct SignalGenerator<R = StdRng, C = SystemClock> {
    store: BoundedSeriesStore,
    locations: Arc<[Location]>,
    states: Vec<LocationState>,
    rng: R,
    clock: C,
    ticks: u64,
}

impl SignalGenerator<StdRng, SystemClock> {
    /// Entropy-seeded generator on the host clock.
    pub fn new(locations: Vec<Location>, capacity: usize) -> Result<Self, ConfigurationError> {
        Self::with_parts(locations, capacity, StdRng::from_entropy(), SystemClock)
    }

    pub fn seeded(locations: Vec<Location>, capacity: usize, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_parts(locations, capacity, StdRng::seed_from_u64(seed), SystemClock)
    }
}

impl<R: Rng, C: Clock> SignalGenerator<R, C> {
    pub fn with_parts(
        locations: Vec<Location>,
        capacity: usize,
        mut rng: R,
        clock: C,
    ) -> Result<Self, ConfigurationError> {
        let store = BoundedSeriesStore::new(capacity)?;
        validate_locations(&locations)?;

        let states = locations.iter().map(|_| initial_state(&mut rng)).collect();

        tracing::info!(
            capacity,
            locations = locations.len(),
            "Signal generator ready"
        );

        Ok(Self {
            store,
            locations: locations.into(),
            states,
            rng,
            clock,
            ticks: 0,
        })
    }

    /// Advance one tick: sample global channels, append them, walk every
    /// location's state, and return the resulting snapshot.
    pub fn tick(&mut self) -> Snapshot {
        let now = self.clock.now();
        let hour = diurnal::fractional_hour(&now);
        let whole_hour = now.hour();

        let reading = self.sample_reading(now.with_timezone(&Utc), hour, whole_hour);
        self.store.append(reading);

        for state in &mut self.states {
            walk_state(state, &mut self.rng);
        }

        self.ticks += 1;

        tracing::debug!(
            sequence = self.ticks,
            temperature = reading.temperature,
            aqi = reading.aqi,
            band = %crate::domain::air_quality::classify_aqi(reading.aqi),
            "Generated tick"
        );

        self.snapshot()
    }

    /// Run `ticks` ticks back to back and return the last snapshot.
    pub fn warm_up(&mut self, ticks: usize) -> Snapshot {
        for _ in 0..ticks {
            self.tick();
        }
        tracing::info!(ticks, history = self.store.len(), "Warm-up complete");
        self.snapshot()
    }

    /// Current view without advancing.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.ticks,
            self.store.snapshot(),
            Arc::clone(&self.locations),
            self.states.clone(),
        )
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn sample_reading(&mut self, timestamp: chrono::DateTime<Utc>, hour: f64, whole_hour: u32) -> TelemetryReading {
        let rng = &mut self.rng;

        let temperature = diurnal::temperature_base(hour) + gaussian(rng, 1.5);
        let humidity = diurnal::humidity_base(hour) + gaussian(rng, 3.0);

        // One factor per tick couples traffic to pollution and speed
        let regime = TrafficRegime::for_hour(whole_hour);
        let traffic_factor = regime.center() + gaussian(rng, regime.jitter());

        let aqi = (40.0 + 30.0 * traffic_factor + gaussian(rng, 5.0)).max(AQI_FLOOR);

        // Global density is drawn independently of the traffic factor
        let traffic_density = rng.gen_range(30..=95) as f64;
        let vehicle_speed = (60.0 - 30.0 * traffic_factor + gaussian(rng, 5.0)).max(SPEED_FLOOR);

        let energy_consumption = diurnal::energy_base(whole_hour) + gaussian(rng, 50.0);

        TelemetryReading {
            timestamp,
            temperature,
            humidity,
            aqi,
            traffic_density,
            vehicle_speed,
            energy_consumption,
        }
    }
}

fn validate_locations(locations: &[Location]) -> Result<(), ConfigurationError> {
    if locations.is_empty() {
        return Err(ConfigurationError::NoLocations);
    }

    let mut seen = HashSet::with_capacity(locations.len());
    for location in locations {
        if !seen.insert(location.id.as_str()) {
            return Err(ConfigurationError::DuplicateLocation(location.id.clone()));
        }
        if !location.has_valid_coordinates() {
            return Err(ConfigurationError::InvalidCoordinates {
                id: location.id.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }
    }

    Ok(())
}

fn initial_state<R: Rng + ?Sized>(rng: &mut R) -> LocationState {
    LocationState {
        temperature: 22.0 + gaussian(rng, 3.0),
        humidity: 50.0 + gaussian(rng, 10.0),
        aqi: (50.0 + gaussian(rng, 15.0)).max(AQI_FLOOR),
        traffic_density: rng.gen_range(20..=80) as f64,
        vehicle_speed: (40.0 + gaussian(rng, 10.0)).max(SPEED_FLOOR),
        energy_load: 500.0 + gaussian(rng, 100.0),
    }
}

/// Bounded random walk. Humidity and energy load stay put.
fn walk_state<R: Rng + ?Sized>(state: &mut LocationState, rng: &mut R) {
    state.temperature += gaussian(rng, 0.5);
    state.aqi = (state.aqi + gaussian(rng, 2.0)).max(AQI_FLOOR);
    let step = rng.gen_range(-5..=5) as f64;
    state.traffic_density = (state.traffic_density + step).clamp(DENSITY_MIN, DENSITY_MAX);
    state.vehicle_speed = (state.vehicle_speed + gaussian(rng, 2.0)).max(SPEED_FLOOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::{FixedClock, SteppingClock};
    use crate::domain::air_quality::{AqiBand, classify_aqi};
    use crate::domain::location::{LocationCategory, default_locations};
    use crate::domain::telemetry::Channel;
    use crate::error::TelemetryError;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, hour, minute, 0)
            .unwrap()
    }

    fn stepping_generator(
        locations: Vec<Location>,
        capacity: usize,
        seed: u64,
    ) -> SignalGenerator<StdRng, SteppingClock> {
        SignalGenerator::with_parts(
            locations,
            capacity,
            StdRng::seed_from_u64(seed),
            SteppingClock::new(at(0, 0), Duration::minutes(7)),
        )
        .unwrap()
    }

    fn single(id: &str) -> Vec<Location> {
        vec![Location::new(id, 40.758, -73.985, LocationCategory::Environmental)]
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            SignalGenerator::seeded(single("a"), 0, 1).err(),
            Some(ConfigurationError::InvalidCapacity(0))
        );
        assert_eq!(
            SignalGenerator::seeded(Vec::new(), 10, 1).err(),
            Some(ConfigurationError::NoLocations)
        );

        let mut duplicated = single("a");
        duplicated.extend(single("a"));
        assert_eq!(
            SignalGenerator::seeded(duplicated, 10, 1).err(),
            Some(ConfigurationError::DuplicateLocation("a".to_string()))
        );

        let off_map = vec![Location::new("moon", 120.0, 0.0, LocationCategory::Energy)];
        assert!(matches!(
            SignalGenerator::seeded(off_map, 10, 1).err(),
            Some(ConfigurationError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_fresh_generator_is_empty() {
        let generator = SignalGenerator::new(default_locations(), 500).unwrap();
        let snapshot = generator.snapshot();
        assert_eq!(generator.ticks(), 0);
        assert!(snapshot.global_series().is_empty());
        assert_eq!(snapshot.locations().len(), 8);
    }

    #[test]
    fn test_bounded_and_equal_length() {
        let capacity = 7;
        let mut generator = stepping_generator(default_locations(), capacity, 11);
        for n in 1..=20usize {
            let snapshot = generator.tick();
            let series = snapshot.global_series();
            assert_eq!(series.temperature().len(), n.min(capacity));
            assert_eq!(series.timestamps().len(), series.len());
            for channel in Channel::ALL {
                assert_eq!(series.channel(channel).len(), series.len());
            }
        }
    }

    #[test]
    fn test_floor_invariants_hold() {
        let mut generator = stepping_generator(default_locations(), 100, 3);
        let mut snapshot = generator.snapshot();
        for _ in 0..2_000 {
            snapshot = generator.tick();
            for (_, state) in snapshot.feed() {
                assert!(state.aqi >= 0.0);
                assert!(state.vehicle_speed >= 5.0);
                assert!((0.0..=100.0).contains(&state.traffic_density));
                assert_eq!(state.traffic_density.fract(), 0.0);
            }
        }

        let series = snapshot.global_series();
        assert!(series.aqi().iter().all(|v| *v >= 0.0));
        assert!(series.vehicle_speed().iter().all(|v| *v >= 5.0));
        assert!(series.traffic_density().iter().all(|v| (30.0..=95.0).contains(v)));
    }

    #[test]
    fn test_eviction_order() {
        let capacity = 5;
        let mut generator = stepping_generator(single("a"), capacity, 5);
        let mut stamps = Vec::new();
        for _ in 0..=capacity {
            let snapshot = generator.tick();
            stamps.push(*snapshot.global_series().timestamps().back().unwrap());
        }

        let snapshot = generator.snapshot();
        let timestamps = snapshot.global_series().timestamps();
        assert_eq!(timestamps.front(), Some(&stamps[1]));
        assert_eq!(timestamps.back(), Some(&stamps[capacity]));
    }

    #[test]
    fn test_keeps_last_ticks_in_order() {
        let mut generator = stepping_generator(single("a"), 3, 9);
        let mut temperatures = Vec::new();
        for _ in 0..5 {
            let snapshot = generator.tick();
            temperatures.push(*snapshot.global_series().temperature().back().unwrap());
        }

        let snapshot = generator.snapshot();
        let kept: Vec<f64> = snapshot.global_series().temperature().iter().copied().collect();
        assert_eq!(kept, temperatures[2..].to_vec());
        assert_eq!(snapshot.sequence(), 5);
    }

    #[test]
    fn test_capacity_two_scenario() {
        let mut generator = SignalGenerator::seeded(single("A"), 2, 2024).unwrap();
        let mut snapshot = generator.snapshot();
        for _ in 0..3 {
            snapshot = generator.tick();
            let state = snapshot.state_of("A").unwrap();
            assert!((0.0..=100.0).contains(&state.traffic_density));
        }
        assert_eq!(snapshot.global_series().temperature().len(), 2);
        assert_eq!(
            snapshot.state_of("B").err(),
            Some(TelemetryError::LocationNotFound("B".to_string()))
        );
        assert_eq!(classify_aqi(120.0), AqiBand::UnhealthyForSensitive);
    }

    #[test]
    fn test_same_seed_same_values() {
        let run = || {
            let mut generator = SignalGenerator::with_parts(
                default_locations(),
                50,
                StdRng::seed_from_u64(77),
                FixedClock(at(8, 30)),
            )
            .unwrap();
            generator.warm_up(10)
        };

        let first = run();
        let second = run();
        assert_eq!(first.global_series(), second.global_series());
        assert_eq!(first.state_of("airport"), second.state_of("airport"));
    }

    #[test]
    fn test_humidity_and_energy_not_walked() {
        let mut generator = stepping_generator(default_locations(), 10, 21);
        let before = generator.snapshot();
        let after = generator.warm_up(25);

        for ((location, old), (_, new)) in before.feed().zip(after.feed()) {
            assert_eq!(old.humidity, new.humidity, "{}", location.id);
            assert_eq!(old.energy_load, new.energy_load, "{}", location.id);
        }
    }

    #[test]
    fn test_snapshot_detached_from_later_ticks() {
        let mut generator = stepping_generator(single("a"), 4, 8);
        let held = generator.warm_up(4);
        let held_series = held.global_series().clone();
        let held_state = *held.state_of("a").unwrap();

        generator.warm_up(4);

        assert_eq!(held.global_series(), &held_series);
        assert_eq!(held.state_of("a").unwrap(), &held_state);
        assert_eq!(held.sequence(), 4);
        assert_eq!(generator.ticks(), 8);
    }

    #[test]
    fn test_rush_hour_correlation() {
        // Traffic factor centres at 0.8 in rush hour and 0.2 off-peak, so mean
        // AQI should sit near 64 versus 46 and speed near 36 versus 54.
        let mean = |hour: u32, pick: fn(&TelemetryReading) -> f64| {
            let mut generator = SignalGenerator::with_parts(
                single("a"),
                400,
                StdRng::seed_from_u64(99),
                FixedClock(at(hour, 0)),
            )
            .unwrap();
            let snapshot = generator.warm_up(400);
            let series = snapshot.global_series();
            (0..series.len())
                .filter_map(|i| series.reading_at(i))
                .map(|r| pick(&r))
                .sum::<f64>()
                / series.len() as f64
        };

        let rush_aqi = mean(8, |r| r.aqi);
        let night_aqi = mean(2, |r| r.aqi);
        assert!((rush_aqi - 64.0).abs() < 2.0, "rush aqi {rush_aqi}");
        assert!((night_aqi - 46.0).abs() < 2.0, "night aqi {night_aqi}");

        let rush_speed = mean(8, |r| r.vehicle_speed);
        let night_speed = mean(2, |r| r.vehicle_speed);
        assert!(rush_speed < night_speed);

        let day_energy = mean(12, |r| r.energy_consumption);
        assert!((day_energy - 600.0).abs() < 15.0, "day energy {day_energy}");
    }
}
