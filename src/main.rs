// Main entry point - Configuration, generator construction and the refresh loop
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use metro_telemetry::application::analytics::{aqi_traffic_trend, TREND_WINDOW};
use metro_telemetry::application::clock::{Clock, SteppingClock, SystemClock};
use metro_telemetry::domain::telemetry::TrafficLevel;
use metro_telemetry::infrastructure::config::load_app_config;
use metro_telemetry::infrastructure::logging::init_tracing;
use metro_telemetry::{classify_aqi, AlertLevel, Channel, SignalGenerator, Snapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::MissedTickBehavior;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config().context("Failed to load generator configuration")?;
    tracing::info!(settings = ?config.generator, "Loaded configuration");

    let settings = config.generator.clone();
    let locations = config.locations();
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let period = Duration::from_secs(settings.refresh_interval_secs.max(1));

    match settings.simulated_step_secs {
        Some(step) => {
            let clock = SteppingClock::new(Local::now().fixed_offset(), chrono::Duration::seconds(step));
            let generator = SignalGenerator::with_parts(locations, settings.capacity, rng, clock)?;
            run(generator, settings.warmup_ticks, period).await
        }
        None => {
            let generator = SignalGenerator::with_parts(locations, settings.capacity, rng, SystemClock)?;
            run(generator, settings.warmup_ticks, period).await
        }
    }
}

async fn run<C: Clock>(
    mut generator: SignalGenerator<StdRng, C>,
    warmup_ticks: usize,
    period: Duration,
) -> anyhow::Result<()> {
    let mut alert = generator.warm_up(warmup_ticks).alert_level();

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(period_secs = period.as_secs(), "Starting refresh loop");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let snapshot = generator.tick();
                alert = report(&snapshot, alert);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(ticks = generator.ticks(), "Shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Log the KPI summary and live feed for one snapshot; returns its alert level.
fn report(snapshot: &Snapshot, previous_alert: AlertLevel) -> AlertLevel {
    let Some(latest) = snapshot.latest() else {
        return previous_alert;
    };

    let band = classify_aqi(latest.aqi);
    let trend = aqi_traffic_trend(snapshot.global_series(), TREND_WINDOW);

    tracing::info!(
        sequence = snapshot.sequence(),
        time = %latest.timestamp.with_timezone(&Local).format("%H:%M:%S"),
        temperature = latest.temperature,
        temperature_change = snapshot.change_from_previous(Channel::Temperature).unwrap_or(0.0),
        aqi = latest.aqi,
        band = %band,
        traffic = latest.traffic_density,
        traffic_level = ?TrafficLevel::from_density(latest.traffic_density),
        speed = latest.vehicle_speed,
        energy_mw = latest.energy_consumption / 1_000.0,
        trend_slope = trend.map(|t| t.slope).unwrap_or(0.0),
        "Tick"
    );

    for (location, state) in snapshot.feed() {
        tracing::debug!(
            sensor = %location.name,
            category = %location.category,
            temperature = state.temperature,
            humidity = state.humidity,
            aqi = state.aqi,
            color = classify_aqi(state.aqi).color(),
            traffic = state.traffic_density,
            speed = state.vehicle_speed,
            "Sensor feed"
        );
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        match serde_json::to_string(snapshot) {
            Ok(json) => tracing::trace!(snapshot = %json, "Snapshot"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize snapshot"),
        }
    }

    let alert = snapshot.alert_level();
    if alert != previous_alert {
        if alert == AlertLevel::Nominal {
            tracing::info!(aqi = latest.aqi, "{}", alert.message());
        } else {
            tracing::warn!(level = ?alert, aqi = latest.aqi, "{}", alert.message());
        }
    }

    alert
}
