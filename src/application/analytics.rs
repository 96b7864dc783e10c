// Analytics - chart-side derivations over a snapshot's series
use crate::domain::telemetry::{Channel, GlobalSeries, TimeSeriesPoint};
use serde::Serialize;

pub const MAX_POINTS_PER_SERIES: usize = 150;
pub const TREND_WINDOW: usize = 50;

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit. `None` for fewer than two pairs or constant `xs`.
pub fn fit_trend(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }

    if variance <= f64::EPSILON {
        return None;
    }

    let slope = covariance / variance;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Traffic density against AQI over the newest `window` ticks.
pub fn aqi_traffic_trend(series: &GlobalSeries, window: usize) -> Option<TrendLine> {
    let take = window.min(series.len());
    let skip = series.len() - take;
    let aqi: Vec<f64> = series.channel(Channel::Aqi).iter().skip(skip).copied().collect();
    let traffic: Vec<f64> = series
        .channel(Channel::TrafficDensity)
        .iter()
        .skip(skip)
        .copied()
        .collect();
    fit_trend(&aqi, &traffic)
}

/// Downsample time series points using bucket averaging
pub fn downsample_points(points: Vec<TimeSeriesPoint>, max_points: usize) -> Vec<TimeSeriesPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points;
    }

    let bucket_size = (points.len() as f64 / max_points as f64).ceil() as usize;
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in points.chunks(bucket_size) {
        // Use middle point's timestamp and average value
        let mid_idx = chunk.len() / 2;
        let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;

        downsampled.push(TimeSeriesPoint::new(chunk[mid_idx].time_ms, avg_value));
    }

    downsampled
}

/// Channel as chart points, downsampled to at most [`MAX_POINTS_PER_SERIES`].
pub fn chart_points(series: &GlobalSeries, channel: Channel) -> Vec<TimeSeriesPoint> {
    downsample_points(series.points(channel), MAX_POINTS_PER_SERIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::TelemetryReading;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_aqi_traffic_trend_uses_newest_window() {
        let mut series = GlobalSeries::default();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        for i in 0..20 {
            let aqi = 40.0 + i as f64;
            // First ten ticks are anti-correlated, last ten follow traffic = 2 * aqi - 50
            let traffic_density = if i < 10 { 100.0 - aqi } else { 2.0 * aqi - 50.0 };
            series.push(
                TelemetryReading {
                    timestamp: start + Duration::seconds(i),
                    temperature: 20.0,
                    humidity: 60.0,
                    aqi,
                    traffic_density,
                    vehicle_speed: 40.0,
                    energy_consumption: 500.0,
                },
                100,
            );
        }

        let trend = aqi_traffic_trend(&series, 10).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-9);
        assert!((trend.intercept + 50.0).abs() < 1e-9);
        assert!(aqi_traffic_trend(&series, 1).is_none());
        assert_eq!(chart_points(&series, Channel::Aqi).len(), 20);
    }

    #[test]
    fn test_fit_trend_exact_line() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [5.0, 7.0, 9.0, 11.0];
        let trend = fit_trend(&xs, &ys).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 3.0).abs() < 1e-12);
        assert!((trend.at(10.0) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_trend_degenerate() {
        assert!(fit_trend(&[], &[]).is_none());
        assert!(fit_trend(&[1.0], &[2.0]).is_none());
        assert!(fit_trend(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_downsample_points() {
        let points: Vec<TimeSeriesPoint> = (0..10).map(|i| TimeSeriesPoint::new(i * 1_000, i as f64)).collect();

        let same = downsample_points(points.clone(), 10);
        assert_eq!(same.len(), 10);

        let reduced = downsample_points(points, 5);
        assert_eq!(reduced.len(), 5);
        assert_eq!(reduced[0], TimeSeriesPoint::new(1_000, 0.5));
        assert_eq!(reduced[4], TimeSeriesPoint::new(9_000, 8.5));
    }

    #[test]
    fn test_downsample_uneven_buckets() {
        let points: Vec<TimeSeriesPoint> = (0..7).map(|i| TimeSeriesPoint::new(i, 1.0)).collect();
        let reduced = downsample_points(points, 3);
        assert_eq!(reduced.len(), 3);
        assert_eq!(reduced[2], TimeSeriesPoint::new(6, 1.0));
    }
}
