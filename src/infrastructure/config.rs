use crate::application::series_store::DEFAULT_CAPACITY;
use crate::domain::location::{default_locations, Location, LocationCategory};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default = "default_location_configs")]
    pub locations: Vec<LocationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorSettings {
    pub capacity: usize,
    pub warmup_ticks: usize,
    pub refresh_interval_secs: u64,
    pub seed: Option<u64>,
    pub simulated_step_secs: Option<i64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            warmup_ticks: 50,
            refresh_interval_secs: 5,
            seed: None,
            simulated_step_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: LocationCategory,
}

impl LocationConfig {
    pub fn to_location(&self) -> Location {
        Location::new(self.id.clone(), self.latitude, self.longitude, self.category)
    }
}

impl AppConfig {
    pub fn locations(&self) -> Vec<Location> {
        self.locations.iter().map(LocationConfig::to_location).collect()
    }
}

fn default_location_configs() -> Vec<LocationConfig> {
    default_locations()
        .into_iter()
        .map(|location| LocationConfig {
            id: location.id,
            latitude: location.latitude,
            longitude: location.longitude,
            category: location.category,
        })
        .collect()
}

/// Optional `config/generator.*` file, then `METRO__SECTION__KEY` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/generator").required(false))
        .add_source(
            config::Environment::with_prefix("METRO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
