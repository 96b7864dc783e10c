// Location domain model - fixed sensor sites and their live readings
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCategory {
    Environmental,
    Transportation,
    Energy,
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LocationCategory::Environmental => "Environmental",
            LocationCategory::Transportation => "Transportation",
            LocationCategory::Energy => "Energy",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: LocationCategory,
}

impl Location {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, category: LocationCategory) -> Self {
        let id = id.into();
        let name = Self::format_name(&id);
        Self {
            id,
            name,
            latitude,
            longitude,
            category,
        }
    }

    fn format_name(id: &str) -> String {
        // Convert "residential_north" to "Residential North"
        id.split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// The eight city sensors used when no locations are configured.
pub fn default_locations() -> Vec<Location> {
    use LocationCategory::*;

    vec![
        Location::new("downtown", 40.758, -73.985, Environmental),
        Location::new("airport", 40.641, -73.778, Transportation),
        Location::new("industrial", 40.689, -74.044, Energy),
        Location::new("residential_north", 40.817, -73.978, Environmental),
        Location::new("residential_south", 40.678, -73.944, Environmental),
        Location::new("highway_i95", 40.750, -73.870, Transportation),
        Location::new("stadium", 40.758, -73.848, Energy),
        Location::new("university", 40.807, -73.962, Environmental),
    ]
}

/// Live readings for one location.
///
/// Temperature, AQI, traffic density and vehicle speed follow a bounded random
/// walk every tick. Humidity and energy load keep their initial values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationState {
    pub temperature: f64,
    pub humidity: f64,
    pub aqi: f64,
    pub traffic_density: f64,
    pub vehicle_speed: f64,
    pub energy_load: f64,
}
