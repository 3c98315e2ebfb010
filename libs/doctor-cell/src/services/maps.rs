use shared_config::AppConfig;

use crate::models::{DoctorProfile, LocationCoords};

/// Builds map links against a configurable maps host.
#[derive(Debug, Clone)]
pub struct MapLinks {
    base_url: String,
}

impl MapLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.maps_base_url.clone())
    }

    /// Search link for the doctor's hospital and street address.
    pub fn doctor_location(&self, doctor: &DoctorProfile) -> String {
        let query = format!("{} {} {}", doctor.hospital, doctor.address, doctor.city);
        format!("{}/search/?api=1&query={}", self.base_url, urlencoding::encode(&query))
    }

    pub fn current_location(&self, coords: LocationCoords) -> String {
        format!("{}/@{},{},15z", self.base_url, coords.latitude, coords.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    #[test]
    fn test_doctor_location_link_is_encoded() {
        let links = MapLinks::new("https://www.google.com/maps/");
        let url = links.doctor_location(&catalog()[0]);
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=Apollo%20Hospital%20123%20Health%20Street%2C%20Bandra%20West%20Mumbai"
        );
    }

    #[test]
    fn test_current_location_link() {
        let links = MapLinks::new("https://www.google.com/maps");
        assert_eq!(
            links.current_location(LocationCoords::new(19.0596, 72.8295)),
            "https://www.google.com/maps/@19.0596,72.8295,15z"
        );
    }
}
