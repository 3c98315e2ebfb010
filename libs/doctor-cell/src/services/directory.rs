use tracing::debug;

use crate::catalog::{catalog, SPECIALIZATIONS};
use crate::models::{DoctorError, DoctorProfile, LocationCoords};

/// Rough kilometres per degree, good enough for a "nearby" hint.
const KM_PER_DEGREE: f64 = 111.0;

/// Keeps doctors whose specialization contains `specialization`, ignoring case.
/// A missing or blank filter keeps everything in catalog order.
pub fn filter_by_specialization<'a>(
    doctors: &'a [DoctorProfile],
    specialization: Option<&str>,
) -> Vec<&'a DoctorProfile> {
    let needle = specialization.map(str::trim).filter(|s| !s.is_empty());

    match needle {
        None => doctors.iter().collect(),
        Some(needle) => {
            let needle = needle.to_lowercase();
            doctors
                .iter()
                .filter(|d| d.specialization.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

/// Nearest first. The sort is stable, so equidistant doctors keep their input order.
pub fn sort_by_distance<'a>(
    mut doctors: Vec<&'a DoctorProfile>,
    origin: Option<LocationCoords>,
) -> Vec<&'a DoctorProfile> {
    if let Some(origin) = origin {
        doctors.sort_by(|a, b| {
            planar_distance(a.coordinates, origin).total_cmp(&planar_distance(b.coordinates, origin))
        });
    }
    doctors
}

/// Euclidean distance in degrees. Not geodesic.
pub fn planar_distance(a: LocationCoords, b: LocationCoords) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlng = a.longitude - b.longitude;
    (dlat * dlat + dlng * dlng).sqrt()
}

pub fn distance_km(doctor: &DoctorProfile, origin: LocationCoords) -> f64 {
    planar_distance(doctor.coordinates, origin) * KM_PER_DEGREE
}

/// Read-only queries over a doctor catalog.
#[derive(Debug, Clone, Copy)]
pub struct DoctorDirectory {
    doctors: &'static [DoctorProfile],
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::new(catalog())
    }
}

impl DoctorDirectory {
    pub fn new(doctors: &'static [DoctorProfile]) -> Self {
        Self { doctors }
    }

    pub fn all(&self) -> &'static [DoctorProfile] {
        self.doctors
    }

    /// Filter first, then order by distance from `origin` when one is known.
    pub fn get_filtered_doctors(
        &self,
        specialization: Option<&str>,
        origin: Option<LocationCoords>,
    ) -> Vec<&'static DoctorProfile> {
        let filtered = filter_by_specialization(self.doctors, specialization);
        debug!(
            "Directory filter {:?} matched {} of {} doctors",
            specialization,
            filtered.len(),
            self.doctors.len()
        );
        sort_by_distance(filtered, origin)
    }

    pub fn get_doctor_by_id(&self, id: &str) -> Result<&'static DoctorProfile, DoctorError> {
        self.doctors
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DoctorError::NotFound(id.to_string()))
    }

    pub fn get_available_doctors(&self) -> Vec<&'static DoctorProfile> {
        self.doctors.iter().filter(|d| d.is_available).collect()
    }

    /// Exact match on the specialization name, ignoring case.
    pub fn get_doctors_by_specialization(&self, specialization: &str) -> Vec<&'static DoctorProfile> {
        let wanted = specialization.trim().to_lowercase();
        self.doctors
            .iter()
            .filter(|d| d.specialization.to_lowercase() == wanted)
            .collect()
    }

    pub fn specializations(&self) -> &'static [&'static str] {
        &SPECIALIZATIONS
    }
}
