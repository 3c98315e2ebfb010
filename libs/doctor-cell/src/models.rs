use std::fmt;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use shared_config::AppConfig;
use shared_models::error::AppError;

// ==============================================================================
// DIRECTORY MODELS
// ==============================================================================

/// A latitude/longitude pair. Used both for a doctor's practice and for the
/// user's device position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCoords {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCoords {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// How a consultation takes place. Each channel has its own fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentChannel {
    #[default]
    InPerson,
    Call,
    Video,
}

impl AppointmentChannel {
    pub const ALL: [AppointmentChannel; 3] = [
        AppointmentChannel::InPerson,
        AppointmentChannel::Call,
        AppointmentChannel::Video,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AppointmentChannel::InPerson => "in-person",
            AppointmentChannel::Call => "call",
            AppointmentChannel::Video => "video",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AppointmentChannel::InPerson => "In-Person Visit",
            AppointmentChannel::Call => "Phone Call",
            AppointmentChannel::Video => "Video Chat",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AppointmentChannel::InPerson => "Visit the doctor at their clinic for physical examination",
            AppointmentChannel::Call => "Voice consultation over phone call",
            AppointmentChannel::Video => "Video consultation with screen sharing",
        }
    }
}

impl fmt::Display for AppointmentChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Fees in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationFees {
    pub in_person: u32,
    pub call: u32,
    pub video: u32,
}

impl ConsultationFees {
    pub fn fee_for(&self, channel: AppointmentChannel) -> u32 {
        match channel {
            AppointmentChannel::InPerson => self.in_person,
            AppointmentChannel::Call => self.call,
            AppointmentChannel::Video => self.video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub qualification: String,
    pub experience_years: u32,
    pub rating: f32,
    pub review_count: u32,
    pub hospital: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub consultation_fee: ConsultationFees,
    pub availability: WeeklyAvailability,
    pub languages: Vec<String>,
    pub services: Vec<String>,
    pub about: String,
    pub education: Vec<String>,
    pub awards: Vec<String>,
    pub is_available: bool,
    pub next_available_slot: String,
    pub image: String,
    pub coordinates: LocationCoords,
}

impl DoctorProfile {
    pub fn offers_slot(&self, time: &str) -> bool {
        self.availability.time_slots.iter().any(|slot| slot == time)
    }

    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }

    /// Checks the catalog invariants: rating range and a slot for every available doctor.
    pub fn validate(&self) -> Result<(), DoctorError> {
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DoctorError::InvalidProfile(format!("{} has rating {}", self.id, self.rating)));
        }
        if self.is_available && self.availability.time_slots.is_empty() {
            return Err(DoctorError::InvalidProfile(format!("{} is available without time slots", self.id)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Invalid doctor profile: {0}")]
    InvalidProfile(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::InvalidProfile(_) => AppError::Internal(err.to_string()),
        }
    }
}

// ==============================================================================
// POSITIONING MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSecurity {
    pub is_secure_context: bool,
    pub hostname: String,
    pub protocol: String,
}

impl PageSecurity {
    /// Geolocation is only offered on secure pages, with a local-development exception.
    pub fn allows_geolocation(&self) -> bool {
        self.is_secure_context
            || self.hostname == "localhost"
            || self.hostname == "127.0.0.1"
            || self.protocol == "https:"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(20),
            maximum_age: Duration::from_secs(60),
        }
    }
}

impl PositionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: config.location_timeout(),
            maximum_age: config.location_maximum_age(),
        }
    }
}

/// Failure reported by the positioning capability, using the W3C error codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionError {
    pub code: u16,
    pub message: String,
}

impl PositionError {
    pub const PERMISSION_DENIED: u16 = 1;
    pub const POSITION_UNAVAILABLE: u16 = 2;
    pub const TIMEOUT: u16 = 3;

    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Your browser doesn't support location services.")]
    NotSupported,

    #[error("Location services require a secure connection (HTTPS).")]
    InsecureContext,

    #[error("Location access was denied.")]
    PermissionDenied,

    #[error("Location information is unavailable.")]
    PositionUnavailable,

    #[error("Location request timed out.")]
    Timeout,

    #[error("Unable to get your location.")]
    Unknown(String),
}

impl LocationError {
    pub fn kind(&self) -> &'static str {
        match self {
            LocationError::NotSupported => "GEOLOCATION_NOT_SUPPORTED",
            LocationError::InsecureContext => "INSECURE_CONTEXT",
            LocationError::PermissionDenied => "PERMISSION_DENIED",
            LocationError::PositionUnavailable => "POSITION_UNAVAILABLE",
            LocationError::Timeout => "TIMEOUT",
            LocationError::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn remediation_steps(&self) -> &'static [&'static str] {
        match self {
            LocationError::NotSupported => &[
                "Try using Chrome, Firefox, Safari, or Edge",
                "Update your browser to the latest version",
                "Enable JavaScript in your browser settings",
            ],
            LocationError::InsecureContext => &[
                "Access the site via HTTPS",
                "Contact your administrator for SSL setup",
                "Use localhost for development",
            ],
            LocationError::PermissionDenied => &[
                "Click the lock icon in your address bar",
                "Select \"Allow\" for location access",
                "Refresh the page and try again",
                "Check browser settings → Privacy → Location Services",
                "Ensure location services are enabled on your device",
            ],
            LocationError::PositionUnavailable => &[
                "Enable GPS on your device",
                "Check your internet connection",
                "Move to an area with better signal",
                "Try again in a few moments",
            ],
            LocationError::Timeout => &[
                "Check your internet connection",
                "Ensure GPS is enabled",
                "Try again with a stable connection",
                "Move closer to a window if indoors",
            ],
            LocationError::Unknown(_) => &[
                "Refresh the page and try again",
                "Check browser permissions",
                "Ensure location services are enabled",
                "Try a different browser",
            ],
        }
    }

    /// Message followed by the numbered remediation steps.
    pub fn troubleshooting_text(&self) -> String {
        let steps = self.remediation_steps()
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n\nTroubleshooting steps:\n{}", self, steps)
    }
}

impl From<PositionError> for LocationError {
    fn from(err: PositionError) -> Self {
        match err.code {
            PositionError::PERMISSION_DENIED => LocationError::PermissionDenied,
            PositionError::POSITION_UNAVAILABLE => LocationError::PositionUnavailable,
            PositionError::TIMEOUT => LocationError::Timeout,
            _ => LocationError::Unknown(err.message),
        }
    }
}

impl IntoResponse for LocationError {
    fn into_response(self) -> Response {
        tracing::debug!("Location request failed: {}", self.kind());

        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
                "steps": self.remediation_steps(),
            }
        }));

        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}
