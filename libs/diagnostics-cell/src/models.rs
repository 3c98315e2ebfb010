use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// ==============================================================================
// IMAGE ANALYSIS MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Xray,
    Wound,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Xray => "xray",
            ImageType::Wound => "wound",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImageType::Xray => "X-Ray",
            ImageType::Wound => "Wound/Injury",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    pub confidence: f32,
    pub recommendation: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysisRequest {
    /// Base64 image bytes, optionally as a `data:` URL.
    pub image: String,
    pub image_type: ImageType,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    pub image_url: String,
    pub image_type: ImageType,
    pub diagnosis: Diagnosis,
}

// ==============================================================================
// PULSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseStatus {
    Low,
    Normal,
    High,
}

impl PulseStatus {
    pub fn classify(bpm: u16) -> Self {
        match bpm {
            0..=59 => PulseStatus::Low,
            60..=100 => PulseStatus::Normal,
            _ => PulseStatus::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PulseStatus::Low => "low",
            PulseStatus::Normal => "normal",
            PulseStatus::High => "high",
        }
    }
}

impl fmt::Display for PulseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PulseReadingRequest {
    /// Measured rate. A simulated reading is taken when absent.
    pub heart_rate: Option<u16>,
    pub notes: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulseReading {
    pub heart_rate: u16,
    pub status: PulseStatus,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("Image is empty")]
    EmptyImage,

    #[error("Image is not valid base64: {0}")]
    InvalidImage(String),

    #[error("Heart rate {0} BPM is outside the measurable range")]
    HeartRateOutOfRange(u16),

    #[error("Image classifier failed: {0}")]
    Classifier(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store returned no row for the new {0}")]
    NotPersisted(&'static str),
}

impl From<DiagnosticsError> for AppError {
    fn from(err: DiagnosticsError) -> Self {
        match err {
            DiagnosticsError::EmptyImage
            | DiagnosticsError::InvalidImage(_)
            | DiagnosticsError::HeartRateOutOfRange(_) => AppError::ValidationError(err.to_string()),
            DiagnosticsError::Classifier(_) => AppError::ExternalService(err.to_string()),
            DiagnosticsError::Database(_) | DiagnosticsError::NotPersisted(_) => {
                AppError::Database(err.to_string())
            }
        }
    }
}
