use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// ==============================================================================
// SYMPTOM CATALOG MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    General,
    Respiratory,
    Cardiac,
    Digestive,
    Neurological,
    Musculoskeletal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symptom {
    pub id: &'static str,
    pub name: &'static str,
    pub category: SymptomCategory,
}

/// Over-the-counter suggestion shown for a symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub usage: String,
    pub precautions: String,
}

// ==============================================================================
// SYMPTOM CHECK MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Mild,
    Moderate,
}

impl SeverityLevel {
    /// More than three symptoms at once is rated moderate.
    pub fn for_symptom_count(count: usize) -> Self {
        if count > 3 {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::Mild
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SymptomCheckRequest {
    /// Symptom ids from the catalog, e.g. `fever`.
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
}

/// A stored `symptom_checks` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCheck {
    pub id: String,
    pub user_id: String,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub recommended_medicines: Vec<Medicine>,
    pub severity_level: SeverityLevel,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum SymptomError {
    #[error("Select at least one symptom")]
    NoSymptoms,

    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    #[error("No symptom check has been recorded yet")]
    NoChecks,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed symptom check: {0}")]
    Decode(String),

    #[error("Store returned no row for the new symptom check")]
    NotPersisted,
}

impl From<SymptomError> for AppError {
    fn from(err: SymptomError) -> Self {
        match err {
            SymptomError::NoSymptoms | SymptomError::UnknownSymptom(_) => {
                AppError::ValidationError(err.to_string())
            }
            SymptomError::NoChecks => AppError::NotFound(err.to_string()),
            SymptomError::Database(_) | SymptomError::Decode(_) | SymptomError::NotPersisted => {
                AppError::Database(err.to_string())
            }
        }
    }
}
