use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    SymptomCheck,
    PulseReading,
    ImageAnalysis,
    DoctorVisit,
    EmergencyAlert,
    MedicineReminder,
    /// Tags written by clients this service does not know about.
    #[serde(other)]
    Other,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::SymptomCheck => "symptom_check",
            ActivityType::PulseReading => "pulse_reading",
            ActivityType::ImageAnalysis => "image_analysis",
            ActivityType::DoctorVisit => "doctor_visit",
            ActivityType::EmergencyAlert => "emergency_alert",
            ActivityType::MedicineReminder => "medicine_reminder",
            ActivityType::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the append-only activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHealthRecord {
    pub activity_type: ActivityType,
    pub title: String,
    pub description: Option<String>,
    pub metadata: Value,
}

impl NewHealthRecord {
    pub fn new(activity_type: ActivityType, title: impl Into<String>) -> Self {
        Self {
            activity_type,
            title: title.into(),
            description: None,
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Per-activity counts for the report view.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HealthSummary {
    pub total: usize,
    pub by_activity: BTreeMap<ActivityType, usize>,
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl HealthSummary {
    pub fn from_records(records: &[HealthRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            *summary.by_activity.entry(record.activity_type).or_insert(0) += 1;
            summary.last_activity_at = summary.last_activity_at.max(Some(record.created_at));
        }

        summary
    }

    pub fn count(&self, activity_type: ActivityType) -> usize {
        self.by_activity.get(&activity_type).copied().unwrap_or(0)
    }
}

#[derive(Debug, Error)]
pub enum HealthRecordError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed health record: {0}")]
    Decode(String),

    #[error("Store returned no row for the new health record")]
    NotPersisted,
}

impl From<HealthRecordError> for AppError {
    fn from(err: HealthRecordError) -> Self {
        AppError::Database(err.to_string())
    }
}
