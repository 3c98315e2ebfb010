use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// ==============================================================================
// REMINDER MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    TwiceDaily,
    ThreeTimes,
    Weekly,
    AsNeeded,
}

impl ReminderFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::TwiceDaily => "twice_daily",
            ReminderFrequency::ThreeTimes => "three_times",
            ReminderFrequency::Weekly => "weekly",
            ReminderFrequency::AsNeeded => "as_needed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReminderFrequency::Daily => "Daily",
            ReminderFrequency::TwiceDaily => "Twice Daily",
            ReminderFrequency::ThreeTimes => "Three Times Daily",
            ReminderFrequency::Weekly => "Weekly",
            ReminderFrequency::AsNeeded => "As Needed",
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored `medicine_reminders` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineReminder {
    pub id: String,
    pub user_id: String,
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: ReminderFrequency,
    #[serde(default)]
    pub time_slots: Vec<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Add/edit form. A missing start date means today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderForm {
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: ReminderFrequency,
    pub time_slots: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReminder {
    pub user_id: String,
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: ReminderFrequency,
    pub time_slots: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: bool,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("At least one reminder time is required")]
    NoTimeSlots,

    #[error("Reminder time {0} is not a valid HH:MM time")]
    InvalidTimeSlot(String),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("Medicine reminder not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ReminderValidationError),

    #[error("Deleting a reminder must be confirmed")]
    ConfirmationRequired,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed medicine reminder: {0}")]
    Decode(String),

    #[error("Store returned no row for the new reminder")]
    NotPersisted,
}

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::NotFound(_) => AppError::NotFound(err.to_string()),
            ReminderError::Validation(_) | ReminderError::ConfirmationRequired => {
                AppError::ValidationError(err.to_string())
            }
            ReminderError::Database(_) | ReminderError::Decode(_) | ReminderError::NotPersisted => {
                AppError::Database(err.to_string())
            }
        }
    }
}
