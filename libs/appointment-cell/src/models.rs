use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::AppointmentChannel;
use shared_models::error::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub hospital_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason: String,
    pub doctor_phone: Option<String>,
    pub address: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row written to `appointments`. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAppointment {
    pub user_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub hospital_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason: String,
    pub doctor_phone: Option<String>,
    pub address: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

/// What the user fills in when booking a catalog doctor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentDraft {
    pub channel: AppointmentChannel,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: String,
    pub reason: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingState {
    Entry,
    Submitting,
    Success,
    Closed,
}

/// Manual appointment entry, used for both create and edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentForm {
    pub doctor_name: String,
    pub specialization: String,
    pub hospital_name: String,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: String,
    pub reason: String,
    pub doctor_phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Appointment date {date} is in the past")]
    DateInPast { date: NaiveDate },

    #[error("{doctor} does not offer the {time} slot")]
    SlotNotOffered { doctor: String, time: String },
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] BookingValidationError),

    #[error("Appointment cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment cannot be edited once {0}")]
    NotEditable(AppointmentStatus),

    #[error("Deleting an appointment must be confirmed")]
    ConfirmationRequired,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed appointment row: {0}")]
    Decode(String),

    #[error("Store returned no row for the new appointment")]
    NotPersisted,
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::Validation(_) | AppointmentError::ConfirmationRequired => {
                AppError::ValidationError(err.to_string())
            }
            AppointmentError::InvalidStatusTransition { .. } | AppointmentError::NotEditable(_) => {
                AppError::Conflict(err.to_string())
            }
            AppointmentError::Database(_)
            | AppointmentError::Decode(_)
            | AppointmentError::NotPersisted => AppError::Database(err.to_string()),
        }
    }
}
