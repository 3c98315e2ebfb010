use serde_json::{json, Value};
use tracing::{debug, info, warn};

use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::{SessionContext, Table, TableQuery};

use crate::models::{
    Appointment, AppointmentError, AppointmentForm, AppointmentStatus, BookingValidationError,
    NewAppointment,
};
use crate::services::lifecycle::AppointmentLifecycleService;

/// The current user's appointments: list, save, status changes and deletion.
pub struct AppointmentService {
    ctx: SessionContext,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentService {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Soonest first.
    pub async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let query = TableQuery::new()
            .eq("user_id", self.ctx.user_id())
            .order_by("appointment_date", true);

        let rows = self.ctx.store()
            .select(Table::Appointments, &query, self.ctx.auth_token())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        debug!("Loaded {} appointments for user {}", rows.len(), self.ctx.user_id());
        rows.into_iter().map(decode).collect()
    }

    pub async fn get(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let rows = self.ctx.store()
            .select(Table::Appointments, &self.owned(appointment_id).limit(1), self.ctx.auth_token())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;
        decode(row)
    }

    /// Creates a new appointment, or edits `editing_id` while it is still scheduled.
    pub async fn save(
        &self,
        form: AppointmentForm,
        editing_id: Option<&str>,
    ) -> Result<Appointment, AppointmentError> {
        let row = self.validate_form(&form)?;

        let saved = match editing_id {
            None => insert_appointment(&self.ctx, &row).await?,
            Some(id) => self.update_scheduled(id, &row).await?,
        };

        let verb = if editing_id.is_some() { "Updated" } else { "Scheduled" };
        let record = NewHealthRecord::new(
            ActivityType::DoctorVisit,
            format!("Appointment - {}", doctor_title(&row.doctor_name)),
        )
        .with_description(format!(
            "{} appointment with {} ({})",
            verb,
            doctor_title(&row.doctor_name),
            row.specialization
        ))
        .with_metadata(serde_json::to_value(&row).unwrap_or_else(|_| json!({})));

        if let Err(err) = HealthRecordService::new(self.ctx.clone()).append(record).await {
            warn!("Appointment {} saved but its health record was not written: {}", saved.id, err);
        }

        info!("{} appointment {}", verb, saved.id);
        Ok(saved)
    }

    pub async fn complete(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Completed).await
    }

    pub async fn cancel(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled).await
    }

    /// Permanently removes the appointment. Nothing is sent without `confirmed`.
    pub async fn delete(&self, appointment_id: &str, confirmed: bool) -> Result<(), AppointmentError> {
        if !confirmed {
            return Err(AppointmentError::ConfirmationRequired);
        }

        let deleted = self.ctx.store()
            .delete(Table::Appointments, &self.owned(appointment_id), self.ctx.auth_token())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        if deleted.is_empty() {
            return Err(AppointmentError::NotFound(appointment_id.to_string()));
        }

        info!("Deleted appointment {}", appointment_id);
        Ok(())
    }

    async fn transition(
        &self,
        appointment_id: &str,
        target: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(appointment_id).await?;
        self.lifecycle.validate_status_transition(current.status, target)?;

        // The status filter keeps a concurrent change from being overwritten.
        let query = self
            .owned(appointment_id)
            .eq("status", AppointmentStatus::Scheduled);

        let updated = self.ctx.store()
            .update(Table::Appointments, &query, json!({ "status": target }), self.ctx.auth_token())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = updated.into_iter().next().ok_or_else(|| {
            warn!("Appointment {} changed status before it could be marked {}", appointment_id, target);
            AppointmentError::InvalidStatusTransition {
                from: current.status,
                to: target,
            }
        })?;

        info!("Appointment {} marked {}", appointment_id, target);
        decode(row)
    }

    async fn update_scheduled(
        &self,
        appointment_id: &str,
        row: &NewAppointment,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(appointment_id).await?;
        self.lifecycle.validate_editable(current.status)?;

        let mut patch = serde_json::to_value(row).map_err(|e| AppointmentError::Decode(e.to_string()))?;
        if let Value::Object(map) = &mut patch {
            map.remove("status");
            map.remove("user_id");
        }

        let query = self
            .owned(appointment_id)
            .eq("status", AppointmentStatus::Scheduled);

        let updated = self.ctx.store()
            .update(Table::Appointments, &query, patch, self.ctx.auth_token())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = updated
            .into_iter()
            .next()
            .ok_or(AppointmentError::NotEditable(current.status))?;
        decode(row)
    }

    fn validate_form(&self, form: &AppointmentForm) -> Result<NewAppointment, BookingValidationError> {
        let required = [
            ("doctor_name", &form.doctor_name),
            ("specialization", &form.specialization),
            ("hospital_name", &form.hospital_name),
            ("appointment_time", &form.appointment_time),
            ("reason", &form.reason),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BookingValidationError::MissingField(field));
            }
        }

        let appointment_date = form
            .appointment_date
            .ok_or(BookingValidationError::MissingField("appointment_date"))?;

        Ok(NewAppointment {
            user_id: self.ctx.user_id().to_string(),
            doctor_name: form.doctor_name.trim().to_string(),
            specialization: form.specialization.trim().to_string(),
            hospital_name: form.hospital_name.trim().to_string(),
            appointment_date,
            appointment_time: form.appointment_time.trim().to_string(),
            reason: form.reason.trim().to_string(),
            doctor_phone: non_blank(&form.doctor_phone),
            address: non_blank(&form.address),
            status: AppointmentStatus::Scheduled,
            notes: non_blank(&form.notes),
        })
    }

    fn owned(&self, appointment_id: &str) -> TableQuery {
        TableQuery::new()
            .eq("id", appointment_id)
            .eq("user_id", self.ctx.user_id())
    }
}

/// Inserts an `appointments` row and returns the stored appointment.
pub(crate) async fn insert_appointment(
    ctx: &SessionContext,
    row: &NewAppointment,
) -> Result<Appointment, AppointmentError> {
    let body = serde_json::to_value(row).map_err(|e| AppointmentError::Decode(e.to_string()))?;

    let inserted = ctx.store()
        .insert(Table::Appointments, body, ctx.auth_token())
        .await
        .map_err(|e| AppointmentError::Database(e.to_string()))?;

    let first = inserted.into_iter().next().ok_or(AppointmentError::NotPersisted)?;
    decode(first)
}

fn decode(row: Value) -> Result<Appointment, AppointmentError> {
    serde_json::from_value(row).map_err(|e| AppointmentError::Decode(e.to_string()))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Typed names usually omit the title; catalog names already carry it.
fn doctor_title(name: &str) -> String {
    if name.starts_with("Dr.") {
        name.to_string()
    } else {
        format!("Dr. {}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_title() {
        assert_eq!(doctor_title("Mehta"), "Dr. Mehta");
        assert_eq!(doctor_title("Dr. Priya Sharma"), "Dr. Priya Sharma");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  ".into())), None);
        assert_eq!(non_blank(&Some(" note ".into())), Some("note".into()));
        assert_eq!(non_blank(&None), None);
    }
}
