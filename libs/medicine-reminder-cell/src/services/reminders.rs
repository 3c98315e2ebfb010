use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::{SessionContext, Table, TableQuery};

use crate::models::{
    MedicineReminder, NewReminder, ReminderError, ReminderForm, ReminderValidationError,
};

/// The current user's medicine reminders.
pub struct ReminderService {
    ctx: SessionContext,
}

impl ReminderService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<MedicineReminder>, ReminderError> {
        let query = TableQuery::new()
            .eq("user_id", self.ctx.user_id())
            .order_by("created_at", false);

        let rows = self.ctx.store()
            .select(Table::MedicineReminders, &query, self.ctx.auth_token())
            .await
            .map_err(|e| ReminderError::Database(e.to_string()))?;

        debug!("Loaded {} reminders for user {}", rows.len(), self.ctx.user_id());
        rows.into_iter().map(decode).collect()
    }

    /// Adds a reminder, or replaces `editing_id`. Saving always leaves the reminder active.
    pub async fn save(
        &self,
        form: ReminderForm,
        editing_id: Option<&str>,
    ) -> Result<MedicineReminder, ReminderError> {
        let row = validate_form(self.ctx.user_id(), &form, Utc::now().date_naive())?;
        let body = serde_json::to_value(&row).map_err(|e| ReminderError::Decode(e.to_string()))?;

        let saved = match editing_id {
            None => {
                let inserted = self.ctx.store()
                    .insert(Table::MedicineReminders, body.clone(), self.ctx.auth_token())
                    .await
                    .map_err(|e| ReminderError::Database(e.to_string()))?;
                decode(inserted.into_iter().next().ok_or(ReminderError::NotPersisted)?)?
            }
            Some(id) => self.patch(id, without_owner(body.clone())).await?,
        };

        let verb = if editing_id.is_some() { "Updated" } else { "Added" };
        let record = NewHealthRecord::new(
            ActivityType::MedicineReminder,
            format!("Medicine Reminder - {}", row.medicine_name),
        )
        .with_description(format!("{} reminder for {} ({})", verb, row.medicine_name, row.dosage))
        .with_metadata(body);

        if let Err(err) = HealthRecordService::new(self.ctx.clone()).append(record).await {
            warn!("Reminder {} saved but its health record was not written: {}", saved.id, err);
        }

        info!(
            "{} reminder {} for {} ({})",
            verb,
            saved.id,
            saved.medicine_name,
            saved.frequency.display_name()
        );
        Ok(saved)
    }

    /// Pauses or resumes a reminder without touching its schedule.
    pub async fn set_active(&self, reminder_id: &str, active: bool) -> Result<MedicineReminder, ReminderError> {
        let reminder = self.patch(reminder_id, json!({ "is_active": active })).await?;
        info!("Reminder {} is now {}", reminder_id, if active { "active" } else { "paused" });
        Ok(reminder)
    }

    /// Permanently removes the reminder. Nothing is sent without `confirmed`.
    pub async fn delete(&self, reminder_id: &str, confirmed: bool) -> Result<(), ReminderError> {
        if !confirmed {
            return Err(ReminderError::ConfirmationRequired);
        }

        let deleted = self.ctx.store()
            .delete(Table::MedicineReminders, &self.owned(reminder_id), self.ctx.auth_token())
            .await
            .map_err(|e| ReminderError::Database(e.to_string()))?;

        if deleted.is_empty() {
            return Err(ReminderError::NotFound(reminder_id.to_string()));
        }

        info!("Deleted reminder {}", reminder_id);
        Ok(())
    }

    async fn patch(&self, reminder_id: &str, patch: Value) -> Result<MedicineReminder, ReminderError> {
        let updated = self.ctx.store()
            .update(Table::MedicineReminders, &self.owned(reminder_id), patch, self.ctx.auth_token())
            .await
            .map_err(|e| ReminderError::Database(e.to_string()))?;

        let row = updated
            .into_iter()
            .next()
            .ok_or_else(|| ReminderError::NotFound(reminder_id.to_string()))?;
        decode(row)
    }

    fn owned(&self, reminder_id: &str) -> TableQuery {
        TableQuery::new()
            .eq("id", reminder_id)
            .eq("user_id", self.ctx.user_id())
    }
}

fn validate_form(
    user_id: &str,
    form: &ReminderForm,
    today: NaiveDate,
) -> Result<NewReminder, ReminderValidationError> {
    let medicine_name = form.medicine_name.trim();
    if medicine_name.is_empty() {
        return Err(ReminderValidationError::MissingField("medicine_name"));
    }
    let dosage = form.dosage.trim();
    if dosage.is_empty() {
        return Err(ReminderValidationError::MissingField("dosage"));
    }

    // Blank rows from the form are dropped; the rest must be real times.
    let mut time_slots = Vec::new();
    for slot in form.time_slots.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        NaiveTime::parse_from_str(slot, "%H:%M")
            .map_err(|_| ReminderValidationError::InvalidTimeSlot(slot.to_string()))?;
        time_slots.push(slot.to_string());
    }
    if time_slots.is_empty() {
        return Err(ReminderValidationError::NoTimeSlots);
    }

    let start_date = form.start_date.unwrap_or(today);
    if let Some(end) = form.end_date {
        if end < start_date {
            return Err(ReminderValidationError::EndBeforeStart { start: start_date, end });
        }
    }

    Ok(NewReminder {
        user_id: user_id.to_string(),
        medicine_name: medicine_name.to_string(),
        dosage: dosage.to_string(),
        frequency: form.frequency,
        time_slots,
        start_date,
        end_date: form.end_date,
        notes: form
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        is_active: true,
    })
}

fn without_owner(mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.remove("user_id");
    }
    body
}

fn decode(row: Value) -> Result<MedicineReminder, ReminderError> {
    serde_json::from_value(row).map_err(|e| ReminderError::Decode(e.to_string()))
}
