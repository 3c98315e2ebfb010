use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use doctor_cell::{AppointmentChannel, DoctorProfile};
use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::SessionContext;

use crate::models::{
    Appointment, AppointmentDraft, AppointmentError, AppointmentStatus, BookingState,
    BookingValidationError, NewAppointment,
};
use crate::services::appointments::insert_appointment;

/// One booking attempt against a fixed catalog doctor.
pub struct BookingWorkflow {
    ctx: SessionContext,
    doctor: DoctorProfile,
    draft: AppointmentDraft,
    state: BookingState,
    success_delay: Duration,
}

impl BookingWorkflow {
    pub fn new(ctx: SessionContext, doctor: DoctorProfile, success_delay: Duration) -> Self {
        Self {
            ctx,
            doctor,
            draft: AppointmentDraft::default(),
            state: BookingState::Entry,
            success_delay,
        }
    }

    pub fn with_draft(mut self, draft: AppointmentDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn doctor(&self) -> &DoctorProfile {
        &self.doctor
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn select_channel(&mut self, channel: AppointmentChannel) {
        self.draft.channel = channel;
    }

    /// Fee for the channel currently selected in the draft.
    pub fn fee(&self) -> u32 {
        self.doctor.consultation_fee.fee_for(self.draft.channel)
    }

    pub fn success_delay(&self) -> Duration {
        self.success_delay
    }

    pub fn validate(&self, today: NaiveDate) -> Result<NaiveDate, BookingValidationError> {
        let date = self
            .draft
            .appointment_date
            .ok_or(BookingValidationError::MissingField("appointment_date"))?;
        if date < today {
            return Err(BookingValidationError::DateInPast { date });
        }

        let time = self.draft.appointment_time.trim();
        if time.is_empty() {
            return Err(BookingValidationError::MissingField("appointment_time"));
        }
        if !self.doctor.offers_slot(time) {
            return Err(BookingValidationError::SlotNotOffered {
                doctor: self.doctor.name.clone(),
                time: time.to_string(),
            });
        }

        if self.draft.reason.trim().is_empty() {
            return Err(BookingValidationError::MissingField("reason"));
        }

        Ok(date)
    }

    /// The `appointments` row this draft would produce.
    pub fn build_appointment(&self, date: NaiveDate) -> NewAppointment {
        let channel = self.draft.channel;
        let fee = self.fee();

        let address = match channel {
            AppointmentChannel::InPerson => self.doctor.full_address(),
            _ => format!("{} Consultation", channel.display_name()),
        };

        let user_notes = self
            .draft
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("{} | ", n))
            .unwrap_or_default();

        NewAppointment {
            user_id: self.ctx.user_id().to_string(),
            doctor_name: self.doctor.name.clone(),
            specialization: self.doctor.specialization.clone(),
            hospital_name: self.doctor.hospital.clone(),
            appointment_date: date,
            appointment_time: self.draft.appointment_time.trim().to_string(),
            reason: self.draft.reason.trim().to_string(),
            doctor_phone: Some(self.doctor.phone.clone()),
            address: Some(address),
            status: AppointmentStatus::Scheduled,
            notes: Some(format!(
                "{}Appointment Type: {} | Fee: ₹{}",
                user_notes,
                channel.display_name(),
                fee
            )),
        }
    }

    /// Validates, writes the appointment, then appends the audit record.
    /// A failed audit write is logged and does not undo the booking.
    pub async fn submit(&mut self) -> Result<Appointment, AppointmentError> {
        let date = self.validate(Utc::now().date_naive())?;
        let row = self.build_appointment(date);

        debug!(
            "Booking {} with {} on {} at {}",
            self.draft.channel, self.doctor.id, row.appointment_date, row.appointment_time
        );
        self.state = BookingState::Submitting;

        let appointment = match insert_appointment(&self.ctx, &row).await {
            Ok(appointment) => appointment,
            Err(err) => {
                warn!("Booking with {} failed: {}", self.doctor.id, err);
                self.state = BookingState::Entry;
                return Err(err);
            }
        };

        if let Err(err) = HealthRecordService::new(self.ctx.clone())
            .append(self.audit_record(&row))
            .await
        {
            warn!("Appointment {} booked but its health record was not written: {}", appointment.id, err);
        }

        info!("Appointment {} booked with {} ({})", appointment.id, self.doctor.name, self.draft.channel);

        self.draft = AppointmentDraft::default();
        self.state = BookingState::Success;
        Ok(appointment)
    }

    /// Waits out the confirmation delay and closes the workflow.
    pub async fn finish(&mut self) {
        if self.state != BookingState::Success {
            return;
        }
        tokio::time::sleep(self.success_delay).await;
        self.state = BookingState::Closed;
    }

    fn audit_record(&self, row: &NewAppointment) -> NewHealthRecord {
        let channel = self.draft.channel;

        let mut metadata = serde_json::to_value(row).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut metadata {
            map.insert("appointment_type".to_string(), json!(channel.id()));
            map.insert("fee".to_string(), json!(self.fee()));
            map.insert("doctor_profile".to_string(), json!(self.doctor));
        }

        NewHealthRecord::new(
            ActivityType::DoctorVisit,
            format!("{} Appointment - {}", channel.display_name(), self.doctor.name),
        )
        .with_description(format!(
            "Scheduled {} appointment with {} ({})",
            channel.id(),
            self.doctor.name,
            self.doctor.specialization
        ))
        .with_metadata(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use doctor_cell::DoctorDirectory;
    use shared_database::SupabaseClient;
    use shared_utils::test_utils::{TestConfig, TestUser};

    fn workflow(draft: AppointmentDraft) -> BookingWorkflow {
        let config = TestConfig::default().to_app_config();
        let ctx = SessionContext::new(
            TestUser::default().to_user(),
            "test-token",
            Arc::new(SupabaseClient::new(&config)),
        );
        let doctor = DoctorDirectory::default()
            .get_doctor_by_id("dr-rajesh-kumar-001")
            .unwrap()
            .clone();
        BookingWorkflow::new(ctx, doctor, Duration::ZERO).with_draft(draft)
    }

    fn valid_draft() -> AppointmentDraft {
        AppointmentDraft {
            channel: AppointmentChannel::InPerson,
            appointment_date: NaiveDate::from_ymd_opt(2030, 1, 15),
            appointment_time: "10:00".to_string(),
            reason: "Fever".to_string(),
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 10).unwrap()
    }

    #[test]
    fn test_validation_rules() {
        assert!(workflow(valid_draft()).validate(today()).is_ok());

        let draft = AppointmentDraft { reason: "   ".into(), ..valid_draft() };
        assert_eq!(
            workflow(draft).validate(today()),
            Err(BookingValidationError::MissingField("reason"))
        );

        let draft = AppointmentDraft { appointment_date: None, ..valid_draft() };
        assert_eq!(
            workflow(draft).validate(today()),
            Err(BookingValidationError::MissingField("appointment_date"))
        );

        let draft = AppointmentDraft { appointment_date: NaiveDate::from_ymd_opt(2030, 1, 9), ..valid_draft() };
        assert_matches!(workflow(draft).validate(today()), Err(BookingValidationError::DateInPast { .. }));

        let draft = AppointmentDraft { appointment_time: "12:30".into(), ..valid_draft() };
        assert_matches!(workflow(draft).validate(today()), Err(BookingValidationError::SlotNotOffered { .. }));
    }

    #[test]
    fn test_today_is_bookable() {
        let draft = AppointmentDraft { appointment_date: Some(today()), ..valid_draft() };
        assert_eq!(workflow(draft).validate(today()), Ok(today()));
    }

    #[test]
    fn test_in_person_row_uses_clinic_address() {
        let flow = workflow(AppointmentDraft { notes: Some("Bring reports".into()), ..valid_draft() });
        let row = flow.build_appointment(today());

        assert_eq!(row.address.as_deref(), Some("123 Health Street, Bandra West, Mumbai"));
        assert_eq!(
            row.notes.as_deref(),
            Some("Bring reports | Appointment Type: In-Person Visit | Fee: ₹800")
        );
        assert_eq!(row.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_remote_row_names_the_channel() {
        let mut flow = workflow(valid_draft());
        flow.select_channel(AppointmentChannel::Video);
        let row = flow.build_appointment(today());

        assert_eq!(flow.fee(), 600);
        assert_eq!(row.address.as_deref(), Some("Video Chat Consultation"));
        assert_eq!(row.notes.as_deref(), Some("Appointment Type: Video Chat | Fee: ₹600"));
    }

    #[test]
    fn test_audit_record_shape() {
        let mut flow = workflow(valid_draft());
        flow.select_channel(AppointmentChannel::Call);
        let row = flow.build_appointment(today());
        let record = flow.audit_record(&row);

        assert_eq!(record.activity_type, ActivityType::DoctorVisit);
        assert_eq!(record.title, "Phone Call Appointment - Dr. Rajesh Kumar");
        assert_eq!(
            record.description.as_deref(),
            Some("Scheduled call appointment with Dr. Rajesh Kumar (General Physician)")
        );
        assert_eq!(record.metadata["fee"], 500);
        assert_eq!(record.metadata["appointment_type"], "call");
        assert_eq!(record.metadata["doctor_profile"]["id"], "dr-rajesh-kumar-001");
        assert_eq!(record.metadata["reason"], "Fever");
    }
}
