use chrono::Utc;
use rand::Rng;
use serde_json::json;
use tracing::{debug, info, warn};

use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::{SessionContext, Table};

use crate::models::{DiagnosticsError, PulseReading, PulseReadingRequest, PulseStatus};

const BASE_RATE: f64 = 72.0;
const VARIATION: f64 = 10.0;
const SIMULATED_RANGE: std::ops::RangeInclusive<u16> = 60..=100;
const MEASURABLE_RANGE: std::ops::RangeInclusive<u16> = 20..=250;

const DEFAULT_DEVICE: &str = "Bluetooth Sensor";

pub struct PulseService {
    ctx: SessionContext,
}

impl PulseService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Simulated resting adult pulse: 72 ± 10 BPM, kept within 60..=100.
    pub fn generate_reading() -> u16 {
        let variation = rand::thread_rng().gen_range(-VARIATION..VARIATION);
        let bpm = (BASE_RATE + variation).round() as u16;
        bpm.clamp(*SIMULATED_RANGE.start(), *SIMULATED_RANGE.end())
    }

    /// Stores a reading in `pulse_readings` and logs a `pulse_reading` health record.
    pub async fn record_reading(&self, request: PulseReadingRequest) -> Result<PulseReading, DiagnosticsError> {
        let heart_rate = match request.heart_rate {
            Some(bpm) if !MEASURABLE_RANGE.contains(&bpm) => {
                return Err(DiagnosticsError::HeartRateOutOfRange(bpm));
            }
            Some(bpm) => bpm,
            None => {
                let bpm = Self::generate_reading();
                debug!("No measured rate supplied, simulated {} BPM", bpm);
                bpm
            }
        };
        let status = PulseStatus::classify(heart_rate);
        let recorded_at = Utc::now();

        let row = json!({
            "user_id": self.ctx.user_id(),
            "heart_rate": heart_rate,
            "status": status,
            "notes": request.notes,
            "recorded_at": recorded_at.to_rfc3339(),
        });

        let inserted = self.ctx.store()
            .insert(Table::PulseReadings, row, self.ctx.auth_token())
            .await
            .map_err(|e| DiagnosticsError::Database(e.to_string()))?;
        if inserted.is_empty() {
            return Err(DiagnosticsError::NotPersisted("pulse reading"));
        }

        let record = NewHealthRecord::new(
            ActivityType::PulseReading,
            format!("Pulse Reading - {} BPM", heart_rate),
        )
        .with_description(format!("Heart rate: {} BPM ({})", heart_rate, status))
        .with_metadata(json!({
            "heart_rate": heart_rate,
            "status": status,
            "notes": request.notes,
            "device": request.device.as_deref().unwrap_or(DEFAULT_DEVICE),
        }));

        if let Err(err) = HealthRecordService::new(self.ctx.clone()).append(record).await {
            warn!("Pulse reading saved but its health record was not written: {}", err);
        }

        info!("Recorded {} BPM ({}) for user {}", heart_rate, status, self.ctx.user_id());
        Ok(PulseReading {
            heart_rate,
            status,
            notes: request.notes,
            recorded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_readings_stay_in_range() {
        for _ in 0..1_000 {
            let bpm = PulseService::generate_reading();
            assert!((62..=82).contains(&bpm), "{} outside 72 ± 10", bpm);
            assert_eq!(PulseStatus::classify(bpm), PulseStatus::Normal);
        }
    }
}
