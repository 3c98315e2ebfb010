use serde_json::{json, Value};
use tracing::{debug, info, warn};

use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::{SessionContext, Table, TableQuery};

use crate::catalog::{find_symptom, medicines_for};
use crate::models::{Medicine, SeverityLevel, SymptomCheck, SymptomCheckRequest, SymptomError};

/// Suggestions for every selected symptom, first occurrence of each medicine name kept.
pub fn recommend<S: AsRef<str>>(symptom_ids: &[S]) -> Vec<Medicine> {
    let mut medicines: Vec<Medicine> = Vec::new();

    for medicine in symptom_ids.iter().flat_map(|id| medicines_for(id.as_ref())) {
        if !medicines.iter().any(|m| m.name == medicine.name) {
            medicines.push(medicine.clone());
        }
    }

    medicines
}

pub struct SymptomCheckService {
    ctx: SessionContext,
}

impl SymptomCheckService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Recommends medicines for the selection, stores the check in `symptom_checks`
    /// and logs a `symptom_check` health record.
    pub async fn check(&self, request: SymptomCheckRequest) -> Result<SymptomCheck, SymptomError> {
        let symptoms = selected_symptoms(&request.symptoms)?;
        let medicines = recommend(&symptoms);
        let severity = SeverityLevel::for_symptom_count(symptoms.len());
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        debug!("Checking {} symptoms for user {}", symptoms.len(), self.ctx.user_id());

        let row = json!({
            "user_id": self.ctx.user_id(),
            "symptoms": symptoms,
            "recommended_medicines": medicines,
            "severity_level": severity,
            "notes": notes,
        });

        let inserted = self.ctx.store()
            .insert(Table::SymptomChecks, row, self.ctx.auth_token())
            .await
            .map_err(|e| SymptomError::Database(e.to_string()))?;
        let check = decode(inserted.into_iter().next().ok_or(SymptomError::NotPersisted)?)?;

        let record = NewHealthRecord::new(
            ActivityType::SymptomCheck,
            format!("Symptom Check - {} symptoms", symptoms.len()),
        )
        .with_description(format!("Checked symptoms: {}", symptoms.join(", ")))
        .with_metadata(json!({
            "symptoms": symptoms,
            "medicines": medicines,
            "notes": notes,
        }));

        if let Err(err) = HealthRecordService::new(self.ctx.clone()).append(record).await {
            warn!("Symptom check {} saved but its health record was not written: {}", check.id, err);
        }

        info!("Symptom check {} rated {} with {} suggestions", check.id, severity, medicines.len());
        Ok(check)
    }

    /// Newest first.
    pub async fn history(&self, limit: Option<usize>) -> Result<Vec<SymptomCheck>, SymptomError> {
        let mut query = TableQuery::new()
            .eq("user_id", self.ctx.user_id())
            .order_by("created_at", false);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = self.ctx.store()
            .select(Table::SymptomChecks, &query, self.ctx.auth_token())
            .await
            .map_err(|e| SymptomError::Database(e.to_string()))?;

        rows.into_iter().map(decode).collect()
    }

    /// Replaces the notes on the user's most recent check.
    pub async fn save_notes(&self, notes: Option<String>) -> Result<SymptomCheck, SymptomError> {
        let latest = self
            .history(Some(1))
            .await?
            .into_iter()
            .next()
            .ok_or(SymptomError::NoChecks)?;

        let query = TableQuery::new()
            .eq("id", &latest.id)
            .eq("user_id", self.ctx.user_id());

        let updated = self.ctx.store()
            .update(Table::SymptomChecks, &query, json!({ "notes": notes }), self.ctx.auth_token())
            .await
            .map_err(|e| SymptomError::Database(e.to_string()))?;

        let row = updated.into_iter().next().ok_or(SymptomError::NoChecks)?;
        info!("Notes saved on symptom check {}", latest.id);
        decode(row)
    }
}

/// Trimmed catalog ids in selection order, without repeats.
fn selected_symptoms(requested: &[String]) -> Result<Vec<String>, SymptomError> {
    let mut selected: Vec<String> = Vec::new();

    for id in requested.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        if find_symptom(id).is_none() {
            return Err(SymptomError::UnknownSymptom(id.to_string()));
        }
        if !selected.iter().any(|s| s == id) {
            selected.push(id.to_string());
        }
    }

    if selected.is_empty() {
        return Err(SymptomError::NoSymptoms);
    }
    Ok(selected)
}

fn decode(row: Value) -> Result<SymptomCheck, SymptomError> {
    serde_json::from_value(row).map_err(|e| SymptomError::Decode(e.to_string()))
}
