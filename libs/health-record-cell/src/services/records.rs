use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_database::{SessionContext, Table, TableQuery};

use crate::models::{ActivityType, HealthRecord, HealthRecordError, HealthSummary, NewHealthRecord};

pub struct HealthRecordService {
    ctx: SessionContext,
}

impl HealthRecordService {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// Appends an entry for the current user. Entries are never updated or removed.
    pub async fn append(&self, record: NewHealthRecord) -> Result<HealthRecord, HealthRecordError> {
        debug!("Appending {} health record for user {}", record.activity_type, self.ctx.user_id());

        let row = json!({
            "user_id": self.ctx.user_id(),
            "activity_type": record.activity_type,
            "title": record.title,
            "description": record.description,
            "metadata": record.metadata,
            "created_at": Utc::now().to_rfc3339(),
        });

        let inserted = self.ctx.store()
            .insert(Table::HealthRecords, row, self.ctx.auth_token())
            .await
            .map_err(|e| HealthRecordError::Database(e.to_string()))?;

        let first = inserted.into_iter().next().ok_or(HealthRecordError::NotPersisted)?;
        let record = decode(first)?;

        info!("Health record {} stored ({})", record.id, record.activity_type);
        Ok(record)
    }

    /// Newest first, optionally narrowed to one activity type.
    pub async fn list(
        &self,
        activity_type: Option<ActivityType>,
        limit: Option<usize>,
    ) -> Result<Vec<HealthRecord>, HealthRecordError> {
        let mut query = TableQuery::new()
            .eq("user_id", self.ctx.user_id())
            .order_by("created_at", false);

        if let Some(activity_type) = activity_type {
            query = query.eq("activity_type", activity_type);
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = self.ctx.store()
            .select(Table::HealthRecords, &query, self.ctx.auth_token())
            .await
            .map_err(|e| HealthRecordError::Database(e.to_string()))?;

        let records = rows
            .into_iter()
            .filter_map(|row| match decode(row) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Skipping unreadable health record: {}", err);
                    None
                }
            })
            .collect();

        Ok(records)
    }

    pub async fn summary(&self) -> Result<HealthSummary, HealthRecordError> {
        let records = self.list(None, None).await?;
        Ok(HealthSummary::from_records(&records))
    }
}

fn decode(row: Value) -> Result<HealthRecord, HealthRecordError> {
    serde_json::from_value(row).map_err(|e| HealthRecordError::Decode(e.to_string()))
}
