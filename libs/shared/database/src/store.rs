use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Tables exposed by the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Appointments,
    HealthRecords,
    MedicineReminders,
    SymptomChecks,
    PulseReadings,
    MedicalImages,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Appointments => "appointments",
            Table::HealthRecords => "health_records",
            Table::MedicineReminders => "medicine_reminders",
            Table::SymptomChecks => "symptom_checks",
            Table::PulseReadings => "pulse_readings",
            Table::MedicalImages => "medical_images",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Filter {
    column: String,
    value: String,
}

/// Filter / order / limit for a PostgREST table request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableQuery {
    filters: Vec<Filter>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `column=eq.value` filter. Filters are ANDed.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = self.filters.iter()
            .map(|f| format!("{}=eq.{}", f.column, urlencoding::encode(&f.value)))
            .collect();

        if let Some((column, ascending)) = &self.order {
            parts.push(format!("order={}.{}", column, if *ascending { "asc" } else { "desc" }));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }

        parts.join("&")
    }
}

/// Table-level persistence verbs. `SupabaseClient` is the production adapter.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: Table, query: &TableQuery, auth_token: &str) -> Result<Vec<Value>>;

    /// Returns the inserted rows.
    async fn insert(&self, table: Table, row: Value, auth_token: &str) -> Result<Vec<Value>>;

    /// Returns the rows that matched `query` after the patch. An empty vec means nothing matched.
    async fn update(&self, table: Table, query: &TableQuery, patch: Value, auth_token: &str) -> Result<Vec<Value>>;

    /// Returns the deleted rows.
    async fn delete(&self, table: Table, query: &TableQuery, auth_token: &str) -> Result<Vec<Value>>;
}
