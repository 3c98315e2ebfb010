pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ActivityType, HealthRecord, HealthRecordError, HealthSummary, NewHealthRecord};
pub use router::health_record_routes;
pub use services::HealthRecordService;
