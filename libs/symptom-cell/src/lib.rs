pub mod catalog;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use catalog::{medicines_for, symptoms};
pub use models::*;
pub use router::symptom_routes;
pub use services::*;
