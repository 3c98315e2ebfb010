pub mod catalog;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use catalog::{catalog, SPECIALIZATIONS};
pub use models::*;
pub use router::doctor_routes;
pub use services::*;
