pub mod appointments;
pub mod booking;
pub mod lifecycle;

pub use appointments::AppointmentService;
pub use booking::BookingWorkflow;
pub use lifecycle::AppointmentLifecycleService;
