pub mod reminders;

pub use reminders::ReminderService;
