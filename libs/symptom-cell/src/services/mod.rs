pub mod checker;

pub use checker::{recommend, SymptomCheckService};
