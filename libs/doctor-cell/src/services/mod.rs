pub mod directory;
pub mod location;
pub mod maps;
pub mod search;

pub use directory::DoctorDirectory;
pub use location::{ClientPositionReport, LocationResolver, PositionProvider};
pub use maps::MapLinks;
pub use search::{RequestOutcome, SearchController, SearchSnapshot, SearchState};
