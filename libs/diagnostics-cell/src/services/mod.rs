pub mod classifier;
pub mod images;
pub mod pulse;

pub use classifier::{ImageClassifier, MockImageClassifier};
pub use images::ImageAnalysisService;
pub use pulse::PulseService;
