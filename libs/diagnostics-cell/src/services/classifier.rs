use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{Diagnosis, DiagnosticsError, ImageType, Severity};

/// Turns an uploaded image into a diagnosis.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &[u8], image_type: ImageType) -> Result<Diagnosis, DiagnosticsError>;
}

/// Stand-in classifier that returns one of a few canned results.
#[derive(Debug, Clone)]
pub struct MockImageClassifier {
    delay: Duration,
}

impl MockImageClassifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.image_analysis_delay())
    }

    pub fn canned_results(image_type: ImageType) -> Vec<Diagnosis> {
        let entries: &[(&str, f32, &str, Severity)] = match image_type {
            ImageType::Xray => &[
                ("Normal Chest X-Ray", 0.92, "No abnormalities detected. Lungs appear clear with normal heart size. Continue regular health checkups.", Severity::Low),
                ("Possible Pneumonia", 0.78, "Consult pulmonologist immediately. Antibiotic treatment may be required. Monitor symptoms closely.", Severity::High),
                ("Bone Fracture Detected", 0.85, "Immediate orthopedic consultation required. Immobilize the area and avoid movement.", Severity::High),
                ("Mild Lung Inflammation", 0.73, "Monitor symptoms and consult doctor if condition worsens. Rest and hydration recommended.", Severity::Moderate),
            ],
            ImageType::Wound => &[
                ("Minor Skin Abrasion", 0.87, "Clean wound with antiseptic. Apply topical antibiotic and bandage. Monitor for signs of infection.", Severity::Low),
                ("Infected Wound", 0.82, "Seek medical attention immediately. May require antibiotic treatment and professional wound care.", Severity::High),
                ("Deep Laceration", 0.90, "Immediate medical attention required. May need stitches. Apply pressure to control bleeding.", Severity::High),
                ("Superficial Cut", 0.88, "Clean thoroughly and apply antiseptic. Cover with sterile bandage. Should heal within a few days.", Severity::Low),
                ("Burn Injury", 0.79, "Cool with running water. Apply burn gel and loose bandage. Seek medical care for severe burns.", Severity::Moderate),
            ],
        };

        entries
            .iter()
            .map(|(condition, confidence, recommendation, severity)| Diagnosis {
                condition: condition.to_string(),
                confidence: *confidence,
                recommendation: recommendation.to_string(),
                severity: *severity,
            })
            .collect()
    }
}

#[async_trait]
impl ImageClassifier for MockImageClassifier {
    async fn classify(&self, image: &[u8], image_type: ImageType) -> Result<Diagnosis, DiagnosticsError> {
        debug!("Classifying {} byte {} image", image.len(), image_type);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Self::canned_results(image_type)
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| DiagnosticsError::Classifier(format!("no results for {}", image_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_a_canned_result() {
        let classifier = MockImageClassifier::new(Duration::ZERO);

        for image_type in [ImageType::Xray, ImageType::Wound] {
            let diagnosis = classifier.classify(b"img", image_type).await.unwrap();
            assert!(MockImageClassifier::canned_results(image_type).contains(&diagnosis));
            assert!((0.0..=1.0).contains(&diagnosis.confidence));
        }
    }

    #[test]
    fn test_canned_result_counts() {
        assert_eq!(MockImageClassifier::canned_results(ImageType::Xray).len(), 4);
        assert_eq!(MockImageClassifier::canned_results(ImageType::Wound).len(), 5);
    }
}
