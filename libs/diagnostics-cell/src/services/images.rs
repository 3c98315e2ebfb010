use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use health_record_cell::{ActivityType, HealthRecordService, NewHealthRecord};
use shared_database::{SessionContext, Table};

use crate::models::{DiagnosticsError, ImageAnalysis, ImageAnalysisRequest};
use crate::services::classifier::ImageClassifier;

pub struct ImageAnalysisService {
    ctx: SessionContext,
    classifier: Arc<dyn ImageClassifier>,
}

impl ImageAnalysisService {
    pub fn new(ctx: SessionContext, classifier: Arc<dyn ImageClassifier>) -> Self {
        Self { ctx, classifier }
    }

    /// Classifies the image, stores the result in `medical_images` and logs an
    /// `image_analysis` health record.
    pub async fn analyze(&self, request: ImageAnalysisRequest) -> Result<ImageAnalysis, DiagnosticsError> {
        let bytes = decode_image(&request.image)?;
        let image_url = image_reference(&bytes);

        debug!("Analyzing {} image {} for user {}", request.image_type, image_url, self.ctx.user_id());
        let diagnosis = self.classifier.classify(&bytes, request.image_type).await?;

        let row = json!({
            "user_id": self.ctx.user_id(),
            "image_url": image_url,
            "image_type": request.image_type,
            "analysis_result": diagnosis,
            "confidence_score": diagnosis.confidence,
            "recommended_action": diagnosis.recommendation,
        });

        let inserted = self.ctx.store()
            .insert(Table::MedicalImages, row, self.ctx.auth_token())
            .await
            .map_err(|e| DiagnosticsError::Database(e.to_string()))?;
        if inserted.is_empty() {
            return Err(DiagnosticsError::NotPersisted("medical image"));
        }

        let record = NewHealthRecord::new(
            ActivityType::ImageAnalysis,
            format!("Medical Image Analysis - {}", diagnosis.condition),
        )
        .with_description(format!(
            "{} analysis: {}",
            request.image_type.display_name(),
            diagnosis.condition
        ))
        .with_metadata(json!({
            "image_type": request.image_type,
            "condition": diagnosis.condition,
            "confidence": diagnosis.confidence,
            "severity": diagnosis.severity,
            "notes": request.notes,
        }));

        if let Err(err) = HealthRecordService::new(self.ctx.clone()).append(record).await {
            warn!("Image analysis {} saved but its health record was not written: {}", image_url, err);
        }

        info!("Image {} analyzed as {}", image_url, diagnosis.condition);
        Ok(ImageAnalysis {
            image_url,
            image_type: request.image_type,
            diagnosis,
        })
    }
}

/// Accepts plain base64 or a `data:<mime>;base64,<payload>` URL.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, DiagnosticsError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    };

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(DiagnosticsError::EmptyImage);
    }

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DiagnosticsError::InvalidImage(e.to_string()))?;
    if bytes.is_empty() {
        return Err(DiagnosticsError::EmptyImage);
    }
    Ok(bytes)
}

/// Content-addressed name for an image that is not uploaded to storage.
fn image_reference(bytes: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_plain_and_data_url() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_matches!(decode_image(""), Err(DiagnosticsError::EmptyImage));
        assert_matches!(decode_image("data:image/png;base64,"), Err(DiagnosticsError::EmptyImage));
        assert_matches!(decode_image("not base64!"), Err(DiagnosticsError::InvalidImage(_)));
    }

    #[test]
    fn test_image_reference_is_stable() {
        assert_eq!(
            image_reference(b"hello"),
            "sha256:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
