//! AWS Rekognition `DetectFaces` provider

use async_trait::async_trait;
use aws_sdk_rekognition::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::detect_faces::DetectFacesError,
    primitives::Blob,
    types::{Attribute, FaceDetail, Image},
};

use super::FaceDetector;
use crate::{
    error::DetectionError,
    types::{BoundingBox, DetectedFace, EmotionScore},
};

/// Face detector backed by Rekognition
pub struct RekognitionDetector {
    name: String,
    client: Client,
}

impl RekognitionDetector {
    /// Create a detector from a loaded AWS SDK configuration
    pub fn new(name: impl Into<String>, sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            name: name.into(),
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl FaceDetector for RekognitionDetector {
    async fn detect(&self, image: &[u8]) -> crate::error::Result<Vec<DetectedFace>> {
        tracing::debug!(provider = %self.name, image_len = image.len(), "rekognition detect_faces request");

        let output = self
            .client
            .detect_faces()
            .image(Image::builder().bytes(Blob::new(image)).build())
            .attributes(Attribute::All)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let faces: Vec<DetectedFace> = output.face_details().iter().map(convert_face).collect();

        tracing::debug!(provider = %self.name, faces = faces.len(), "rekognition detect_faces complete");

        Ok(faces)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn convert_face(detail: &FaceDetail) -> DetectedFace {
    let bounding_box = detail.bounding_box().map_or_else(BoundingBox::default, |b| BoundingBox {
        width: b.width().unwrap_or_default(),
        height: b.height().unwrap_or_default(),
        left: b.left().unwrap_or_default(),
        top: b.top().unwrap_or_default(),
    });

    let emotions = detail
        .emotions()
        .iter()
        .filter_map(|emotion| {
            Some(EmotionScore {
                label: emotion.r#type()?.as_str().to_owned(),
                confidence: emotion.confidence().unwrap_or_default(),
            })
        })
        .collect();

    DetectedFace { bounding_box, emotions }
}

fn classify(err: &SdkError<DetectFacesError>) -> DetectionError {
    let Some(service_err) = err.as_service_error() else {
        return DetectionError::Connection(DisplayErrorContext(err).to_string());
    };

    let message = service_err.message().unwrap_or("no message").to_owned();

    if service_err.is_invalid_image_format_exception()
        || service_err.is_image_too_large_exception()
        || service_err.is_invalid_parameter_exception()
    {
        return DetectionError::InvalidImage(message);
    }

    let code = service_err.code().unwrap_or("Unknown");
    DetectionError::Service(format!("{code}: {message}"))
}
