pub mod rekognition;

use async_trait::async_trait;

use crate::types::DetectedFace;

/// Face-analysis capability
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Detect every face in `image`, with emotion attributes
    ///
    /// An empty vector means no face was found and is not an error.
    async fn detect(&self, image: &[u8]) -> crate::error::Result<Vec<DetectedFace>>;

    /// Provider name used in logs
    fn name(&self) -> &str;
}
