//! Face detection for the emotion announcer
//!
//! Wraps the external face-analysis capability behind [`FaceDetector`] and
//! owns the rule that turns a list of detected faces into one primary emotion.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod selection;
mod types;

pub use error::{DetectionError, Result};
pub use provider::{FaceDetector, rekognition::RekognitionDetector};
pub use selection::{NOT_SPECIFIED, PrimarySelection, primary_face, select_primary};
pub use types::{BoundingBox, DetectedFace, EmotionScore};
