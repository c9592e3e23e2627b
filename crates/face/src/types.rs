use serde::Serialize;

/// Face location as fractions of the image dimensions
///
/// Serialized with the capitalized keys clients already consume
/// (`Width`, `Height`, `Left`, `Top`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl BoundingBox {
    /// Normalized area; malformed boxes (negative or non-finite sides) count as zero
    pub fn area(&self) -> f32 {
        let area = self.width.max(0.0) * self.height.max(0.0);
        if area.is_finite() { area } else { 0.0 }
    }
}

/// One emotion label with the service's confidence in percent
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScore {
    pub label: String,
    pub confidence: f32,
}

/// A single face returned by the detector
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    pub bounding_box: BoundingBox,
    pub emotions: Vec<EmotionScore>,
}

impl DetectedFace {
    /// Highest-confidence emotion; the first one wins ties
    pub fn primary_emotion(&self) -> Option<&EmotionScore> {
        self.emotions.iter().fold(None, |best: Option<&EmotionScore>, candidate| match best {
            Some(current) if rank(candidate.confidence) <= rank(current.confidence) => Some(current),
            _ => Some(candidate),
        })
    }
}

fn rank(confidence: f32) -> f32 {
    if confidence.is_nan() { f32::NEG_INFINITY } else { confidence }
}
