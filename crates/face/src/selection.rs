use crate::types::{BoundingBox, DetectedFace};

/// Label announced when no face (or no emotion) was detected
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Outcome of picking the representative face and emotion
#[derive(Debug, Clone, PartialEq)]
pub struct PrimarySelection {
    /// Emotion label to announce
    pub emotion: String,
    /// Location of the chosen face, absent when no face was detected
    pub bounding_box: Option<BoundingBox>,
}

/// The face with the largest bounding-box area; the first one wins ties
pub fn primary_face(faces: &[DetectedFace]) -> Option<&DetectedFace> {
    faces.iter().fold(None, |best: Option<&DetectedFace>, candidate| match best {
        Some(current) if candidate.bounding_box.area() <= current.bounding_box.area() => Some(current),
        _ => Some(candidate),
    })
}

/// Pick the primary emotion from a detection result
///
/// Only the largest face is considered, so a small face in the background
/// cannot outvote the subject of the photo.
pub fn select_primary(faces: &[DetectedFace]) -> PrimarySelection {
    let Some(face) = primary_face(faces) else {
        return PrimarySelection {
            emotion: NOT_SPECIFIED.to_owned(),
            bounding_box: None,
        };
    };

    let emotion = face
        .primary_emotion()
        .map_or_else(|| NOT_SPECIFIED.to_owned(), |e| e.label.clone());

    PrimarySelection {
        emotion,
        bounding_box: Some(face.bounding_box),
    }
}
