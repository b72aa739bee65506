use crate::image_classifier::interface::Classification;
use std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("classifier returned no candidates")]
    Empty,
    #[error("confidence {confidence} for {label:?} is outside [0, 1]")]
    ConfidenceOutOfRange { label: String, confidence: f32 },
}

/// Top-ranked classification of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// Takes the first candidate; the classifier already sorts them by confidence.
    pub fn from_classifications(
        classifications: &[Classification],
    ) -> Result<Self, PredictionError> {
        let top = classifications.first().ok_or(PredictionError::Empty)?;

        if !(0.0..=1.0).contains(&top.confidence) {
            return Err(PredictionError::ConfidenceOutOfRange {
                label: top.label.clone(),
                confidence: top.confidence,
            });
        }

        Ok(Self {
            label: top.label.clone(),
            confidence: top.confidence,
        })
    }

    pub fn to_display_string(&self, decimals: Option<usize>) -> String {
        match decimals {
            Some(decimals) => format!("{} - {:.*}", self.label, decimals, self.confidence),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label, self.confidence)
    }
}
