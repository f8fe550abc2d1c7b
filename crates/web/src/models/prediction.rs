//! Prediction domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use elite_tips_core::PredictionId;

/// A published sports prediction.
///
/// Only entitled sessions ever see these; the admin panel owns their full
/// lifecycle (create, edit, delete - nothing else).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prediction {
    /// Store-assigned id.
    pub id: PredictionId,
    /// The fixture, e.g. "Arsenal vs Chelsea".
    pub matchup: String,
    /// The tip itself, e.g. "Over 2.5 goals".
    pub tip: String,
    /// Optional confidence note, e.g. "85%".
    pub confidence: Option<String>,
}

/// Reasons a draft is rejected before any store call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("matchup is required")]
    EmptyMatchup,
    #[error("tip is required")]
    EmptyTip,
}

/// An in-progress prediction from the admin form.
///
/// Not persisted anywhere; it round-trips through the form until submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionDraft {
    pub matchup: String,
    pub tip: String,
    #[serde(default)]
    pub confidence: String,
}

impl PredictionDraft {
    /// Check the required fields.
    ///
    /// A draft missing its matchup or tip never reaches the store; the
    /// submit is a no-op from the store's point of view.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.matchup.is_empty() {
            return Err(DraftError::EmptyMatchup);
        }
        if self.tip.is_empty() {
            return Err(DraftError::EmptyTip);
        }
        Ok(())
    }

    /// The confidence note, with an empty field treated as absent.
    #[must_use]
    pub fn confidence_opt(&self) -> Option<&str> {
        if self.confidence.is_empty() {
            None
        } else {
            Some(&self.confidence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(matchup: &str, tip: &str, confidence: &str) -> PredictionDraft {
        PredictionDraft {
            matchup: matchup.to_owned(),
            tip: tip.to_owned(),
            confidence: confidence.to_owned(),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(draft("Arsenal vs Chelsea", "Over 2.5", "80%").validate().is_ok());
    }

    #[test]
    fn test_confidence_is_optional() {
        assert!(draft("Arsenal vs Chelsea", "Over 2.5", "").validate().is_ok());
    }

    #[test]
    fn test_empty_matchup_rejected() {
        assert_eq!(
            draft("", "Over 2.5", "").validate(),
            Err(DraftError::EmptyMatchup)
        );
    }

    #[test]
    fn test_empty_tip_rejected() {
        assert_eq!(
            draft("Arsenal vs Chelsea", "", "").validate(),
            Err(DraftError::EmptyTip)
        );
    }

    #[test]
    fn test_empty_confidence_maps_to_none() {
        assert_eq!(draft("a", "b", "").confidence_opt(), None);
        assert_eq!(draft("a", "b", "60%").confidence_opt(), Some("60%"));
    }
}
