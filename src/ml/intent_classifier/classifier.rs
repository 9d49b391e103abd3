//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::MatchResult;

/// Intent classifier trait.
///
/// Implementations map free text to one of the intent tags they were
/// trained on, or report [`MatchResult::Unmatched`].
pub trait IntentClassifier: Send + Sync {
    /// Predict the intent for a given text.
    ///
    /// # Arguments
    /// * `text` - The user utterance to classify
    ///
    /// # Returns
    /// The predicted [`MatchResult`]
    fn predict(&self, text: &str) -> Result<MatchResult>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
