use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checks::{self, Validate};
use crate::errors::ValidationError;
use crate::models::common::{CategoryConfidence, Class, ModelSavedFields, Sentence, Sentiment};
use crate::models::feedback::FeedbackType;
use crate::models::user::User;

/// Computed classification and sentiment result for one feedback item.
///
/// `feedbackType` says which channel the item came from; the `user` variant
/// is expected to agree with it, but that pairing is not enforced by the
/// shape. `documentClassification` is absent for accounts that have no
/// trained classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAnalysis {
    #[serde(flatten)]
    pub saved: ModelSavedFields,
    pub content_sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_classification: Option<Vec<Class>>,
    pub document_categorization: Vec<CategoryConfidence>,
    #[serde(default = "crate::defaults::generated_id")]
    pub feedback_id: Uuid,
    pub feedback_type: FeedbackType,
    pub sentences: Vec<Sentence>,
    pub top_document_categories: Vec<String>,
    pub top_sentence_categories: Vec<String>,
    pub user: User,
}

impl Validate for FeedbackAnalysis {
    fn check(&self) -> Result<(), ValidationError> {
        self.saved.check()?;
        checks::nested("contentSentiment", &self.content_sentiment)?;
        if let Some(classes) = &self.document_classification {
            checks::each("documentClassification", classes)?;
        }
        checks::each("documentCategorization", &self.document_categorization)?;
        checks::each("sentences", &self.sentences)?;
        checks::each_non_empty("topDocumentCategories", &self.top_document_categories)?;
        checks::each_non_empty("topSentenceCategories", &self.top_sentence_categories)?;
        checks::nested("user", &self.user)
    }
}
