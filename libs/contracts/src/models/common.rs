use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::checks::{self, Validate};
use crate::errors::ValidationError;

/// Fields common to every persisted record. Flattened into each saved
/// record shape; also registered on its own for record-read validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSavedFields {
    pub account_id: String,
    #[serde(default = "crate::defaults::generated_id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for ModelSavedFields {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("accountId", &self.account_id)
    }
}

/// Language codes the sentiment service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Zh,
    #[serde(rename = "zh-Hant")]
    ZhHant,
    En,
    Fr,
    De,
    It,
    Ja,
    Ko,
    Pt,
    Es,
}

/// A substring location within the analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    pub begin_offset: i64,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for TextSpan {
    fn check(&self) -> Result<(), ValidationError> {
        // -1 marks "offset unknown" in the upstream response.
        checks::int_at_least("beginOffset", self.begin_offset, -1)
    }
}

/// Sentiment score for a text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub magnitude: f64,
    pub score: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Sentiment {
    fn check(&self) -> Result<(), ValidationError> {
        checks::at_least("magnitude", self.magnitude, 0.0)?;
        checks::within("score", self.score, -1.0, 1.0)
    }
}

/// A classifier label plus its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub class_name: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Class {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("className", &self.class_name)?;
        checks::within("confidence", self.confidence, 0.0, 1.0)
    }
}

/// A content category plus its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfidence {
    pub category_name: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for CategoryConfidence {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("categoryName", &self.category_name)?;
        checks::within("confidence", self.confidence, 0.0, 1.0)
    }
}

/// One sentence's analysis. The label lists are absent on raw sentiment
/// responses and filled in once classification/categorization has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub sentiment: Sentiment,
    pub text: TextSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Vec<Class>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorization: Option<Vec<CategoryConfidence>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for Sentence {
    fn check(&self) -> Result<(), ValidationError> {
        checks::nested("sentiment", &self.sentiment)?;
        checks::nested("text", &self.text)?;
        if let Some(classes) = &self.classification {
            checks::each("classification", classes)?;
        }
        if let Some(categories) = &self.categorization {
            checks::each("categorization", categories)?;
        }
        Ok(())
    }
}

/// Wrapper for a full-document sentiment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysisResponse {
    pub document_sentiment: Sentiment,
    pub language: SupportedLanguage,
    pub sentences: Vec<Sentence>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for SentimentAnalysisResponse {
    fn check(&self) -> Result<(), ValidationError> {
        checks::nested("documentSentiment", &self.document_sentiment)?;
        checks::each("sentences", &self.sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::validate;
    use serde_json::json;

    #[test]
    fn test_sentiment_accepts_bounds() {
        let s: Sentiment = validate(&json!({ "magnitude": 0.0, "score": -1.0 })).unwrap();
        assert_eq!(s.score, -1.0);
        assert!(validate::<Sentiment>(&json!({ "magnitude": 2.4, "score": 1.0 })).is_ok());
    }

    #[test]
    fn test_sentiment_rejects_score_above_one() {
        let err = validate::<Sentiment>(&json!({ "magnitude": 0.5, "score": 1.5 })).unwrap_err();
        assert_eq!(err.path(), Some("score"));
        assert!(err.to_string().contains("must be <= 1"));
    }

    #[test]
    fn test_sentiment_rejects_negative_magnitude() {
        let err = validate::<Sentiment>(&json!({ "magnitude": -0.1, "score": 0.0 })).unwrap_err();
        assert_eq!(err.path(), Some("magnitude"));
    }

    #[test]
    fn test_sentiment_requires_both_fields() {
        let err = validate::<Sentiment>(&json!({ "score": 0.2 })).unwrap_err();
        assert!(err.to_string().contains("magnitude"));
    }

    #[test]
    fn test_sentiment_passes_unknown_fields_through() {
        let s: Sentiment =
            validate(&json!({ "magnitude": 1.0, "score": 0.5, "vendor": "nl-api" })).unwrap();
        assert_eq!(s.extra["vendor"], json!("nl-api"));
        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["vendor"], json!("nl-api"));
    }

    #[test]
    fn test_text_span_allows_unknown_offset_marker() {
        assert!(validate::<TextSpan>(&json!({ "beginOffset": -1, "content": "hi" })).is_ok());
        let err = validate::<TextSpan>(&json!({ "beginOffset": -2, "content": "hi" })).unwrap_err();
        assert_eq!(err.path(), Some("beginOffset"));
    }

    #[test]
    fn test_class_confidence_bounds() {
        assert!(validate::<Class>(&json!({ "className": "billing", "confidence": 0.8 })).is_ok());
        let err =
            validate::<Class>(&json!({ "className": "billing", "confidence": 1.2 })).unwrap_err();
        assert_eq!(err.path(), Some("confidence"));
    }

    #[test]
    fn test_category_name_must_be_non_empty() {
        let err = validate::<CategoryConfidence>(&json!({ "categoryName": "", "confidence": 0.4 }))
            .unwrap_err();
        assert_eq!(err.path(), Some("categoryName"));
    }

    #[test]
    fn test_language_enum_membership() {
        assert!(serde_json::from_value::<SupportedLanguage>(json!("zh-Hant")).is_ok());
        assert!(serde_json::from_value::<SupportedLanguage>(json!("en")).is_ok());
        assert!(serde_json::from_value::<SupportedLanguage>(json!("xx")).is_err());
    }

    #[test]
    fn test_sentiment_response_reports_nested_sentence_path() {
        let err = validate::<SentimentAnalysisResponse>(&json!({
            "documentSentiment": { "magnitude": 1.0, "score": 0.2 },
            "language": "en",
            "sentences": [
                {
                    "sentiment": { "magnitude": 0.1, "score": 0.1 },
                    "text": { "beginOffset": 0, "content": "Great." }
                },
                {
                    "sentiment": { "magnitude": 0.1, "score": 7.0 },
                    "text": { "beginOffset": 7, "content": "Awful." }
                }
            ]
        }))
        .unwrap_err();
        assert_eq!(err.path(), Some("sentences[1].sentiment.score"));
    }

    #[test]
    fn test_saved_fields_default_id_and_reject_blank_account() {
        let saved: ModelSavedFields = validate(&json!({ "accountId": "acct-1" })).unwrap();
        assert_eq!(saved.id.get_version_num(), 4);
        assert!(validate::<ModelSavedFields>(&json!({ "accountId": "" })).is_err());
    }

    #[test]
    fn test_saved_fields_reject_malformed_timestamp() {
        let err = validate::<ModelSavedFields>(&json!({
            "accountId": "acct-1",
            "createdAt": "not-a-date"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("createdAt") || err.to_string().contains("input"));
    }
}
