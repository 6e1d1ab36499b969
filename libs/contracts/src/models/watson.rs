//! Watson Natural Language Classifier response shapes. Field names stay in
//! the service's native snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::checks::{self, Validate};
use crate::errors::ValidationError;

/// One label from a classify call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatsonClass {
    pub class_name: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for WatsonClass {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("class_name", &self.class_name)?;
        checks::within("confidence", self.confidence, 0.0, 1.0)
    }
}

/// Result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatsonClassifyResponse {
    pub classes: Vec<WatsonClass>,
    pub classifier_id: String,
    pub text: String,
    pub top_class: String,
    pub url: String,
}

impl Validate for WatsonClassifyResponse {
    fn check(&self) -> Result<(), ValidationError> {
        checks::each("classes", &self.classes)?;
        checks::non_empty("classifier_id", &self.classifier_id)?;
        checks::non_empty("top_class", &self.top_class)?;
        // The service hands back collection-relative URLs here.
        checks::uri("url", &self.url)
    }
}

/// Lifecycle state of a trained classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatsonClassifierStatus {
    #[serde(rename = "Non Existent")]
    NonExistent,
    Training,
    Failed,
    Available,
    Unavailable,
}

/// Metadata descriptor for an account's trained classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatsonClassifier {
    pub classifier_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    pub url: String,
    pub status: WatsonClassifierStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for WatsonClassifier {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("classifier_id", &self.classifier_id)?;
        checks::absolute_uri("url", &self.url)
    }
}
