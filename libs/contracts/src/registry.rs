//! The fixed catalog of named record shapes and the validation entry
//! points.
//!
//! Validation is a three-stage pipeline, synchronous and side-effect-free
//! apart from identifier generation for defaulted fields:
//!
//! 1. closed-shape check: closed shapes reject unlisted top-level keys;
//! 2. structural deserialization: missing fields, wrong types, and enum
//!    values outside their set, with the failing path tracked through
//!    nesting;
//! 3. constraint checks: numeric bounds and string formats over the typed
//!    value.
//!
//! The normalized result owns nothing shared: every call stands alone.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::checks::Validate;
use crate::errors::ValidationError;
use crate::models::{
    AccountIntegration, AccountSetting, AccountSettingPostBody, CategoryConfidence, Class,
    EmailFeedback, EmailFeedbackPostBody, EmailFeedbackWithMaybeAnalysis, FeedbackAnalysis,
    ModelSavedFields,
    Sentence, Sentiment, SentimentAnalysisResponse, TextSpan, TwitterFeedback,
    TwitterFeedbackWithMaybeAnalysis, User, WatsonClassifier, WatsonClassifyResponse,
    ZenDeskTicket, ZenDeskTicketWithMaybeAnalysis,
};
use crate::year_month::YearMonthBucket;

/// A shape in the registry: its catalog name and, when closed, the exact
/// set of top-level fields it permits.
pub trait Contract: Serialize + DeserializeOwned + Validate {
    const NAME: &'static str;

    /// `Some(fields)` makes the shape closed: top-level keys outside the
    /// list fail validation. `None` tolerates unknown fields and passes
    /// them through into the normalized value.
    const CLOSED_FIELDS: Option<&'static [&'static str]> = None;
}

const SAVED_FIELDS: &[&str] = &["accountId", "createdAt", "id", "updatedAt"];

const EMAIL_FEEDBACK_FIELDS: &[&str] = &[
    "accountId",
    "content",
    "createdAt",
    "emailSentDate",
    "from",
    "id",
    "subject",
    "to",
    "updatedAt",
];

const EMAIL_FEEDBACK_WITH_ANALYSIS_FIELDS: &[&str] = &[
    "accountId",
    "analysis",
    "content",
    "createdAt",
    "emailSentDate",
    "from",
    "id",
    "subject",
    "to",
    "updatedAt",
];

const TWITTER_FEEDBACK_FIELDS: &[&str] =
    &["accountId", "createdAt", "id", "statusId", "updatedAt", "user"];

const TWITTER_FEEDBACK_WITH_ANALYSIS_FIELDS: &[&str] = &[
    "accountId",
    "analysis",
    "createdAt",
    "id",
    "statusId",
    "updatedAt",
    "user",
];

const ZENDESK_TICKET_FIELDS: &[&str] =
    &["accountId", "createdAt", "id", "ticketId", "updatedAt", "user"];

const ZENDESK_TICKET_WITH_ANALYSIS_FIELDS: &[&str] = &[
    "accountId",
    "analysis",
    "createdAt",
    "id",
    "ticketId",
    "updatedAt",
    "user",
];

const FEEDBACK_ANALYSIS_FIELDS: &[&str] = &[
    "accountId",
    "contentSentiment",
    "createdAt",
    "documentCategorization",
    "documentClassification",
    "feedbackId",
    "feedbackType",
    "id",
    "sentences",
    "topDocumentCategories",
    "topSentenceCategories",
    "updatedAt",
    "user",
];

const ACCOUNT_SETTING_FIELDS: &[&str] = &[
    "accountId",
    "apiToken",
    "createdAt",
    "feedbackUsageByDate",
    "id",
    "integrations",
    "tier",
    "twitterSearches",
    "updatedAt",
    "watsonClassifier",
];

const WATSON_CLASSIFY_RESPONSE_FIELDS: &[&str] =
    &["classes", "classifier_id", "text", "top_class", "url"];

impl Contract for ModelSavedFields {
    const NAME: &'static str = "ModelSavedFields";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(SAVED_FIELDS);
}

impl Contract for Sentiment {
    const NAME: &'static str = "Sentiment";
}

impl Contract for TextSpan {
    const NAME: &'static str = "TextSpan";
}

impl Contract for Class {
    const NAME: &'static str = "Class";
}

impl Contract for CategoryConfidence {
    const NAME: &'static str = "CategoryConfidence";
}

impl Contract for Sentence {
    const NAME: &'static str = "Sentence";
}

impl Contract for SentimentAnalysisResponse {
    const NAME: &'static str = "SentimentAnalysisResponse";
}

impl Contract for User {
    const NAME: &'static str = "User";
}

impl Contract for FeedbackAnalysis {
    const NAME: &'static str = "FeedbackAnalysis";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(FEEDBACK_ANALYSIS_FIELDS);
}

impl Contract for EmailFeedbackPostBody {
    const NAME: &'static str = "EmailFeedbackPostBody";
}

impl Contract for EmailFeedback {
    const NAME: &'static str = "EmailFeedback";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(EMAIL_FEEDBACK_FIELDS);
}

impl Contract for EmailFeedbackWithMaybeAnalysis {
    const NAME: &'static str = "EmailFeedbackWithMaybeAnalysis";
    const CLOSED_FIELDS: Option<&'static [&'static str]> =
        Some(EMAIL_FEEDBACK_WITH_ANALYSIS_FIELDS);
}

impl Contract for TwitterFeedback {
    const NAME: &'static str = "TwitterFeedback";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(TWITTER_FEEDBACK_FIELDS);
}

impl Contract for TwitterFeedbackWithMaybeAnalysis {
    const NAME: &'static str = "TwitterFeedbackWithMaybeAnalysis";
    const CLOSED_FIELDS: Option<&'static [&'static str]> =
        Some(TWITTER_FEEDBACK_WITH_ANALYSIS_FIELDS);
}

impl Contract for ZenDeskTicket {
    const NAME: &'static str = "ZenDeskTicket";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(ZENDESK_TICKET_FIELDS);
}

impl Contract for ZenDeskTicketWithMaybeAnalysis {
    const NAME: &'static str = "ZenDeskTicketWithMaybeAnalysis";
    const CLOSED_FIELDS: Option<&'static [&'static str]> =
        Some(ZENDESK_TICKET_WITH_ANALYSIS_FIELDS);
}

impl Contract for AccountSettingPostBody {
    const NAME: &'static str = "AccountSettingPostBody";
}

impl Contract for AccountIntegration {
    const NAME: &'static str = "AccountIntegration";
}

impl Contract for AccountSetting {
    const NAME: &'static str = "AccountSetting";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(ACCOUNT_SETTING_FIELDS);
}

impl Contract for WatsonClassifyResponse {
    const NAME: &'static str = "WatsonClassifyResponse";
    const CLOSED_FIELDS: Option<&'static [&'static str]> = Some(WATSON_CLASSIFY_RESPONSE_FIELDS);
}

impl Contract for WatsonClassifier {
    const NAME: &'static str = "WatsonClassifier";
}

/// Validates `candidate` against shape `T` and returns the normalized,
/// defaults-applied value. Absent identifier fields come back filled with
/// fresh v4 UUIDs; everything else is returned exactly as it arrived.
pub fn validate<T: Contract>(candidate: &Value) -> Result<T, ValidationError> {
    let result = run::<T>(candidate);
    match &result {
        Ok(_) => tracing::debug!(shape = T::NAME, "validated"),
        Err(error) => tracing::debug!(shape = T::NAME, %error, "validation failed"),
    }
    result
}

fn run<T: Contract>(candidate: &Value) -> Result<T, ValidationError> {
    if let Some(fields) = T::CLOSED_FIELDS {
        reject_unknown_fields(candidate, fields)?;
    }
    let parsed: T = from_value(candidate)?;
    parsed.check()?;
    Ok(parsed)
}

/// Deserializes with the failing field path tracked through nesting.
pub(crate) fn from_value<T: DeserializeOwned>(candidate: &Value) -> Result<T, ValidationError> {
    serde_path_to_error::deserialize(candidate).map_err(|error| {
        let path = error.path().to_string();
        ValidationError::Shape {
            path,
            message: error.into_inner().to_string(),
        }
    })
}

fn reject_unknown_fields(candidate: &Value, fields: &[&str]) -> Result<(), ValidationError> {
    if let Some(object) = candidate.as_object() {
        for key in object.keys() {
            if !fields.contains(&key.as_str()) {
                return Err(ValidationError::UnknownField { path: key.clone() });
            }
        }
    }
    Ok(())
}

/// Every shape the registry knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeName {
    ModelSavedFields,
    Sentiment,
    TextSpan,
    Class,
    CategoryConfidence,
    Sentence,
    SentimentAnalysisResponse,
    User,
    FeedbackAnalysis,
    EmailFeedbackPostBody,
    EmailFeedback,
    EmailFeedbackWithMaybeAnalysis,
    TwitterFeedback,
    TwitterFeedbackWithMaybeAnalysis,
    ZenDeskTicket,
    ZenDeskTicketWithMaybeAnalysis,
    AccountSettingPostBody,
    AccountSetting,
    AccountIntegration,
    WatsonClassifyResponse,
    WatsonClassifier,
    YearMonthBucket,
}

impl ShapeName {
    pub const ALL: &'static [ShapeName] = &[
        ShapeName::ModelSavedFields,
        ShapeName::Sentiment,
        ShapeName::TextSpan,
        ShapeName::Class,
        ShapeName::CategoryConfidence,
        ShapeName::Sentence,
        ShapeName::SentimentAnalysisResponse,
        ShapeName::User,
        ShapeName::FeedbackAnalysis,
        ShapeName::EmailFeedbackPostBody,
        ShapeName::EmailFeedback,
        ShapeName::EmailFeedbackWithMaybeAnalysis,
        ShapeName::TwitterFeedback,
        ShapeName::TwitterFeedbackWithMaybeAnalysis,
        ShapeName::ZenDeskTicket,
        ShapeName::ZenDeskTicketWithMaybeAnalysis,
        ShapeName::AccountSettingPostBody,
        ShapeName::AccountSetting,
        ShapeName::AccountIntegration,
        ShapeName::WatsonClassifyResponse,
        ShapeName::WatsonClassifier,
        ShapeName::YearMonthBucket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::ModelSavedFields => ModelSavedFields::NAME,
            ShapeName::Sentiment => Sentiment::NAME,
            ShapeName::TextSpan => TextSpan::NAME,
            ShapeName::Class => Class::NAME,
            ShapeName::CategoryConfidence => CategoryConfidence::NAME,
            ShapeName::Sentence => Sentence::NAME,
            ShapeName::SentimentAnalysisResponse => SentimentAnalysisResponse::NAME,
            ShapeName::User => User::NAME,
            ShapeName::FeedbackAnalysis => FeedbackAnalysis::NAME,
            ShapeName::EmailFeedbackPostBody => EmailFeedbackPostBody::NAME,
            ShapeName::EmailFeedback => EmailFeedback::NAME,
            ShapeName::EmailFeedbackWithMaybeAnalysis => EmailFeedbackWithMaybeAnalysis::NAME,
            ShapeName::TwitterFeedback => TwitterFeedback::NAME,
            ShapeName::TwitterFeedbackWithMaybeAnalysis => TwitterFeedbackWithMaybeAnalysis::NAME,
            ShapeName::ZenDeskTicket => ZenDeskTicket::NAME,
            ShapeName::ZenDeskTicketWithMaybeAnalysis => ZenDeskTicketWithMaybeAnalysis::NAME,
            ShapeName::AccountSettingPostBody => AccountSettingPostBody::NAME,
            ShapeName::AccountSetting => AccountSetting::NAME,
            ShapeName::AccountIntegration => AccountIntegration::NAME,
            ShapeName::WatsonClassifyResponse => WatsonClassifyResponse::NAME,
            ShapeName::WatsonClassifier => WatsonClassifier::NAME,
            ShapeName::YearMonthBucket => "YearMonthBucket",
        }
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeName::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownShape(s.to_string()))
    }
}

/// Name-keyed entry point: validates `candidate` against the named shape
/// and returns the normalized JSON value.
pub fn validate_named(shape: ShapeName, candidate: &Value) -> Result<Value, ValidationError> {
    match shape {
        ShapeName::ModelSavedFields => normalized::<ModelSavedFields>(candidate),
        ShapeName::Sentiment => normalized::<Sentiment>(candidate),
        ShapeName::TextSpan => normalized::<TextSpan>(candidate),
        ShapeName::Class => normalized::<Class>(candidate),
        ShapeName::CategoryConfidence => normalized::<CategoryConfidence>(candidate),
        ShapeName::Sentence => normalized::<Sentence>(candidate),
        ShapeName::SentimentAnalysisResponse => normalized::<SentimentAnalysisResponse>(candidate),
        ShapeName::User => {
            // Routed through the ordered variant match so a no-match keeps
            // its per-variant reasons instead of a flattened message.
            let user = User::from_value(candidate)?;
            user.check()?;
            to_normalized_value(&user)
        }
        ShapeName::FeedbackAnalysis => normalized::<FeedbackAnalysis>(candidate),
        ShapeName::EmailFeedbackPostBody => normalized::<EmailFeedbackPostBody>(candidate),
        ShapeName::EmailFeedback => normalized::<EmailFeedback>(candidate),
        ShapeName::EmailFeedbackWithMaybeAnalysis => {
            normalized::<EmailFeedbackWithMaybeAnalysis>(candidate)
        }
        ShapeName::TwitterFeedback => normalized::<TwitterFeedback>(candidate),
        ShapeName::TwitterFeedbackWithMaybeAnalysis => {
            normalized::<TwitterFeedbackWithMaybeAnalysis>(candidate)
        }
        ShapeName::ZenDeskTicket => normalized::<ZenDeskTicket>(candidate),
        ShapeName::ZenDeskTicketWithMaybeAnalysis => {
            normalized::<ZenDeskTicketWithMaybeAnalysis>(candidate)
        }
        ShapeName::AccountSettingPostBody => normalized::<AccountSettingPostBody>(candidate),
        ShapeName::AccountSetting => normalized::<AccountSetting>(candidate),
        ShapeName::AccountIntegration => normalized::<AccountIntegration>(candidate),
        ShapeName::WatsonClassifyResponse => normalized::<WatsonClassifyResponse>(candidate),
        ShapeName::WatsonClassifier => normalized::<WatsonClassifier>(candidate),
        ShapeName::YearMonthBucket => match candidate.as_str() {
            Some(s) => YearMonthBucket::new(s).map(|bucket| Value::String(bucket.into())),
            None => Err(ValidationError::Shape {
                path: ".".to_string(),
                message: "expected a string".to_string(),
            }),
        },
    }
}

fn normalized<T: Contract>(candidate: &Value) -> Result<Value, ValidationError> {
    let parsed: T = validate(candidate)?;
    to_normalized_value(&parsed)
}

fn to_normalized_value<T: Serialize>(parsed: &T) -> Result<Value, ValidationError> {
    serde_json::to_value(parsed).map_err(|error| ValidationError::Shape {
        path: ".".to_string(),
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_fields_survive_normalization_unchanged() {
        let candidate = json!({
            "accountId": "acct-1",
            "id": "8e1c65e9-2f0e-4d93-ae5e-0a4b4e9f86d1",
            "createdAt": "2024-03-01T12:00:00Z",
            "content": "Love it.",
            "emailSentDate": "2024-02-29T08:00:00Z",
            "from": "a@example.com",
            "subject": "Feedback",
            "to": "support@example.com"
        });
        let normalized = validate_named(ShapeName::EmailFeedback, &candidate).unwrap();
        for (key, value) in candidate.as_object().unwrap() {
            assert_eq!(&normalized[key], value, "field {key} changed");
        }
    }

    #[test]
    fn test_validate_named_fills_defaults() {
        let normalized =
            validate_named(ShapeName::AccountSetting, &json!({ "accountId": "acct-1" })).unwrap();
        assert_eq!(normalized["tier"], json!("notApproved"));
        assert_eq!(normalized["twitterSearches"], json!([]));
        assert_eq!(
            normalized["integrations"]["zenDesk"]["status"],
            json!("disconnected")
        );
        assert_eq!(
            normalized["integrations"]["zenDesk"]["ticketImport"],
            json!({ "inProgress": false, "nextPage": 0 })
        );
        let id = normalized["id"].as_str().unwrap();
        let id = uuid::Uuid::parse_str(id).unwrap();
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn test_validate_named_year_month_bucket() {
        let normalized =
            validate_named(ShapeName::YearMonthBucket, &json!("2024-03")).unwrap();
        assert_eq!(normalized, json!("2024-03"));
        assert!(validate_named(ShapeName::YearMonthBucket, &json!("2024-3")).is_err());
        assert!(validate_named(ShapeName::YearMonthBucket, &json!(202403)).is_err());
    }

    #[test]
    fn test_validate_named_user_reports_union_error() {
        let err = validate_named(ShapeName::User, &json!({ "handle": "kim" })).unwrap_err();
        assert!(matches!(err, ValidationError::NoVariantMatched { .. }));
    }

    #[test]
    fn test_shape_names_round_trip_from_str() {
        for shape in ShapeName::ALL {
            let parsed: ShapeName = shape.as_str().parse().unwrap();
            assert_eq!(parsed, *shape);
        }
        assert!(matches!(
            "FaxFeedback".parse::<ShapeName>(),
            Err(ValidationError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_open_shape_passes_unknown_fields_into_normalized_value() {
        let normalized = validate_named(
            ShapeName::Sentiment,
            &json!({ "magnitude": 1.0, "score": 0.5, "vendor": "nl-api" }),
        )
        .unwrap();
        assert_eq!(normalized["vendor"], json!("nl-api"));
    }

    #[test]
    fn test_closed_shape_rejects_unknown_field_with_path() {
        let err = validate_named(
            ShapeName::ModelSavedFields,
            &json!({ "accountId": "acct-1", "color": "red" }),
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("color"));
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_missing_required_field_names_it() {
        let err = validate_named(
            ShapeName::Sentiment,
            &json!({ "score": 0.5 }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("magnitude"));
    }

    #[test]
    fn test_non_object_candidate_fails_structurally() {
        assert!(validate_named(ShapeName::Sentiment, &json!(42)).is_err());
        assert!(validate_named(ShapeName::EmailFeedback, &json!("nope")).is_err());
    }
}
