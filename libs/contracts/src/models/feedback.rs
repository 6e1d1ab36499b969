use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::checks::{self, Validate};
use crate::errors::ValidationError;
use crate::models::analysis::FeedbackAnalysis;
use crate::models::common::ModelSavedFields;
use crate::models::user::{TwitterUser, ZenDeskUser};

/// Channel a piece of feedback arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackType {
    Email,
    Twitter,
    ZenDesk,
}

/// Body of the email-feedback POST endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFeedbackPostBody {
    pub content: String,
    pub email_sent_date: DateTime<Utc>,
    pub from: String,
    pub subject: String,
    pub to: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for EmailFeedbackPostBody {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("content", &self.content)?;
        checks::email("from", &self.from)?;
        checks::non_empty("subject", &self.subject)?;
        checks::email("to", &self.to)
    }
}

/// One persisted email feedback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFeedback {
    #[serde(flatten)]
    pub saved: ModelSavedFields,
    pub content: String,
    pub email_sent_date: DateTime<Utc>,
    pub from: String,
    pub subject: String,
    pub to: String,
}

impl Validate for EmailFeedback {
    fn check(&self) -> Result<(), ValidationError> {
        self.saved.check()?;
        checks::non_empty("content", &self.content)?;
        checks::email("from", &self.from)?;
        checks::non_empty("subject", &self.subject)?;
        checks::email("to", &self.to)
    }
}

/// One persisted tweet picked up by an account's search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterFeedback {
    #[serde(flatten)]
    pub saved: ModelSavedFields,
    pub status_id: String,
    pub user: TwitterUser,
}

impl Validate for TwitterFeedback {
    fn check(&self) -> Result<(), ValidationError> {
        self.saved.check()?;
        checks::non_empty("statusId", &self.status_id)?;
        checks::nested("user", &self.user)
    }
}

/// One persisted ZenDesk ticket pulled through an account's integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZenDeskTicket {
    #[serde(flatten)]
    pub saved: ModelSavedFields,
    pub ticket_id: u64,
    pub user: ZenDeskUser,
}

impl Validate for ZenDeskTicket {
    fn check(&self) -> Result<(), ValidationError> {
        self.saved.check()?;
        checks::nested("user", &self.user)
    }
}

/// Email feedback plus its analysis, when one has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailFeedbackWithMaybeAnalysis {
    #[serde(flatten)]
    pub feedback: EmailFeedback,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<FeedbackAnalysis>,
}

impl Validate for EmailFeedbackWithMaybeAnalysis {
    fn check(&self) -> Result<(), ValidationError> {
        self.feedback.check()?;
        if let Some(analysis) = &self.analysis {
            checks::nested("analysis", analysis)?;
        }
        Ok(())
    }
}

/// Twitter feedback plus its analysis, when one has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterFeedbackWithMaybeAnalysis {
    #[serde(flatten)]
    pub feedback: TwitterFeedback,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<FeedbackAnalysis>,
}

impl Validate for TwitterFeedbackWithMaybeAnalysis {
    fn check(&self) -> Result<(), ValidationError> {
        self.feedback.check()?;
        if let Some(analysis) = &self.analysis {
            checks::nested("analysis", analysis)?;
        }
        Ok(())
    }
}

/// ZenDesk ticket plus its analysis, when one has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZenDeskTicketWithMaybeAnalysis {
    #[serde(flatten)]
    pub ticket: ZenDeskTicket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<FeedbackAnalysis>,
}

impl Validate for ZenDeskTicketWithMaybeAnalysis {
    fn check(&self) -> Result<(), ValidationError> {
        self.ticket.check()?;
        if let Some(analysis) = &self.analysis {
            checks::nested("analysis", analysis)?;
        }
        Ok(())
    }
}
