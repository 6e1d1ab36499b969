use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::checks::{self, Validate};
use crate::errors::ValidationError;
use crate::models::common::ModelSavedFields;
use crate::models::watson::WatsonClassifier;
use crate::year_month::YearMonthBucket;

/// Billing tier an account sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AccountTier {
    #[default]
    NotApproved,
    Free,
}

/// Connection state of an external-system integration. The shape does not
/// police transitions between states, only membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationStatus {
    #[default]
    Disconnected,
    AwaitingApproval,
    Connected,
}

/// Connection state shared by every integration kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AccountIntegration {
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for AccountIntegration {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(token) = &self.token {
            checks::non_empty("token", token)?;
        }
        Ok(())
    }
}

/// Paging cursor for a background ticket import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TicketImport {
    #[serde(default)]
    pub in_progress: bool,
    #[serde(default)]
    pub next_page: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// ZenDesk connection state plus the knobs the importer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ZenDeskIntegration {
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub ticket_import: TicketImport,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for ZenDeskIntegration {
    fn check(&self) -> Result<(), ValidationError> {
        if let Some(token) = &self.token {
            checks::non_empty("token", token)?;
        }
        if let Some(threshold) = self.confidence_threshold {
            checks::within("confidenceThreshold", threshold, 0.0, 1.0)?;
        }
        if let Some(subdomain) = &self.subdomain {
            checks::non_empty("subdomain", subdomain)?;
        }
        Ok(())
    }
}

/// Per-integration connection state for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountIntegrations {
    #[serde(default)]
    pub zen_desk: ZenDeskIntegration,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of the account-settings POST endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettingPostBody {
    #[serde(default)]
    pub twitter_searches: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for AccountSettingPostBody {
    fn check(&self) -> Result<(), ValidationError> {
        checks::each_non_empty("twitterSearches", &self.twitter_searches)
    }
}

/// Per-account configuration and usage counters.
///
/// `twitterSearches` normalizes to an empty list rather than staying
/// absent, so persistence never has to tell the two apart. Usage counters
/// are keyed by validated [`YearMonthBucket`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSetting {
    #[serde(flatten)]
    pub saved: ModelSavedFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<Uuid>,
    #[serde(default)]
    pub tier: AccountTier,
    #[serde(default)]
    pub twitter_searches: Vec<String>,
    #[serde(default)]
    pub feedback_usage_by_date: BTreeMap<YearMonthBucket, u32>,
    #[serde(default)]
    pub integrations: AccountIntegrations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watson_classifier: Option<WatsonClassifier>,
}

impl Validate for AccountSetting {
    fn check(&self) -> Result<(), ValidationError> {
        self.saved.check()?;
        checks::each_non_empty("twitterSearches", &self.twitter_searches)?;
        checks::nested("integrations.zenDesk", &self.integrations.zen_desk)?;
        if let Some(classifier) = &self.watson_classifier {
            checks::nested("watsonClassifier", classifier)?;
        }
        Ok(())
    }
}
