use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::checks::{self, Validate};
use crate::errors::ValidationError;

/// Author of one piece of feedback.
///
/// The wire format carries no discriminant: a candidate is matched against
/// the variant shapes in declared order (email, twitter, zenDesk) and the
/// first structural match wins. The variant shapes reject unlisted fields,
/// which is what keeps the ordered match unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum User {
    Email(EmailUser),
    Twitter(TwitterUser),
    ZenDesk(ZenDeskUser),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailUser {
    /// The author's email address doubles as the identifier.
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TwitterUser {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZenDeskUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Ordered structural match over the three variant shapes. When nothing
    /// matches, the error keeps each variant's own failure reason.
    pub fn from_value(candidate: &Value) -> Result<Self, ValidationError> {
        let mut reasons = Vec::new();
        match serde_json::from_value::<EmailUser>(candidate.clone()) {
            Ok(user) => return Ok(User::Email(user)),
            Err(e) => reasons.push(format!("email user: {e}")),
        }
        match serde_json::from_value::<TwitterUser>(candidate.clone()) {
            Ok(user) => return Ok(User::Twitter(user)),
            Err(e) => reasons.push(format!("twitter user: {e}")),
        }
        match serde_json::from_value::<ZenDeskUser>(candidate.clone()) {
            Ok(user) => return Ok(User::ZenDesk(user)),
            Err(e) => reasons.push(format!("zenDesk user: {e}")),
        }
        Err(ValidationError::NoVariantMatched { reasons })
    }
}

// Hand-written so the ordered match and its per-variant reasons behave the
// same whether a user arrives standalone or nested in another shape.
impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let candidate = Value::deserialize(deserializer)?;
        User::from_value(&candidate).map_err(serde::de::Error::custom)
    }
}

impl Validate for User {
    fn check(&self) -> Result<(), ValidationError> {
        match self {
            User::Email(user) => user.check(),
            User::Twitter(user) => user.check(),
            User::ZenDesk(user) => user.check(),
        }
    }
}

impl Validate for EmailUser {
    fn check(&self) -> Result<(), ValidationError> {
        checks::email("id", &self.id)
    }
}

impl Validate for TwitterUser {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("id", &self.id)?;
        checks::non_empty("username", &self.username)?;
        checks::absolute_uri("avatarUrl", &self.avatar_url)
    }
}

impl Validate for ZenDeskUser {
    fn check(&self) -> Result<(), ValidationError> {
        checks::non_empty("name", &self.name)?;
        checks::email("email", &self.email)
    }
}
