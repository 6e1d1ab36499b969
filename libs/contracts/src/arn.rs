//! Canonical resource names and templated reference expressions, derived
//! from the deployment stage.
//!
//! The `Fn::Join` expressions are consumed verbatim by the provisioning
//! tooling: segment order and placeholder names are a downstream contract,
//! and nothing here resolves a placeholder. A `stage` string always
//! produces an output; there is no validation on it.

use serde::{Deserialize, Serialize};

/// Placeholder for the region the stack is deployed into.
pub const REGION_REF: &str = "AWS::Region";

/// Placeholder for the account the stack is deployed into.
pub const ACCOUNT_ID_REF: &str = "AWS::AccountId";

/// One segment of a join expression: a literal string, or a `{"Ref": ...}`
/// placeholder resolved later by the provisioning tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinPart {
    Literal(String),
    Reference {
        #[serde(rename = "Ref")]
        name: String,
    },
}

impl JoinPart {
    pub fn literal(text: impl Into<String>) -> Self {
        JoinPart::Literal(text.into())
    }

    pub fn reference(name: &str) -> Self {
        JoinPart::Reference {
            name: name.to_string(),
        }
    }
}

/// A `{"Fn::Join": [delimiter, [part, ...]]}` expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinExpression {
    #[serde(rename = "Fn::Join")]
    pub join: (String, Vec<JoinPart>),
}

impl JoinExpression {
    /// Joins `parts` with the empty delimiter, the only form used here.
    fn concat(parts: Vec<JoinPart>) -> Self {
        JoinExpression {
            join: (String::new(), parts),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.join.0
    }

    pub fn parts(&self) -> &[JoinPart] {
        &self.join.1
    }
}

pub fn analyze_feedback_topic_name(stage: &str) -> String {
    format!("analyze-feedback-{stage}")
}

pub fn table_name_prefix(stage: &str) -> String {
    format!("feedback-analysis-api-{stage}")
}

/// Wildcard ARN expression covering the stage's analyze-feedback topics.
pub fn analyze_feedback_topic_arn(stage: &str) -> JoinExpression {
    JoinExpression::concat(vec![
        JoinPart::literal("arn:aws:sns:"),
        JoinPart::reference(REGION_REF),
        JoinPart::literal(":"),
        JoinPart::reference(ACCOUNT_ID_REF),
        JoinPart::literal(format!(":{}*", analyze_feedback_topic_name(stage))),
    ])
}

/// Wildcard ARN expression covering every table under the stage's prefix.
pub fn feedback_tables_arn(stage: &str) -> JoinExpression {
    JoinExpression::concat(vec![
        JoinPart::literal("arn:aws:dynamodb:"),
        JoinPart::reference(REGION_REF),
        JoinPart::literal(":"),
        JoinPart::reference(ACCOUNT_ID_REF),
        JoinPart::literal(format!(":table/{}*", table_name_prefix(stage))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_topic_name() {
        assert_eq!(analyze_feedback_topic_name("prod"), "analyze-feedback-prod");
    }

    #[test]
    fn test_table_name_prefix() {
        assert_eq!(table_name_prefix("dev"), "feedback-analysis-api-dev");
    }

    #[test]
    fn test_topic_arn_serialized_shape() {
        let arn = analyze_feedback_topic_arn("prod");
        let value = serde_json::to_value(&arn).unwrap();
        assert_eq!(
            value,
            json!({
                "Fn::Join": [
                    "",
                    [
                        "arn:aws:sns:",
                        { "Ref": "AWS::Region" },
                        ":",
                        { "Ref": "AWS::AccountId" },
                        ":analyze-feedback-prod*",
                    ]
                ]
            })
        );
    }

    #[test]
    fn test_tables_arn_serialized_shape() {
        let arn = feedback_tables_arn("dev");
        let value = serde_json::to_value(&arn).unwrap();
        assert_eq!(
            value,
            json!({
                "Fn::Join": [
                    "",
                    [
                        "arn:aws:dynamodb:",
                        { "Ref": "AWS::Region" },
                        ":",
                        { "Ref": "AWS::AccountId" },
                        ":table/feedback-analysis-api-dev*",
                    ]
                ]
            })
        );
    }

    #[test]
    fn test_join_expression_round_trips() {
        let arn = analyze_feedback_topic_arn("staging");
        let value = serde_json::to_value(&arn).unwrap();
        let back: JoinExpression = serde_json::from_value(value).unwrap();
        assert_eq!(back, arn);
    }

    #[test]
    fn test_parts_accessors() {
        let arn = feedback_tables_arn("prod");
        assert_eq!(arn.delimiter(), "");
        assert_eq!(arn.parts().len(), 5);
        assert_eq!(arn.parts()[1], JoinPart::reference(REGION_REF));
    }

    #[test]
    fn test_empty_stage_still_formats() {
        assert_eq!(analyze_feedback_topic_name(""), "analyze-feedback-");
    }
}
