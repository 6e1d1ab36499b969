use serde_json::Value;
use thiserror::Error;

/// The one error kind every validator in this crate produces.
///
/// Each variant carries the failing field path (dotted, with `[i]` for list
/// indices; `.` means the root value), the violated constraint, and the
/// offending value where one exists. Validation never retries and never
/// downgrades a failure to a default; the caller decides what to do with it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A closed shape received a top-level field outside its declared set.
    #[error("{path}: unknown field (shape is closed)")]
    UnknownField { path: String },

    /// The candidate does not match the shape structurally: a required field
    /// is missing, a field has the wrong type, or an enum value is outside
    /// its fixed set. The message comes from the deserializer.
    #[error("{path}: {message}")]
    Shape { path: String, message: String },

    /// A structurally valid field failed a declared constraint (numeric
    /// bound, string format, non-empty).
    #[error("{path}: {constraint} (got {actual})")]
    Constraint {
        path: String,
        constraint: String,
        actual: Value,
    },

    /// A user candidate matched none of the variant shapes. The reasons list
    /// holds one entry per variant, in the order they were tried.
    #[error("no user variant matched: {}", .reasons.join("; "))]
    NoVariantMatched { reasons: Vec<String> },

    /// The registry was asked for a shape name it does not carry.
    #[error("unknown shape: {0}")]
    UnknownShape(String),
}

impl ValidationError {
    pub(crate) fn constraint(
        path: &str,
        constraint: impl Into<String>,
        actual: impl Into<Value>,
    ) -> Self {
        ValidationError::Constraint {
            path: path.to_string(),
            constraint: constraint.into(),
            actual: actual.into(),
        }
    }

    /// Prefixes the error's field path with `prefix`, so nested shapes can
    /// report paths relative to the outermost candidate.
    #[must_use]
    pub fn at(self, prefix: &str) -> Self {
        match self {
            ValidationError::UnknownField { path } => ValidationError::UnknownField {
                path: join_path(prefix, &path),
            },
            ValidationError::Shape { path, message } => ValidationError::Shape {
                path: join_path(prefix, &path),
                message,
            },
            ValidationError::Constraint {
                path,
                constraint,
                actual,
            } => ValidationError::Constraint {
                path: join_path(prefix, &path),
                constraint,
                actual,
            },
            other => other,
        }
    }

    /// The failing field path, for errors that carry one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::UnknownField { path }
            | ValidationError::Shape { path, .. }
            | ValidationError::Constraint { path, .. } => Some(path),
            _ => None,
        }
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    if path == "." || path.is_empty() {
        prefix.to_string()
    } else if path.starts_with('[') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}.{path}")
    }
}
