//! The single failure type raised while fitting a record to a target type.
//!
//! Every failure anywhere in the recursive descent surfaces as a
//! [`TypeFittingError`]. Failures raised while converting or building a
//! member are wrapped in [`TypeFittingError::Within`] on the way out, so the
//! rendered message names the member path (`lanes: #2: time: cannot parse ...`).
//! Match failures already name their member and are not wrapped again.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeFittingError {
    /// No unconsumed column matched the member's naming pattern.
    #[error("no column matches member `{member}` (pattern `{pattern}`)")]
    MissingColumn { member: String, pattern: String },

    /// The member type's text parser rejected the raw value.
    #[error("cannot parse '{value}' as {target}: {reason}")]
    Unparseable {
        value: String,
        target: &'static str,
        reason: String,
    },

    /// A single raw value was offered to a type without a text form.
    #[error("{target} has no text form and cannot be read from '{value}'")]
    NotScalar { value: String, target: &'static str },

    /// A scalar type was offered zero or several columns.
    #[error("{target} is read from exactly one column, found {count}")]
    ExpectedScalar { target: &'static str, count: usize },

    /// A wildcard pattern was attached to a member that is not a collection.
    #[error("member `{member}` uses wildcard pattern `{pattern}` but {target} is not a collection")]
    NotACollection {
        member: String,
        pattern: String,
        target: &'static str,
    },

    #[error("{path}: {source}")]
    Within {
        path: String,
        #[source]
        source: Box<TypeFittingError>,
    },

    #[error("{0}")]
    Custom(String),
}

impl TypeFittingError {
    pub fn new(description: impl Into<String>) -> Self {
        TypeFittingError::Custom(description.into())
    }

    /// Wraps the error with one more path segment (a member name or `#index`).
    pub fn within(self, segment: impl Into<String>) -> Self {
        TypeFittingError::Within {
            path: segment.into(),
            source: Box::new(self),
        }
    }

    /// Member path from the outermost member down to the failing one.
    pub fn path(&self) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = self;
        while let TypeFittingError::Within { path, source } = current {
            segments.push(path.as_str());
            current = source;
        }
        segments
    }

    /// The innermost failure, without path context.
    pub fn root_cause(&self) -> &TypeFittingError {
        let mut current = self;
        while let TypeFittingError::Within { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn description(&self) -> String {
        self.root_cause().to_string()
    }
}
