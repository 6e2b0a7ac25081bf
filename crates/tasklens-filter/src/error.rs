//! Error types for filter compilation and evaluation.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while compiling or evaluating a filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// An argument fragment had invalid syntax for its category.
    #[error("malformed argument \"{input}\": {reason}")]
    MalformedFragment {
        /// The raw argument text.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An attribute modifier is recognized but has no defined semantics yet.
    #[error("attribute modifier '{modifier}' is not yet supported")]
    UnsupportedModifier {
        /// The modifier name.
        modifier: String,
    },

    /// Parentheses in the expression do not balance.
    #[error("mismatched parentheses in filter expression")]
    MismatchedParentheses,

    /// The compiled predicate was structurally invalid at evaluation time.
    ///
    /// This always indicates a compiler defect, never bad user input.
    #[error("malformed filter predicate: {reason}")]
    MalformedPredicate {
        /// What the evaluator stumbled over.
        reason: String,
    },
}

impl FilterError {
    /// Creates a malformed fragment error.
    pub fn malformed_fragment(input: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::MalformedFragment {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported modifier error.
    pub fn unsupported_modifier(modifier: impl Into<String>) -> Self {
        FilterError::UnsupportedModifier {
            modifier: modifier.into(),
        }
    }

    /// Creates a malformed predicate error.
    pub fn malformed_predicate(reason: impl Into<String>) -> Self {
        FilterError::MalformedPredicate {
            reason: reason.into(),
        }
    }
}
