use std::fmt;

/// Failures surfaced by dataset construction, the join strategies and the
/// correctness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The scale argument was not a non-negative integer.
    InvalidScale { input: String, reason: String },
    /// A strategy produced a different number of rows than the dataset scale.
    SizeMismatch { expected: usize, actual: usize },
    /// A strict lookup found no preference for the customer.
    KeyNotFound { customer_id: i64 },
    /// Two preferences share a customer id while building a mapping.
    DuplicateKey { customer_id: i64 },
    /// A single-match scan found more than one preference for the customer.
    AmbiguousMatch { customer_id: i64, matches: usize },
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::InvalidScale { input, reason } => {
                write!(f, "invalid scale '{}': {}", input, reason)
            }
            JoinError::SizeMismatch { expected, actual } => {
                write!(f, "list doesn't have the right size: expected {}, got {}", expected, actual)
            }
            JoinError::KeyNotFound { customer_id } => {
                write!(f, "no preference found for customer {}", customer_id)
            }
            JoinError::DuplicateKey { customer_id } => {
                write!(f, "duplicate preference key for customer {}", customer_id)
            }
            JoinError::AmbiguousMatch { customer_id, matches } => {
                write!(f, "customer {} matched {} preferences, expected at most one", customer_id, matches)
            }
        }
    }
}

impl std::error::Error for JoinError {}

pub type JoinResult<T> = Result<T, JoinError>;
