//! Validation error type for caller-supplied issuance requests.

/// A failed validation of an [`IssuanceRequest`](crate::IssuanceRequest).
///
/// Carries every violated constraint, not just the first one encountered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", violations.join("; "))]
pub struct ValidationError {
    /// Human-readable description of each violated constraint.
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Create a validation error from the collected violations.
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}
