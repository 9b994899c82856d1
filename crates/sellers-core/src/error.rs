//! # Error Types
//!
//! Domain-specific error types for sellers-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sellers-core errors (this file)                                       │
//! │  ├── CoreError        - Entity state errors (e.g. missing id)          │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  sellers-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Entity-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entity has no identifier yet, but the operation needs one.
    ///
    /// ## When This Occurs
    /// - Inserting a seller whose department was never saved
    /// - Updating a seller that was never inserted
    /// - Filtering by a department that has no id
    #[error("{entity} has no identifier (not persisted yet)")]
    NotPersisted { entity: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., email without '@', NaN salary).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
