//! # Validation Module
//!
//! Field rules checked by the repositories before any SQL is executed.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Required fields, lengths                                          │
//! │  └── Email shape, salary is a finite non-negative number               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key seller.DepartmentId → department.Id                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sellers_core::validation::{validate_email, validate_base_salary};
//!
//! assert!(validate_email("bob@gmail.com").is_ok());
//! assert!(validate_base_salary(-1.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Department, Seller};
use crate::{MAX_DEPARTMENT_NAME_LEN, MAX_EMAIL_LEN, MAX_SELLER_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a seller name.
///
/// ## Rules
/// - Must not be empty once trimmed
/// - At most [`MAX_SELLER_NAME_LEN`] characters once trimmed
pub fn validate_seller_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_SELLER_NAME_LEN)
}

/// Validates a department name.
pub fn validate_department_name(name: &str) -> ValidationResult<()> {
    validate_text("department name", name, MAX_DEPARTMENT_NAME_LEN)
}

/// Validates an email address.
///
/// Only the shape is checked: a non-empty local part, an `@`, and a
/// non-empty domain. Surrounding whitespace is ignored (the repositories
/// store the trimmed value); whitespace inside the address is rejected.
///
/// ## Example
/// ```rust
/// use sellers_core::validation::validate_email;
///
/// assert!(validate_email("alex@gmail.com").is_ok());
/// assert!(validate_email("alex").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_text("email", email, MAX_EMAIL_LEN)?;

    let email = email.trim();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base salary.
///
/// ## Rules
/// - Must be a finite number (no NaN / infinity)
/// - Must be non-negative; zero is allowed
pub fn validate_base_salary(salary: f64) -> ValidationResult<()> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "base salary".to_string(),
            reason: "must be a finite, non-negative amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every column-backed field of a seller.
///
/// The department reference is checked separately by the repository, since
/// a missing department id is an entity-state error rather than bad input.
pub fn validate_seller(seller: &Seller) -> ValidationResult<()> {
    validate_seller_name(&seller.name)?;
    validate_email(&seller.email)?;
    validate_base_salary(seller.base_salary)?;
    Ok(())
}

/// Validates a department before insert/update.
pub fn validate_department(department: &Department) -> ValidationResult<()> {
    validate_department_name(&department.name)
}

// =============================================================================
// Unit Tests
// =============================================================================
