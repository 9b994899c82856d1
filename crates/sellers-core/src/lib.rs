//! # sellers-core: Entity Types for the Sellers Workspace
//!
//! This crate defines the two entities persisted by `sellers-db` and the
//! rules they must satisfy before they reach the database. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sellers Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ sellers-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐   │   │
//! │  │   │     types      │  │   validation   │  │     error      │   │   │
//! │  │   │  Seller        │  │  name / email  │  │  CoreError     │   │   │
//! │  │   │  Department    │  │  salary rules  │  │  Validation..  │   │   │
//! │  │   └────────────────┘  └────────────────┘  └────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   sellers-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Seller` and `Department`
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules checked before insert/update
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sellers_core::{Department, Seller};
//!
//! let books = Department::with_id(3, "Books");
//! let seller = Seller::new(
//!     "Greg",
//!     "greg@gmail.com",
//!     NaiveDate::from_ymd_opt(1990, 5, 12).unwrap(),
//!     4000.0,
//!     books,
//! );
//!
//! assert_eq!(seller.department_id(), Some(3));
//! assert!(!seller.is_persisted());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a seller name (matches the `seller.Name` column width).
pub const MAX_SELLER_NAME_LEN: usize = 60;

/// Maximum length of a seller email address.
pub const MAX_EMAIL_LEN: usize = 100;

/// Maximum length of a department name.
pub const MAX_DEPARTMENT_NAME_LEN: usize = 60;
