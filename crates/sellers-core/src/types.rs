//! # Domain Types
//!
//! The two entities mapped from the `seller` and `department` tables.
//!
//! ## Relationship
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐            ┌─────────────────┐                     │
//! │  │     Seller      │  many → 1  │   Department    │                     │
//! │  │  ─────────────  │───────────►│  ─────────────  │                     │
//! │  │  id             │    Arc     │  id             │                     │
//! │  │  name, email    │            │  name           │                     │
//! │  │  birth_date     │            └─────────────────┘                     │
//! │  │  base_salary    │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Sellers loaded by the same query share one Arc<Department> per id.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Identifiers are assigned by the database. An entity built in memory has
//! `id: None` until it is inserted.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Department
// =============================================================================

/// A department that sellers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// Database identifier (`None` until inserted).
    pub id: Option<i64>,

    /// Display name.
    pub name: String,
}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: impl Into<String>) -> Self {
        Department {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a department that already exists in the database.
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Department {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Returns true once the department has a database identifier.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the identifier or [`CoreError::NotPersisted`].
    pub fn require_id(&self) -> CoreResult<i64> {
        self.id.ok_or(CoreError::NotPersisted {
            entity: "Department",
        })
    }

    /// Strips surrounding whitespace from the name.
    pub fn trim(&mut self) {
        trim_in_place(&mut self.name);
    }
}

// =============================================================================
// Seller
// =============================================================================

/// A seller and the department they work in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Database identifier (`None` until inserted).
    pub id: Option<i64>,

    pub name: String,

    pub email: String,

    pub birth_date: NaiveDate,

    /// Monthly base salary.
    pub base_salary: f64,

    /// Shared, not owned: every seller from one result set that points at the
    /// same department id holds the same `Arc`.
    pub department: Arc<Department>,
}

impl Seller {
    /// Creates an unsaved seller.
    ///
    /// `department` accepts either an owned [`Department`] or an
    /// `Arc<Department>` already shared with other sellers.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: impl Into<Arc<Department>>,
    ) -> Self {
        Seller {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department: department.into(),
        }
    }

    /// Returns true once the seller has a database identifier.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the identifier or [`CoreError::NotPersisted`].
    pub fn require_id(&self) -> CoreResult<i64> {
        self.id.ok_or(CoreError::NotPersisted { entity: "Seller" })
    }

    /// Identifier of the referenced department, if it has one.
    #[inline]
    pub fn department_id(&self) -> Option<i64> {
        self.department.id
    }

    /// Strips surrounding whitespace from name and email.
    pub fn trim(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.email);
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
