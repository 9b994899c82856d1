//! # Repository Module
//!
//! Hand-written SQL for the `seller` and `department` tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.sellers().find_by_department(&books)                       │
//! │       ▼                                                                 │
//! │  SellerRepository                                                      │
//! │  ├── insert(&self, &mut seller)   ← back-fills generated id            │
//! │  ├── update / delete_by_id                                             │
//! │  ├── find_by_id(&self, id)        ← Option<Seller>                     │
//! │  ├── find_all(&self)              ← ordered by name                    │
//! │  └── find_by_department(&self, d) ← ordered by name                    │
//! │       │                                                                 │
//! │       │  SQL (bind, execute, hydrate rows)                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SellerRepository`](seller::SellerRepository) - Seller CRUD and joined reads
//! - [`DepartmentRepository`](department::DepartmentRepository) - Department CRUD

pub mod department;
pub mod seller;
