//! # Department Repository
//!
//! Database operations for the `department` table.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use sellers_core::validation::validate_department;
use sellers_core::Department;

/// Raw `department` row.
#[derive(Debug, sqlx::FromRow)]
struct DepartmentRecord {
    #[sqlx(rename = "Id")]
    id: i64,
    #[sqlx(rename = "Name")]
    name: String,
}

impl From<DepartmentRecord> for Department {
    fn from(record: DepartmentRecord) -> Self {
        Department::with_id(record.id, record.name)
    }
}

/// Repository for department database operations.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: SqlitePool,
}

impl DepartmentRepository {
    /// Creates a new DepartmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DepartmentRepository { pool }
    }

    /// Inserts a department and assigns the generated id to it.
    ///
    /// The name is trimmed on `department` before validation.
    pub async fn insert(&self, department: &mut Department) -> DbResult<()> {
        department.trim();
        validate_department(department)?;

        debug!(name = %department.name, "Inserting department");

        let result = sqlx::query("INSERT INTO department (Name) VALUES (?1)")
            .bind(&department.name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::no_rows_affected("insert department"));
        }

        department.id = Some(result.last_insert_rowid());
        Ok(())
    }

    /// Renames an existing department. The name is stored trimmed.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No department with that id
    pub async fn update(&self, department: &Department) -> DbResult<()> {
        validate_department(department)?;
        let id = department.require_id()?;

        debug!(id, name = %department.name, "Updating department");

        let result = sqlx::query("UPDATE department SET Name = ?2 WHERE Id = ?1")
            .bind(id)
            .bind(department.name.trim())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Department", id));
        }

        Ok(())
    }

    /// Deletes a department.
    ///
    /// Fails with [`DbError::ForeignKeyViolation`] while sellers still
    /// reference it.
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting department");

        let result = sqlx::query("DELETE FROM department WHERE Id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Department", id));
        }

        Ok(())
    }

    /// Gets a department by its id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Department>> {
        let record = sqlx::query_as::<_, DepartmentRecord>(
            "SELECT Id, Name FROM department WHERE Id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Department::from))
    }

    /// Lists all departments ordered by name.
    pub async fn find_all(&self) -> DbResult<Vec<Department>> {
        let records = sqlx::query_as::<_, DepartmentRecord>(
            "SELECT Id, Name FROM department ORDER BY Name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Department::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
