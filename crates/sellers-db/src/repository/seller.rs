//! # Seller Repository
//!
//! Database operations for sellers, always read together with their
//! department.
//!
//! ## Row Hydration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              SELECT seller.*, department.Name AS DepName               │
//! │                                                                         │
//! │  Id │ Name   │ ... │ DepartmentId │ DepName                            │
//! │  ───┼────────┼─────┼──────────────┼──────────                          │
//! │  4  │ Alex   │ ... │ 2            │ Electronics ──┐                    │
//! │  7  │ Bob    │ ... │ 2            │ Electronics ──┼─► one Arc<Department>
//! │  1  │ Martha │ ... │ 1            │ Computers  ───┼─► one Arc<Department>
//! │                                                   │                     │
//! │  DepartmentCache (one per query call):            │                     │
//! │    DepartmentId → Arc<Department>  ◄──────────────┘                    │
//! │                                                                         │
//! │  seller_from_row(row, department) builds each Seller.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache lives only for the duration of one `find_*` call. Two calls never
//! share department objects.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use sellers_core::validation::validate_seller;
use sellers_core::{Department, Seller};

/// Repository for seller database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sellers();
///
/// let mut seller = Seller::new("Greg", "greg@gmail.com", birth_date, 4000.0, books);
/// repo.insert(&mut seller).await?;   // seller.id is now Some(..)
///
/// let same = repo.find_by_id(seller.id.unwrap()).await?;
/// let in_books = repo.find_by_department(&books).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    /// Creates a new SellerRepository.
    ///
    /// The pool is shared; the repository never closes it.
    pub fn new(pool: SqlitePool) -> Self {
        SellerRepository { pool }
    }

    /// Inserts a seller and back-fills its generated id.
    ///
    /// Name and email are trimmed on `seller` before validation, so the
    /// entity matches the stored row.
    ///
    /// ## Requirements
    /// - `seller.department` must have an id
    /// - Name, email and base salary must pass validation
    ///
    /// ## Returns
    /// * `Ok(())` - `seller.id` is now `Some(generated_id)`
    /// * `Err(DbError::Domain)` - validation failed or the department is unsaved
    /// * `Err(DbError::ForeignKeyViolation)` - department id doesn't exist
    /// * `Err(DbError::NoRowsAffected)` - the statement inserted nothing
    pub async fn insert(&self, seller: &mut Seller) -> DbResult<()> {
        seller.trim();
        validate_seller(seller)?;
        let department_id = seller.department.require_id()?;

        debug!(name = %seller.name, department_id, "Inserting seller");

        let result = sqlx::query(
            r#"
            INSERT INTO seller
                (Name, Email, BirthDate, BaseSalary, DepartmentId)
            VALUES
                (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(seller.birth_date)
        .bind(seller.base_salary)
        .bind(department_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::no_rows_affected("insert seller"));
        }

        let id = result.last_insert_rowid();
        seller.id = Some(id);

        debug!(id, "Seller inserted");
        Ok(())
    }

    /// Updates every column of an existing seller.
    ///
    /// Name and email are stored trimmed.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no seller with that id
    /// * `Err(DbError::Domain)` - seller or department not persisted, or invalid fields
    pub async fn update(&self, seller: &Seller) -> DbResult<()> {
        validate_seller(seller)?;
        let id = seller.require_id()?;
        let department_id = seller.department.require_id()?;

        debug!(id, department_id, "Updating seller");

        let result = sqlx::query(
            r#"
            UPDATE seller SET
                Name = ?2,
                Email = ?3,
                BirthDate = ?4,
                BaseSalary = ?5,
                DepartmentId = ?6
            WHERE Id = ?1
            "#,
        )
        .bind(id)
        .bind(seller.name.trim())
        .bind(seller.email.trim())
        .bind(seller.birth_date)
        .bind(seller.base_salary)
        .bind(department_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Seller", id));
        }

        Ok(())
    }

    /// Deletes a seller by id.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no seller with that id
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting seller");

        let result = sqlx::query("DELETE FROM seller WHERE Id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Seller", id));
        }

        Ok(())
    }

    /// Gets a seller (with department) by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Seller))` - Seller found
    /// * `Ok(None)` - No such id; this is not an error
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Seller>> {
        let row = sqlx::query(
            r#"
            SELECT seller.*, department.Name AS DepName
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            WHERE seller.Id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let department = Arc::new(department_from_row(&row)?);
        Ok(Some(seller_from_row(&row, department)?))
    }

    /// Lists all sellers ordered by name.
    ///
    /// Sellers in the same department share one `Arc<Department>`.
    pub async fn find_all(&self) -> DbResult<Vec<Seller>> {
        let rows = sqlx::query(
            r#"
            SELECT seller.*, department.Name AS DepName
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            ORDER BY seller.Name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let sellers = hydrate(&rows)?;
        debug!(count = sellers.len(), "Loaded all sellers");
        Ok(sellers)
    }

    /// Lists the sellers of one department, ordered by name.
    ///
    /// `department` must have an id; its name is not consulted (the name in
    /// the results comes from the database).
    pub async fn find_by_department(&self, department: &Department) -> DbResult<Vec<Seller>> {
        let department_id = department.require_id()?;

        let rows = sqlx::query(
            r#"
            SELECT seller.*, department.Name AS DepName
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            WHERE seller.DepartmentId = ?1
            ORDER BY seller.Name
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        let sellers = hydrate(&rows)?;
        debug!(department_id, count = sellers.len(), "Loaded sellers by department");
        Ok(sellers)
    }

    /// Counts sellers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Per-query map from department id to the single `Arc<Department>` handed
/// to every seller of that department.
#[derive(Debug, Default)]
pub struct DepartmentCache {
    by_id: HashMap<i64, Arc<Department>>,
}

impl DepartmentCache {
    /// Returns the department of `row`, building it on first sight of its id.
    pub fn resolve(&mut self, row: &SqliteRow) -> Result<Arc<Department>, sqlx::Error> {
        let id: i64 = row.try_get("DepartmentId")?;

        let department = match self.by_id.entry(id) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(department_from_row(row)?))),
        };

        Ok(department)
    }

    /// Number of distinct departments seen so far.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Builds a seller list from joined rows, sharing departments by id.
fn hydrate(rows: &[SqliteRow]) -> DbResult<Vec<Seller>> {
    let mut departments = DepartmentCache::default();

    let sellers = rows
        .iter()
        .map(|row| {
            let department = departments.resolve(row)?;
            seller_from_row(row, department)
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(sellers)
}

/// Reads the department columns (`DepartmentId`, `DepName`) of a joined row.
pub fn department_from_row(row: &SqliteRow) -> Result<Department, sqlx::Error> {
    Ok(Department::with_id(
        row.try_get("DepartmentId")?,
        row.try_get::<String, _>("DepName")?,
    ))
}

/// Reads the seller columns of a joined row and attaches `department`.
///
/// Pure: no I/O, no lookups. The caller is responsible for passing the
/// department matching the row's `DepartmentId`.
pub fn seller_from_row(row: &SqliteRow, department: Arc<Department>) -> Result<Seller, sqlx::Error> {
    Ok(Seller {
        id: Some(row.try_get("Id")?),
        name: row.try_get("Name")?,
        email: row.try_get("Email")?,
        birth_date: row.try_get("BirthDate")?,
        base_salary: row.try_get("BaseSalary")?,
        department,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use sellers_core::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Database with two departments; returns (db, computers, electronics).
    async fn seeded_db() -> (Database, Department, Department) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut computers = Department::new("Computers");
        let mut electronics = Department::new("Electronics");
        db.departments().insert(&mut computers).await.unwrap();
        db.departments().insert(&mut electronics).await.unwrap();

        (db, computers, electronics)
    }

    async fn insert_seller(
        db: &Database,
        name: &str,
        salary: f64,
        department: &Department,
    ) -> Seller {
        let email = format!("{}@gmail.com", name.to_lowercase());
        let mut seller = Seller::new(name, email, date(1990, 6, 15), salary, department.clone());
        db.sellers().insert(&mut seller).await.unwrap();
        seller
    }

    #[tokio::test]
    async fn test_insert_assigns_generated_id() {
        let (db, computers, _) = seeded_db().await;

        let first = insert_seller(&db, "Greg", 4000.0, &computers).await;
        let second = insert_seller(&db, "Alex", 3000.0, &computers).await;

        let first_id = first.id.unwrap();
        let second_id = second.id.unwrap();
        assert!(first_id > 0);
        assert_ne!(first_id, second_id);
        assert_eq!(db.sellers().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_round_trips_columns() {
        let (db, _, electronics) = seeded_db().await;

        let mut seller = Seller::new(
            "Martha Red",
            "martha@gmail.com",
            date(1983, 2, 28),
            3250.75,
            electronics.clone(),
        );
        db.sellers().insert(&mut seller).await.unwrap();

        let loaded = db
            .sellers()
            .find_by_id(seller.id.unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, seller);
        assert_eq!(loaded.birth_date, date(1983, 2, 28));
        assert_eq!(*loaded.department, electronics);
    }

    #[tokio::test]
    async fn test_insert_requires_department_id() {
        let (db, _, _) = seeded_db().await;

        let mut seller = Seller::new(
            "Nobody",
            "nobody@gmail.com",
            date(2000, 1, 1),
            1000.0,
            Department::new("Unsaved"),
        );
        let err = db.sellers().insert(&mut seller).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::NotPersisted {
                entity: "Department"
            })
        ));
        assert_eq!(seller.id, None);
        assert_eq!(db.sellers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_fields() {
        let (db, computers, _) = seeded_db().await;

        let mut seller = Seller::new("Ana", "ana-at-gmail", date(1995, 3, 3), 1500.0, computers);
        let err = db.sellers().insert(&mut seller).await.unwrap_err();

        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
        assert_eq!(seller.id, None);
    }

    #[tokio::test]
    async fn test_insert_with_unknown_department_is_foreign_key_error() {
        let (db, _, _) = seeded_db().await;

        let mut seller = Seller::new(
            "Lost",
            "lost@gmail.com",
            date(1970, 12, 1),
            900.0,
            Department::with_id(424_242, "Nowhere"),
        );
        let err = db.sellers().insert(&mut seller).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(seller.id, None);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let (db, _, _) = seeded_db().await;

        let found = db.sellers().find_by_id(12_345).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_orders_by_name_and_shares_departments() {
        let (db, computers, electronics) = seeded_db().await;

        insert_seller(&db, "Martha", 3000.0, &computers).await;
        insert_seller(&db, "Bob", 2000.0, &electronics).await;
        insert_seller(&db, "Alex", 2500.0, &electronics).await;
        insert_seller(&db, "Donald", 4100.0, &computers).await;

        let sellers = db.sellers().find_all().await.unwrap();

        let names: Vec<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alex", "Bob", "Donald", "Martha"]);

        // Alex/Bob are Electronics, Donald/Martha are Computers.
        assert!(Arc::ptr_eq(&sellers[0].department, &sellers[1].department));
        assert!(Arc::ptr_eq(&sellers[2].department, &sellers[3].department));
        assert!(!Arc::ptr_eq(&sellers[0].department, &sellers[2].department));

        for seller in &sellers {
            assert!(seller.department.id.is_some());
        }
        assert_eq!(sellers[0].department.name, "Electronics");
        assert_eq!(sellers[3].department.name, "Computers");
    }

    #[tokio::test]
    async fn test_departments_are_not_shared_across_calls() {
        let (db, computers, _) = seeded_db().await;
        insert_seller(&db, "Martha", 3000.0, &computers).await;

        let first = db.sellers().find_all().await.unwrap();
        let second = db.sellers().find_all().await.unwrap();

        assert_eq!(first[0].department, second[0].department);
        assert!(!Arc::ptr_eq(&first[0].department, &second[0].department));
    }

    #[tokio::test]
    async fn test_find_by_department_filters() {
        let (db, computers, electronics) = seeded_db().await;

        insert_seller(&db, "Martha", 3000.0, &computers).await;
        insert_seller(&db, "Bob", 2000.0, &electronics).await;
        insert_seller(&db, "Alex", 2500.0, &computers).await;

        let sellers = db.sellers().find_by_department(&computers).await.unwrap();

        let names: Vec<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Alex", "Martha"]);
        assert!(sellers
            .iter()
            .all(|s| s.department_id() == computers.id));
        assert!(Arc::ptr_eq(&sellers[0].department, &sellers[1].department));
    }

    #[tokio::test]
    async fn test_find_by_department_uses_stored_name() {
        let (db, computers, _) = seeded_db().await;
        insert_seller(&db, "Martha", 3000.0, &computers).await;

        // Only the id of the filter matters.
        let filter = Department::with_id(computers.id.unwrap(), "stale name");
        let sellers = db.sellers().find_by_department(&filter).await.unwrap();

        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0].department.name, "Computers");
    }

    #[tokio::test]
    async fn test_find_by_department_empty_and_unsaved() {
        let (db, computers, electronics) = seeded_db().await;
        insert_seller(&db, "Martha", 3000.0, &computers).await;

        assert!(db
            .sellers()
            .find_by_department(&electronics)
            .await
            .unwrap()
            .is_empty());

        let err = db
            .sellers()
            .find_by_department(&Department::new("Unsaved"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::NotPersisted { .. })));
    }

    #[tokio::test]
    async fn test_update_moves_seller_between_departments() {
        let (db, computers, electronics) = seeded_db().await;
        let mut seller = insert_seller(&db, "Bob", 2000.0, &computers).await;

        seller.name = "Bob Brown".to_string();
        seller.base_salary = 2600.0;
        seller.department = Arc::new(electronics.clone());
        db.sellers().update(&seller).await.unwrap();

        let loaded = db
            .sellers()
            .find_by_id(seller.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.name, "Bob Brown");
        assert_eq!(loaded.base_salary, 2600.0);
        assert_eq!(loaded.department_id(), electronics.id);
        assert!(db
            .sellers()
            .find_by_department(&computers)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_seller() {
        let (db, computers, _) = seeded_db().await;

        let mut ghost = Seller::new("Ghost", "ghost@gmail.com", date(1999, 9, 9), 10.0, computers);
        assert!(matches!(
            db.sellers().update(&ghost).await.unwrap_err(),
            DbError::Domain(CoreError::NotPersisted { entity: "Seller" })
        ));

        ghost.id = Some(777);
        assert!(db.sellers().update(&ghost).await.unwrap_err().is_not_found());
        assert!(db.sellers().delete_by_id(777).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let (db, computers, _) = seeded_db().await;
        let seller = insert_seller(&db, "Martha", 3000.0, &computers).await;
        let id = seller.id.unwrap();

        db.sellers().delete_by_id(id).await.unwrap();

        assert!(db.sellers().find_by_id(id).await.unwrap().is_none());
        assert_eq!(db.sellers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_department_cache_resolves_once_per_id() {
        let (db, computers, electronics) = seeded_db().await;
        insert_seller(&db, "Martha", 3000.0, &computers).await;
        insert_seller(&db, "Bob", 2000.0, &electronics).await;
        insert_seller(&db, "Alex", 2500.0, &computers).await;

        let rows = sqlx::query(
            r#"
            SELECT seller.*, department.Name AS DepName
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            ORDER BY seller.Name
            "#,
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let mut cache = DepartmentCache::default();
        assert!(cache.is_empty());

        let resolved: Vec<Arc<Department>> =
            rows.iter().map(|row| cache.resolve(row).unwrap()).collect();

        assert_eq!(cache.len(), 2);
        for (row, department) in rows.iter().zip(&resolved) {
            let id: i64 = row.get("DepartmentId");
            assert_eq!(department.id, Some(id));
        }

        // Alex (Computers), Bob (Electronics), Martha (Computers)
        assert!(Arc::ptr_eq(&resolved[0], &resolved[2]));
        assert!(!Arc::ptr_eq(&resolved[0], &resolved[1]));
    }

    #[tokio::test]
    async fn test_seller_from_row_attaches_given_department() {
        let (db, computers, _) = seeded_db().await;
        let seller = insert_seller(&db, "Martha", 3000.0, &computers).await;

        let row = sqlx::query(
            r#"
            SELECT seller.*, department.Name AS DepName
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            WHERE seller.Id = ?1
            "#,
        )
        .bind(seller.id.unwrap())
        .fetch_one(db.pool())
        .await
        .unwrap();

        let department = Arc::new(department_from_row(&row).unwrap());
        assert_eq!(*department, computers);

        let mapped = seller_from_row(&row, Arc::clone(&department)).unwrap();
        assert!(Arc::ptr_eq(&mapped.department, &department));
        assert_eq!(mapped, seller);
    }

    #[tokio::test]
    async fn test_insert_and_update_store_trimmed_text() {
        let (db, computers, _) = seeded_db().await;

        let mut seller = Seller::new(
            "  Ana  ",
            "  ana@gmail.com  ",
            date(1992, 5, 5),
            1800.0,
            computers,
        );
        db.sellers().insert(&mut seller).await.unwrap();
        assert_eq!(seller.name, "Ana");
        assert_eq!(seller.email, "ana@gmail.com");

        let id = seller.id.unwrap();
        let loaded = db.sellers().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Ana");
        assert_eq!(loaded.email, "ana@gmail.com");

        seller.name = " Ana Lima\t".to_string();
        seller.email = " ana.lima@gmail.com ".to_string();
        db.sellers().update(&seller).await.unwrap();

        let loaded = db.sellers().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Ana Lima");
        assert_eq!(loaded.email, "ana.lima@gmail.com");
    }

    #[tokio::test]
    async fn test_insert_checks_length_of_stored_name() {
        let (db, computers, _) = seeded_db().await;

        // 60 characters once trimmed: accepted.
        let padded = format!("  {}  ", "A".repeat(60));
        let mut seller = Seller::new(
            padded,
            "a@gmail.com",
            date(1990, 1, 1),
            100.0,
            computers.clone(),
        );
        db.sellers().insert(&mut seller).await.unwrap();

        let loaded = db
            .sellers()
            .find_by_id(seller.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.name.chars().count(), 60);

        let mut too_long = Seller::new(
            "B".repeat(61),
            "b@gmail.com",
            date(1990, 1, 1),
            100.0,
            computers,
        );
        let err = db.sellers().insert(&mut too_long).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
