//! PostgreSQL employee repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use companyhub_core::error::{AppError, ErrorKind};
use companyhub_core::result::AppResult;
use companyhub_core::types::{PagedList, SortField};
use companyhub_entity::Employee;

use super::{EmployeeQuery, EmployeeRepository, sanitize_order};

/// Employee repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn get_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> AppResult<PagedList<Employee>> {
        const FILTER: &str = "company_id = $1 AND age >= $2 AND age <= $3 \
                              AND ($4::TEXT IS NULL OR name ILIKE $4)";

        let pattern = query.search().map(|term| like_pattern(&term));
        let min_age = i64::from(query.min_age);
        let max_age = i64::from(query.max_age);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM employees WHERE {FILTER}"))
            .bind(company_id)
            .bind(min_age)
            .bind(max_age)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count employees", e))?;

        let order = SortField::to_sql(&sanitize_order(&query.order_by, Employee::SORTABLE_FIELDS));
        let sql = format!(
            "SELECT * FROM employees WHERE {FILTER} ORDER BY {order}, id LIMIT $5 OFFSET $6"
        );

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(company_id)
            .bind(min_age)
            .bind(max_age)
            .bind(&pattern)
            .bind(query.page.limit() as i64)
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list employees", e))?;

        Ok(PagedList::new(employees, total as u64, query.page))
    }

    async fn get_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
    ) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find employee", e))
    }

    async fn create_employee_for_company(
        &self,
        company_id: Uuid,
        employee: &Employee,
    ) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, name, age, position, company_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.position)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!(
                    "Company with id: {company_id} doesn't exist in the database."
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create employee", e),
        })
    }

    async fn update_employee(&self, employee: &Employee) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE employees SET name = $3, age = $4, position = $5 \
             WHERE id = $1 AND company_id = $2",
        )
        .bind(employee.id)
        .bind(employee.company_id)
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.position)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update employee", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Employee with id: {} doesn't exist in the database.",
                employee.id
            )));
        }
        Ok(())
    }

    async fn delete_employee(&self, employee: &Employee) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1 AND company_id = $2")
            .bind(employee.id)
            .bind(employee.company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete employee", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Employee with id: {} doesn't exist in the database.",
                employee.id
            )));
        }
        Ok(())
    }
}
