//! PostgreSQL company repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use companyhub_core::error::{AppError, ErrorKind};
use companyhub_core::result::AppResult;
use companyhub_core::types::{PagedList, SortField};
use companyhub_entity::{Company, Employee};

use super::{CompanyQuery, CompanyRepository, sanitize_order};

/// Company repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_company(
        tx: &mut Transaction<'_, Postgres>,
        company: &Company,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO companies (id, name, address, country) VALUES ($1, $2, $3, $4)")
            .bind(company.id)
            .bind(&company.name)
            .bind(&company.address)
            .bind(&company.country)
            .execute(&mut **tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Company {} already exists", company.id))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create company", e),
            })?;
        Ok(())
    }

    async fn insert_employees(
        tx: &mut Transaction<'_, Postgres>,
        company_id: Uuid,
        employees: &[Employee],
    ) -> AppResult<()> {
        for employee in employees {
            sqlx::query(
                "INSERT INTO employees (id, name, age, position, company_id) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(employee.id)
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.position)
            .bind(company_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create employee", e))?;
        }
        Ok(())
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
    }

    async fn commit(tx: Transaction<'_, Postgres>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn get_all_companies(&self, query: &CompanyQuery) -> AppResult<PagedList<Company>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count companies", e))?;

        let order = SortField::to_sql(&sanitize_order(&query.order_by, Company::SORTABLE_FIELDS));
        let sql = format!("SELECT * FROM companies ORDER BY {order}, id LIMIT $1 OFFSET $2");

        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(query.page.limit() as i64)
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list companies", e))?;

        Ok(PagedList::new(companies, total as u64, query.page))
    }

    async fn get_company(&self, id: Uuid) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find company", e))
    }

    async fn get_companies_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ANY($1) ORDER BY name")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find companies by ids", e)
            })
    }

    async fn create_company(&self, company: &Company, employees: &[Employee]) -> AppResult<()> {
        let mut tx = self.begin().await?;
        Self::insert_company(&mut tx, company).await?;
        Self::insert_employees(&mut tx, company.id, employees).await?;
        Self::commit(tx).await
    }

    async fn create_companies(&self, companies: &[(Company, Vec<Employee>)]) -> AppResult<()> {
        let mut tx = self.begin().await?;
        for (company, employees) in companies {
            Self::insert_company(&mut tx, company).await?;
            Self::insert_employees(&mut tx, company.id, employees).await?;
        }
        Self::commit(tx).await
    }

    async fn update_company(
        &self,
        company: &Company,
        new_employees: &[Employee],
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;
        let result =
            sqlx::query("UPDATE companies SET name = $2, address = $3, country = $4 WHERE id = $1")
                .bind(company.id)
                .bind(&company.name)
                .bind(&company.address)
                .bind(&company.country)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update company", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Company with id: {} doesn't exist in the database.",
                company.id
            )));
        }
        Self::insert_employees(&mut tx, company.id, new_employees).await?;
        Self::commit(tx).await
    }

    async fn delete_company(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete company", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Company with id: {id} doesn't exist in the database."
            )));
        }
        Ok(())
    }
}
