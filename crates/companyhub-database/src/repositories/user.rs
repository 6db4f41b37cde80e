//! PostgreSQL user and role repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use companyhub_core::error::{AppError, ErrorKind};
use companyhub_core::result::AppResult;
use companyhub_entity::user::CreateUser;
use companyhub_entity::{Role, User};

use super::UserRepository;

/// User repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Parse stored role names, skipping any the application does not know.
fn parse_roles(names: Vec<String>) -> Vec<Role> {
    names
        .into_iter()
        .filter_map(|name| match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(role = %name, "Ignoring unknown role stored in database");
                None
            }
        })
        .collect()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(user_name) = LOWER($1)")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by name", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn create_user(&self, data: &CreateUser, roles: &[Role]) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let user = User::from_create(data.clone());
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users \
             (id, first_name, last_name, user_name, email, phone_number, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_user_name_key") =>
            {
                AppError::conflict(format!("Username '{}' is already taken.", data.user_name))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email is already taken.")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        for role in roles {
            let result = sqlx::query(
                "INSERT INTO user_roles (user_id, role_id) \
                 SELECT $1, id FROM roles WHERE normalized_name = $2 \
                 ON CONFLICT DO NOTHING",
            )
            .bind(user.id)
            .bind(role.as_str().to_uppercase())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign role", e))?;

            if result.rows_affected() == 0 {
                return Err(AppError::validation(format!("Role {role} does not exist.")));
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(user)
    }

    async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT r.name FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user roles", e))?;

        Ok(parse_roles(names))
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))?;

        Ok(parse_roles(names))
    }
}
