//! Authentication service: user registration and login.

use std::sync::Arc;

use tracing::{info, warn};

use companyhub_auth::jwt::JwtEncoder;
use companyhub_auth::password::{PasswordHasher, PasswordValidator};
use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_database::UserRepository;
use companyhub_entity::user::CreateUser;
use companyhub_entity::{Role, User};

use crate::dto::{TokenDto, UserForAuthenticationDto, UserForRegistrationDto, validate_dto};

/// Registers users and issues access tokens.
#[derive(Debug, Clone)]
pub struct AuthenticationService {
    /// User repository.
    user_repo: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token signer.
    encoder: Arc<JwtEncoder>,
}

impl AuthenticationService {
    /// Creates a new authentication service.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
        }
    }

    /// Register a new user with the requested roles.
    ///
    /// Model errors and password policy violations are reported together.
    pub async fn register_user(&self, dto: UserForRegistrationDto) -> AppResult<User> {
        let mut details = serde_json::Map::new();
        if let Err(err) = validate_dto(&dto, "UserForRegistrationDto") {
            if let Some(serde_json::Value::Object(map)) = err.details {
                details.extend(map);
            }
        }
        if let Some(password) = dto.password.as_deref() {
            let violations = self.validator.violations(password);
            if !violations.is_empty() {
                details.insert("password".to_string(), serde_json::json!(violations));
            }
        }
        if !details.is_empty() {
            return Err(AppError::unprocessable("User registration failed")
                .with_details(serde_json::Value::Object(details)));
        }

        let roles = dto
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()?;

        let user_name = dto.user_name.unwrap_or_default();
        if let Some(email) = dto.email.as_deref() {
            if self.user_repo.find_by_email(email).await?.is_some() {
                return Err(AppError::conflict(format!("Email '{email}' is already taken.")));
            }
        }

        let password_hash = self.hasher.hash_password(dto.password.as_deref().unwrap_or_default())?;
        let user = self
            .user_repo
            .create_user(
                &CreateUser {
                    first_name: dto.first_name,
                    last_name: dto.last_name,
                    user_name,
                    email: dto.email,
                    phone_number: dto.phone_number,
                    password_hash,
                },
                &roles,
            )
            .await?;

        info!(user_id = %user.id, user_name = %user.user_name, "User registered");
        Ok(user)
    }

    /// Check credentials and return the matching user.
    pub async fn validate_user(&self, dto: &UserForAuthenticationDto) -> AppResult<User> {
        let failed = || {
            warn!("Authentication failed. Wrong user name or password.");
            AppError::authentication("Authentication failed. Wrong user name or password.")
        };

        let (Some(user_name), Some(password)) = (dto.user_name.as_deref(), dto.password.as_deref())
        else {
            return Err(failed());
        };

        let Some(user) = self.user_repo.find_by_user_name(user_name).await? else {
            return Err(failed());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(failed());
        }
        Ok(user)
    }

    /// Issue an access token for a user.
    pub async fn create_token(&self, user: &User) -> AppResult<TokenDto> {
        let roles = self.user_repo.roles_for_user(user.id).await?;
        let token = self.encoder.generate_token(user, &roles)?;
        Ok(TokenDto { token })
    }

    /// Validate credentials and issue a token in one step.
    pub async fn login(&self, dto: UserForAuthenticationDto) -> AppResult<TokenDto> {
        validate_dto(&dto, "UserForAuthenticationDto")?;
        let user = self.validate_user(&dto).await?;
        let token = self.create_token(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }
}
