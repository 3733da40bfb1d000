//! Authentication service
//!
//! Handles user registration, login, and token refresh. Tokens are stateless
//! JWTs; a refresh simply issues a new pair for a still-existing account.

use calendar_common::auth::{hash_password, validate_password_strength, verify_password};
use calendar_common::AppError;
use calendar_core::entities::User;
use calendar_core::{NewUser, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        validate_password_strength(&request.password, &username)?;

        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(ServiceError::conflict("Username already taken"));
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&request.password)?;

        let new_user = NewUser {
            username,
            email,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
        };
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(&user)
    }

    /// Login with email (case-insensitive) and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let mut matches = self.ctx.user_repo().find_by_email(request.email.trim()).await?;

        let user = match matches.len() {
            0 => {
                warn!("Login failed: no account for email");
                return Err(AppError::UnknownAccount.into());
            }
            1 => matches.remove(0),
            n => {
                warn!(accounts = n, "Login failed: email shared by several accounts");
                return Err(AppError::AmbiguousAccount.into());
            }
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        let claims = self.ctx.jwt_service().decode_token(&request.refresh_token)?;
        if !claims.is_refresh_token() {
            return Err(AppError::InvalidToken.into());
        }

        let user = self.get_user(claims.user_id()?).await.map_err(|e| match e {
            ServiceError::NotFound { .. } => ServiceError::App(AppError::InvalidToken),
            other => other,
        })?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user)
    }

    /// Get the authenticated user's account
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self.get_user(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> ServiceResult<UserId> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    async fn get_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
