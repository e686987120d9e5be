use tracing::{info, warn};

use crate::auth::{hash_password, is_valid_email, normalize_email, verify_password};
use crate::error::AppError;
use crate::models::{LoginRequest, NewUser, RegisterRequest, SubscriptionTier, User};
use crate::store::{SharedStore, StoreError};

#[derive(Clone)]
pub struct UserService {
    store: SharedStore,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn with_bcrypt_cost(store: SharedStore, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Register a user on the ad-supported tier.
    /// A taken email is a conflict and leaves the existing account untouched.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(request.email.as_deref().unwrap_or_default());
        let password = request.password.unwrap_or_default();

        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        if !is_valid_email(&email) {
            return Err(AppError::validation("Email address is not valid"));
        }

        let password_hash = hash_password(&password, self.bcrypt_cost).map_err(|e| {
            if e.is_input_error() {
                AppError::validation(e.to_string())
            } else {
                AppError::Password(e)
            }
        })?;

        let new_user = NewUser {
            email,
            password_hash,
            name: request.name.unwrap_or_default().trim().to_string(),
        };

        let user = self
            .store
            .create_user(new_user, SubscriptionTier::AdSupported)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AppError::Conflict("Email address is already registered".to_string()),
                other => AppError::Store(other),
            })?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, AppError> {
        let email = normalize_email(request.email.as_deref().unwrap_or_default());
        let password = request.password.unwrap_or_default();

        let user = match self.store.find_user_by_email(&email).await? {
            Some(user) if !password.is_empty() => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        if !verify_password(&password, &user.password_hash)? {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }
}
