//! Admin API key authentication.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{is_well_formed_key, sha256_hex};

const INVALID_KEY: &str = "Invalid or missing API key";

/// Authenticated admin API key, stored in request extensions by
/// `require_admin`.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    /// Database ID of the authenticated API key.
    pub api_key_id: i64,
    /// Key prefix for identification (e.g., "pa_aBcDe").
    pub key_prefix: String,
    /// Administrator account the key acts for, when linked.
    pub admin_id: Option<Uuid>,
}

impl ApiKeyAuth {
    /// Validates an admin API key and returns authentication info.
    ///
    /// Expiry is checked against `now`.
    pub async fn validate(pool: &PgPool, api_key: &str, now: DateTime<Utc>) -> Result<Self, ApiError> {
        if !is_well_formed_key(api_key) {
            return Err(ApiError::Unauthorized(INVALID_KEY.to_string()));
        }

        let key_hash = sha256_hex(api_key);

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&key_hash)
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::ServiceUnavailable("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_KEY.to_string()))?;

        if !ApiKeyRepository::is_admin_key_usable_at(&key, now) {
            return Err(if !key.is_active {
                ApiError::Unauthorized(INVALID_KEY.to_string())
            } else if !key.is_admin {
                ApiError::Forbidden("Admin access required".to_string())
            } else {
                ApiError::Unauthorized("API key has expired".to_string())
            });
        }

        // Fire and forget
        let pool_clone = pool.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            let repo = ApiKeyRepository::new(pool_clone);
            if let Err(e) = repo.update_last_used(key_id).await {
                tracing::warn!("Failed to update API key last_used_at: {}", e);
            }
        });

        Ok(ApiKeyAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            admin_id: key.admin_id,
        })
    }
}
