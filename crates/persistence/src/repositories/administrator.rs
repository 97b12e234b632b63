//! Repository for administrator accounts.

use domain::models::{NewAdministrator, NewAuditEntry};
use sqlx::PgPool;
use uuid::Uuid;

use super::audit_log::insert_audit_entry;
use crate::entities::{AdministratorEntity, CreatedAdministratorEntity};
use crate::metrics::QueryTimer;

/// Repository for administrator operations.
#[derive(Clone)]
pub struct AdministratorRepository {
    pool: PgPool,
}

impl AdministratorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether any user already has this email. Compared case-insensitively.
    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("user_email_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Creates the `users` and `administrators` rows of a new admin and the
    /// audit row, in one transaction.
    ///
    /// `user_id` is chosen by the caller so the audit entry can reference it.
    pub async fn create(
        &self,
        user_id: Uuid,
        admin: &NewAdministrator,
        password_hash: &str,
        audit: &NewAuditEntry,
    ) -> Result<CreatedAdministratorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_administrator");
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, CreatedAdministratorEntity>(
            r#"
            INSERT INTO users (user_id, email, password_hash, phone_number, first_name, last_name,
                               user_type, status, is_approved)
            VALUES ($1, $2, $3, $4, $5, $6, 'admin', 'active', true)
            RETURNING user_id, email, first_name, last_name, phone_number, user_type
            "#,
        )
        .bind(user_id)
        .bind(&admin.email)
        .bind(password_hash)
        .bind(&admin.phone_number)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO administrators (admin_id, created_by_admin_id, can_modify_system_config)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(admin.created_by_admin_id)
        .bind(admin.can_modify_system_config)
        .execute(&mut *tx)
        .await?;

        insert_audit_entry(&mut tx, audit).await?;

        tx.commit().await?;
        timer.record();
        Ok(created)
    }

    /// Finds an administrator with its account details.
    pub async fn find_by_id(&self, admin_id: Uuid) -> Result<Option<AdministratorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_administrator_by_id");
        let result = sqlx::query_as::<_, AdministratorEntity>(
            r#"
            SELECT a.admin_id, u.email, u.first_name, u.last_name, a.can_modify_system_config
            FROM administrators a
            JOIN users u ON a.admin_id = u.user_id
            WHERE a.admin_id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of administrators created by `admin_id`.
    pub async fn count_created_by(&self, admin_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_administrators_created_by");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM administrators WHERE created_by_admin_id = $1",
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deactivates the admin's API keys, deletes its `users` row (cascading
    /// to `administrators`) and writes the audit row, in one transaction.
    pub async fn delete(&self, admin_id: Uuid, audit: &NewAuditEntry) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("delete_administrator");
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE api_keys SET is_active = false WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        insert_audit_entry(&mut tx, audit).await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}
