//! Administrator entities (database row mappings).

use domain::models::AdministratorRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// `administrators` joined with its `users` row.
#[derive(Debug, Clone, FromRow)]
pub struct AdministratorEntity {
    pub admin_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub can_modify_system_config: bool,
}

impl From<AdministratorEntity> for AdministratorRecord {
    fn from(entity: AdministratorEntity) -> Self {
        Self {
            admin_id: entity.admin_id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            can_modify_system_config: entity.can_modify_system_config,
        }
    }
}

/// Columns returned when inserting the `users` row of a new administrator.
#[derive(Debug, Clone, FromRow)]
pub struct CreatedAdministratorEntity {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub user_type: String,
}
