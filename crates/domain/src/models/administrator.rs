//! Administrator account models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Request body for `POST /api/admin/administrators`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAdministratorRequest {
    #[validate(
        required(message = "All fields are required"),
        email(message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "All fields are required"),
        length(min = 8, max = 128, message = "Password must be 8-128 characters")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "All fields are required"),
        custom(function = "shared::validation::validate_phone_number")
    )]
    pub phone_number: Option<String>,

    #[validate(
        required(message = "All fields are required"),
        length(min = 1, max = 100, message = "First name must be 1-100 characters")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "All fields are required"),
        length(min = 1, max = 100, message = "Last name must be 1-100 characters")
    )]
    pub last_name: Option<String>,

    #[serde(default)]
    pub can_modify_system_config: Option<bool>,
}

impl CreateAdministratorRequest {
    /// Whether every account field is present and non-blank.
    pub fn has_required_fields(&self) -> bool {
        [
            &self.email,
            &self.password,
            &self.phone_number,
            &self.first_name,
            &self.last_name,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Splits a validated request into the account to create and its plaintext password.
    pub fn into_new_administrator(
        self,
        created_by_admin_id: Option<Uuid>,
    ) -> Result<(NewAdministrator, String), String> {
        match (
            self.email,
            self.password,
            self.phone_number,
            self.first_name,
            self.last_name,
        ) {
            (Some(email), Some(password), Some(phone_number), Some(first_name), Some(last_name)) => {
                Ok((
                    NewAdministrator {
                        email: email.trim().to_lowercase(),
                        phone_number: phone_number.trim().to_string(),
                        first_name: first_name.trim().to_string(),
                        last_name: last_name.trim().to_string(),
                        can_modify_system_config: self.can_modify_system_config.unwrap_or(false),
                        created_by_admin_id,
                    },
                    password,
                ))
            }
            _ => Err(ALL_FIELDS_REQUIRED.to_string()),
        }
    }
}

/// Administrator account ready to insert (password hashed separately).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdministrator {
    pub email: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub can_modify_system_config: bool,
    pub created_by_admin_id: Option<Uuid>,
}

/// Existing administrator, as needed by the removal rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministratorRecord {
    pub admin_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub can_modify_system_config: bool,
}

impl AdministratorRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account returned after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdministratorResponse {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub user_type: String,
    pub can_modify_system_config: bool,
}
