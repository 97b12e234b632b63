//! Audit trail models for back-office actions.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Back-office actions recorded in `audit_logs.action_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    SuspendOfficer,
    ActivateOfficer,
    DeleteOfficer,
    RemoveHouse,
    ReinstateHouse,
    CreateAdmin,
    DeleteAdmin,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::SuspendOfficer => "SUSPEND_OFFICER",
            AuditAction::ActivateOfficer => "ACTIVATE_OFFICER",
            AuditAction::DeleteOfficer => "DELETE_OFFICER",
            AuditAction::RemoveHouse => "REMOVE_HOUSE",
            AuditAction::ReinstateHouse => "REINSTATE_HOUSE",
            AuditAction::CreateAdmin => "CREATE_ADMIN",
            AuditAction::DeleteAdmin => "DELETE_ADMIN",
        }
    }

    /// Value stored in `audit_logs.entity_type`.
    pub fn entity_type(&self) -> &'static str {
        match self {
            AuditAction::SuspendOfficer
            | AuditAction::ActivateOfficer
            | AuditAction::DeleteOfficer => "security_officer",
            AuditAction::RemoveHouse | AuditAction::ReinstateHouse => "house",
            AuditAction::CreateAdmin | AuditAction::DeleteAdmin => "administrator",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    /// Acting administrator, when the API key is linked to one.
    pub user_id: Option<Uuid>,
    pub action: AuditAction,
    pub entity_id: Uuid,
    pub old_value: Option<JsonValue>,
    pub new_value: Option<JsonValue>,
    pub ip_address: Option<String>,
}

impl NewAuditEntry {
    pub fn new(user_id: Option<Uuid>, action: AuditAction, entity_id: Uuid) -> Self {
        Self {
            user_id,
            action,
            entity_id,
            old_value: None,
            new_value: None,
            ip_address: None,
        }
    }

    pub fn with_old_value(mut self, value: JsonValue) -> Self {
        self.old_value = Some(value);
        self
    }

    pub fn with_new_value(mut self, value: JsonValue) -> Self {
        self.new_value = Some(value);
        self
    }

    pub fn with_ip_address(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }
}
