use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::shared::api::ApiEnvelope;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login` answers `{ success, data: user }`; the user record is kept
/// raw and goes through [`normalize_user`].
pub type LoginResponse = ApiEnvelope<Value>;

/// Closed set of roles issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Vendeur,
    GestionnaireStock,
    Agent,
    Superviseur,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "vendeur" => Role::Vendeur,
            "gestionnaire_stock" => Role::GestionnaireStock,
            "agent" => Role::Agent,
            "superviseur" => Role::Superviseur,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendeur => "vendeur",
            Role::GestionnaireStock => "gestionnaire_stock",
            Role::Agent => "agent",
            Role::Superviseur => "superviseur",
            Role::Unknown => "unknown",
        }
    }

    /// Label shown in the header
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrateur",
            Role::Vendeur => "Vendeur",
            Role::GestionnaireStock => "Gestionnaire de stock",
            Role::Agent => "Agent",
            Role::Superviseur => "Superviseur",
            Role::Unknown => "Inconnu",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Canonical flat user record.
///
/// Serializes to the persisted layout `{ ...userFields, _id }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserShapeError {
    #[error("user record is not a JSON object")]
    NotAnObject,
    #[error("user record has no `{0}` field")]
    MissingField(&'static str),
}

// `{ user: { user: {...} } }` has been seen; deeper nesting is treated as garbage.
const MAX_NESTING: usize = 3;

/// Flattens any user shape the API has produced into a [`UserInfo`].
///
/// Accepts a nested `user` wrapper, `_id` or `id` (string or number), and falls
/// back from `name` to `username` for the display name.
pub fn normalize_user(value: &Value) -> Result<UserInfo, UserShapeError> {
    let mut record = value.as_object().ok_or(UserShapeError::NotAnObject)?;
    for _ in 0..MAX_NESTING {
        match record.get("user").and_then(Value::as_object) {
            Some(inner) => record = inner,
            None => break,
        }
    }

    let id = ["_id", "id"]
        .iter()
        .find_map(|key| scalar_to_string(record.get(*key)?))
        .ok_or(UserShapeError::MissingField("_id"))?;

    let username = record
        .get("username")
        .and_then(Value::as_str)
        .map(str::to_string);

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .or_else(|| username.clone())
        .ok_or(UserShapeError::MissingField("name"))?;

    let role = record
        .get("role")
        .and_then(Value::as_str)
        .map(Role::parse)
        .ok_or(UserShapeError::MissingField("role"))?;

    Ok(UserInfo {
        id,
        name,
        username,
        role,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
