use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// App metadata from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: String,
    #[serde(default, rename = "appId", alias = "app_id")]
    pub app_id: Option<String>,
    #[serde(default)]
    pub no_auth: bool,
    #[serde(default)]
    pub auth_schemes: Vec<AuthScheme>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthScheme {
    pub auth_mode: String,
    #[serde(default)]
    pub fields: Vec<AuthField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthField {
    pub name: String,
    #[serde(default, rename = "displayName", alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default = "default_expected_from_customer")]
    pub expected_from_customer: bool,
}

fn default_expected_from_customer() -> bool {
    true
}

impl AuthField {
    /// Operator-facing label: display name when present, else the raw name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// A reusable auth configuration stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "appName")]
    pub app_name: String,
    #[serde(default, rename = "authScheme")]
    pub auth_scheme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    Initiated,
    Active,
    Failed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl ConnectionStatus {
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Expired)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiated => "INITIATED",
            Self::Active => "ACTIVE",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// An entity's linkage to an app, pending or live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    pub id: String,
    pub status: ConnectionStatus,
    #[serde(default, rename = "appName")]
    pub app_name: String,
    #[serde(default, rename = "integrationId")]
    pub integration_id: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Result of the existing-connection lookup. Absence is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionLookup {
    Found(ConnectedAccount),
    NotFound,
}

impl ConnectionLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Response of a connection initiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    #[serde(rename = "connectedAccountId")]
    pub connected_account_id: String,
    #[serde(rename = "connectionStatus")]
    pub connection_status: ConnectionStatus,
    #[serde(default, rename = "redirectUrl")]
    pub redirect_url: Option<String>,
    /// Filled in by the client from the integration the request was made with.
    #[serde(default, rename = "integrationId")]
    pub integration_id: Option<String>,
}

/// Client credentials and scopes for a new integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: String,
}

/// Everything needed to start a connection for an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateConnection {
    pub entity_id: String,
    pub app_name: String,
    pub auth_mode: Option<String>,
    pub auth_config: Option<AuthConfig>,
    pub integration: Option<Integration>,
    pub redirect_url: Option<String>,
}

/// Credential fields collected from the operator for a basic/API-key connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAccessData {
    pub entity_id: String,
    pub integration_id: Option<String>,
    pub connected_account_id: String,
    pub field_inputs: BTreeMap<String, String>,
}
