use super::models::{
    App, ConnectedAccount, ConnectionLookup, ConnectionRequest, InitiateConnection, Integration,
    SaveAccessData,
};
use crate::error::ClientResult;
use async_trait::async_trait;

/// The remote API the add-integration flow talks to.
///
/// Covers the entity directory (connections), the app catalog and the
/// integration catalog. `HttpBackend` is the production implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Latest connection of `entity_id` for `app`; `NotFound` when there is none.
    async fn get_connection(&self, entity_id: &str, app: &str) -> ClientResult<ConnectionLookup>;

    async fn initiate_connection(
        &self,
        request: &InitiateConnection,
    ) -> ClientResult<ConnectionRequest>;

    async fn get_app(&self, name: &str) -> ClientResult<App>;

    async fn list_integrations(&self) -> ClientResult<Vec<Integration>>;

    async fn get_connected_account(&self, id: &str) -> ClientResult<ConnectedAccount>;

    /// Persist operator-supplied credential fields on an initiated connection.
    async fn save_user_access_data(
        &self,
        data: &SaveAccessData,
    ) -> ClientResult<ConnectionRequest>;
}
