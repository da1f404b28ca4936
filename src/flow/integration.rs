use crate::client::{Backend, Integration};
use crate::error::FlowError;
use tracing::debug;

/// Resolve `--integration-id` against the backend's integrations.
///
/// `None` short-circuits without a network call.
pub async fn load_integration(
    backend: &dyn Backend,
    integration_id: Option<&str>,
) -> Result<Option<Integration>, FlowError> {
    let Some(integration_id) = integration_id else {
        return Ok(None);
    };

    let integrations = backend.list_integrations().await?;
    debug!(count = integrations.len(), integration_id, "resolving integration");

    integrations
        .into_iter()
        .find(|integration| integration.id == integration_id)
        .map(Some)
        .ok_or_else(|| FlowError::IntegrationNotFound(integration_id.to_string()))
}
