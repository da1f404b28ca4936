use super::Context;
use crate::client::{
    AuthConfig, AuthField, AuthScheme, InitiateConnection, Integration, SaveAccessData,
};
use crate::error::FlowError;
use crate::prompt::Prompter;
use crate::ui::style as ui;
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder credentials; the backend substitutes its own client credentials.
const MASKED_CREDENTIAL: &str = "*************";

pub(super) struct BasicAuthRequest<'a> {
    pub app_name: &'a str,
    pub entity_id: &'a str,
    pub scheme: &'a AuthScheme,
    pub integration: Option<Integration>,
    pub scopes: &'a [String],
}

/// Auth config carrying `scopes` comma-joined; `None` when there are no scopes.
pub fn auth_config_from_scopes(scopes: &[String]) -> Option<AuthConfig> {
    if scopes.is_empty() {
        return None;
    }

    Some(AuthConfig {
        client_id: MASKED_CREDENTIAL.to_string(),
        client_secret: MASKED_CREDENTIAL.to_string(),
        scopes: scopes.join(","),
    })
}

/// Prompt for every field the end user is expected to supply.
///
/// A blank required field aborts with the field's label. A blank optional
/// field takes the declared default, or is left out when there is none.
pub fn collect_input_fields(
    fields: &[AuthField],
    prompter: &dyn Prompter,
) -> Result<BTreeMap<String, String>, FlowError> {
    let mut inputs = BTreeMap::new();

    for field in fields.iter().filter(|field| field.expected_from_customer) {
        let label = field.label();
        let value = if field.required {
            let value = prompter.ask_required(label)?;
            if value.is_empty() {
                return Err(FlowError::RequiredField(label.to_string()));
            }
            value
        } else {
            let value = prompter.ask_optional(label)?;
            if value.is_empty() {
                let Some(default) = field.default.clone() else {
                    continue;
                };
                default
            } else {
                value
            }
        };
        inputs.insert(field.name.clone(), value);
    }

    Ok(inputs)
}

pub(super) async fn handle_basic_auth(
    ctx: &Context<'_>,
    request: &BasicAuthRequest<'_>,
) -> Result<(), FlowError> {
    let connection = ctx
        .backend
        .initiate_connection(&InitiateConnection {
            entity_id: request.entity_id.to_string(),
            app_name: request.app_name.to_lowercase(),
            auth_mode: Some(request.scheme.auth_mode.clone()),
            auth_config: auth_config_from_scopes(request.scopes),
            integration: request.integration.clone(),
            redirect_url: None,
        })
        .await?;
    debug!(
        connected_account_id = %connection.connected_account_id,
        "basic connection initiated"
    );

    let field_inputs = collect_input_fields(&request.scheme.fields, ctx.prompter)?;

    ctx.backend
        .save_user_access_data(&SaveAccessData {
            entity_id: request.entity_id.to_string(),
            integration_id: connection.integration_id.clone(),
            connected_account_id: connection.connected_account_id.clone(),
            field_inputs,
        })
        .await?;

    ctx.console.println(ui::success(format!(
        "✔ {} added successfully!",
        request.app_name
    )));
    Ok(())
}
