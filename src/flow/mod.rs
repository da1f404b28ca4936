//! The `add` command: connect an app to an entity.
//!
//! The sequence is linear: resolve the optional integration, guard against
//! replacing an existing connection, fetch the app, resolve the auth mode,
//! then run either the basic/API-key flow or the OAuth redirect flow.

mod auth_mode;
mod basic;
mod guard;
mod integration;
mod oauth;


pub use auth_mode::{is_basic_mode, resolve_auth_mode};
pub use basic::{auth_config_from_scopes, collect_input_fields};
pub use guard::guard_existing_connection;
pub use integration::load_integration;

use crate::browser::Browser;
use crate::client::{Backend, WaitPolicy};
use crate::error::FlowError;
use crate::prompt::Prompter;
use crate::ui::{Console, style as ui};
use tracing::info;

/// Collaborators and settings the flow runs against.
pub struct Context<'a> {
    pub backend: &'a dyn Backend,
    pub prompter: &'a dyn Prompter,
    pub browser: &'a dyn Browser,
    pub console: &'a Console,
    /// OAuth callback on the web dashboard.
    pub redirect_url: String,
    pub wait: WaitPolicy,
}

/// Arguments of one `add` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    pub app_name: String,
    pub entity_id: String,
    pub integration_id: Option<String>,
    pub auth_mode: Option<String>,
    pub scopes: Vec<String>,
    pub no_browser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The operator kept the existing connection.
    Retained,
    /// The app declares no auth schemes; nothing to connect.
    NoAuthNeeded,
    Connected { app: String, auth_mode: String },
}

pub fn normalize_app_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

pub async fn add_integration(
    ctx: &Context<'_>,
    options: &AddOptions,
) -> Result<AddOutcome, FlowError> {
    let name = normalize_app_name(&options.app_name);
    info!(app = %name, entity_id = %options.entity_id, "adding integration");

    let integration = load_integration(ctx.backend, options.integration_id.as_deref()).await?;

    if !guard_existing_connection(ctx, &options.entity_id, &name).await? {
        return Ok(AddOutcome::Retained);
    }

    ctx.console.blank();
    ctx.console.println(ui::value(format!(
        "> Adding integration: {}...",
        capitalize(&name)
    )));
    ctx.console.blank();

    let app = ctx.backend.get_app(&name).await?;
    if app.no_auth {
        return Err(FlowError::NoAuthRequired(app.name));
    }

    if app.auth_schemes.is_empty() {
        ctx.console
            .println(format!("{} does not need authentication", app.name));
        return Ok(AddOutcome::NoAuthNeeded);
    }

    let scheme = resolve_auth_mode(
        &app.auth_schemes,
        options.auth_mode.as_deref(),
        ctx.prompter,
    )?;
    info!(app = %name, auth_mode = %scheme.auth_mode, "resolved auth mode");

    if is_basic_mode(&scheme.auth_mode) {
        basic::handle_basic_auth(
            ctx,
            &basic::BasicAuthRequest {
                app_name: &name,
                entity_id: &options.entity_id,
                scheme,
                integration,
                scopes: &options.scopes,
            },
        )
        .await?;
    } else {
        oauth::handle_oauth(
            ctx,
            &oauth::OAuthRequest {
                app_name: &name,
                entity_id: &options.entity_id,
                auth_mode: &scheme.auth_mode,
                integration,
                no_browser: options.no_browser,
            },
        )
        .await?;
    }

    Ok(AddOutcome::Connected {
        app: name,
        auth_mode: scheme.auth_mode.clone(),
    })
}
