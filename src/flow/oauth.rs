use super::Context;
use crate::client::{InitiateConnection, Integration, wait_until_active};
use crate::error::FlowError;
use crate::ui::style as ui;
use tracing::{debug, warn};

pub(super) struct OAuthRequest<'a> {
    pub app_name: &'a str,
    pub entity_id: &'a str,
    pub auth_mode: &'a str,
    pub integration: Option<Integration>,
    pub no_browser: bool,
}

pub(super) async fn handle_oauth(
    ctx: &Context<'_>,
    request: &OAuthRequest<'_>,
) -> Result<(), FlowError> {
    let app = request.app_name;
    let connection = ctx
        .backend
        .initiate_connection(&InitiateConnection {
            entity_id: request.entity_id.to_string(),
            app_name: app.to_lowercase(),
            auth_mode: Some(request.auth_mode.to_string()),
            auth_config: None,
            integration: request.integration.clone(),
            redirect_url: Some(ctx.redirect_url.clone()),
        })
        .await?;

    let redirect_url = connection
        .redirect_url
        .as_deref()
        .ok_or_else(|| FlowError::MissingRedirect(app.to_string()))?;
    debug!(
        connected_account_id = %connection.connected_account_id,
        "oauth connection initiated"
    );

    if !request.no_browser
        && let Err(err) = ctx.browser.open(redirect_url)
    {
        warn!(error = %err, "browser launch failed");
        ctx.console.println(ui::warning(format!(
            "Could not open a browser ({err}); open the URL below manually."
        )));
    }
    ctx.console.println(format!(
        "Please authenticate {app} in the browser and come back here. URL: {}",
        ui::url(redirect_url)
    ));

    let spinner = ctx
        .console
        .spinner(format!("⚠ Waiting for {app} authentication..."));
    let waited = wait_until_active(
        ctx.backend,
        &connection.connected_account_id,
        app,
        &ctx.wait,
    )
    .await;
    spinner.stop();
    waited?;

    ctx.console
        .println(ui::success(format!("✔ {app} added successfully!")));
    Ok(())
}
