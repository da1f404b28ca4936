use super::Context;
use crate::client::ConnectionLookup;
use crate::error::FlowError;
use crate::ui::style as ui;
use tracing::debug;

/// Returns `true` when the flow may create a new connection for `app`.
///
/// With an existing connection the operator is asked whether to replace it;
/// declining prints a notice and returns `false`.
pub async fn guard_existing_connection(
    ctx: &Context<'_>,
    entity_id: &str,
    app: &str,
) -> Result<bool, FlowError> {
    let ConnectionLookup::Found(existing) = ctx.backend.get_connection(entity_id, app).await?
    else {
        return Ok(true);
    };

    debug!(connected_account_id = %existing.id, app, "existing connection found");
    ctx.console.println(ui::warning(format!(
        "Warning: An existing connection for {app} was found."
    )));
    ctx.console.blank();

    if ctx
        .prompter
        .confirm("Do you want to replace the existing connection?")?
    {
        return Ok(true);
    }

    ctx.console.blank();
    ctx.console.println(ui::value(
        "Existing connection retained. No new connection added.",
    ));
    ctx.console.blank();
    Ok(false)
}
