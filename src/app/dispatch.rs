use crate::browser::SystemBrowser;
use crate::cli::commands::{Cli, Commands};
use crate::client::{HttpBackend, WaitPolicy};
use crate::config::Config;
use crate::error::Result;
use crate::flow::{AddOptions, AddOutcome, Context, add_integration};
use crate::prompt::TerminalPrompter;
use crate::ui::Console;
use tracing::info;

/// Path on the web dashboard that receives OAuth callbacks.
const REDIRECT_PATH: &str = "redirect";

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Add {
            name,
            no_browser,
            integration_id,
            auth_mode,
            scopes,
            entity_id,
        } => {
            let options = AddOptions {
                app_name: name,
                entity_id: entity_id.unwrap_or_else(|| config.entity_id.clone()),
                integration_id,
                auth_mode,
                scopes,
                no_browser,
            };
            let outcome = run_add(&config, &options).await?;
            info!(?outcome, "add finished");
            Ok(())
        }
    }
}

async fn run_add(config: &Config, options: &AddOptions) -> Result<AddOutcome> {
    config.validate()?;
    let backend = HttpBackend::from_config(config)?;
    let console = Console::stdout();

    let ctx = Context {
        backend: &backend,
        prompter: &TerminalPrompter,
        browser: &SystemBrowser,
        console: &console,
        redirect_url: config.web_url_for(REDIRECT_PATH)?,
        wait: WaitPolicy::from(&config.connection),
    };

    Ok(add_integration(&ctx, options).await?)
}
