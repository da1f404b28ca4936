use clap::{Parser, Subcommand};

const ADD_EXAMPLES: &str = "\
Examples:
  conduit add github
  conduit add github --no-browser
  conduit add notion -a API_KEY
  conduit add slack -s channels:read -s chat:write
  conduit add jira -i 8f2c1a4e-integration -e acme";

/// `Conduit` - connect apps to an entity through their OAuth or API-key flows.
#[derive(Parser, Debug)]
#[command(name = "conduit")]
#[command(version)]
#[command(about = "Connect third-party apps to an entity.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new integration
    #[command(after_help = ADD_EXAMPLES)]
    Add {
        /// Name of the app to connect (case-insensitive)
        name: String,

        /// Print the authentication URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,

        /// Reuse an existing integration instead of creating one
        #[arg(short, long)]
        integration_id: Option<String>,

        /// Auth mode to use (e.g. OAUTH2, API_KEY); prompts when omitted
        #[arg(short, long)]
        auth_mode: Option<String>,

        /// Scope to request; repeat for several
        #[arg(short, long = "scope", value_name = "SCOPE")]
        scopes: Vec<String>,

        /// Entity to connect for (defaults to `entity_id` from config)
        #[arg(short, long)]
        entity_id: Option<String>,
    },
}
