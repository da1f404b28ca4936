use anyhow::{Context, Result};

/// Opens URLs for the operator.
pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Launches the platform default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).with_context(|| format!("Failed to open browser for {url}"))
    }
}
