use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Config {
    /// Load `~/.conduit/config.toml` (or `$CONDUIT_CONFIG_DIR/config.toml`),
    /// writing defaults on first run, then apply env overrides.
    pub fn load_or_init() -> Result<Self> {
        let conduit_dir = Self::config_dir()?;
        let mut config = Self::load_or_init_in(&conduit_dir)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("CONDUIT_CONFIG_DIR")
            && !dir.trim().is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(dir.trim()).as_ref()));
        }

        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".conduit"))
    }

    /// Load the config stored in `conduit_dir`, creating it with defaults if absent.
    pub fn load_or_init_in(conduit_dir: &Path) -> Result<Self> {
        let config_path = conduit_dir.join("config.toml");

        if !conduit_dir.exists() {
            fs::create_dir_all(conduit_dir).context("Failed to create .conduit directory")?;
        }

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            Ok(config)
        } else {
            debug!(path = %config_path.display(), "writing default config");
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
