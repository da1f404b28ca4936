use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = ["CONDUIT_API_KEY", "COMPOSIO_API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        {
            self.api_key = Some(key.trim().to_string());
        }

        if let Ok(base_url) = std::env::var("CONDUIT_BASE_URL")
            && !base_url.is_empty()
        {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(web_url) = std::env::var("CONDUIT_WEB_URL")
            && !web_url.is_empty()
        {
            self.web_url = web_url;
        }

        if let Ok(entity_id) = std::env::var("CONDUIT_ENTITY_ID")
            && !entity_id.trim().is_empty()
        {
            self.entity_id = entity_id.trim().to_string();
        }

        if let Ok(interval) = std::env::var("CONDUIT_POLL_INTERVAL_SECS")
            && let Ok(secs) = interval.parse::<u64>()
            && secs > 0
        {
            self.connection.poll_interval_secs = secs;
        }

        if let Ok(timeout) = std::env::var("CONDUIT_WAIT_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse::<u64>()
        {
            self.connection.wait_timeout_secs = (secs > 0).then_some(secs);
        }
    }
}
