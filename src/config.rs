use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_AUTOSAVE_SECS: u64 = 30;
pub const DEFAULT_TICK_SECS: u64 = 1;

/// Runtime settings, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub autosave_interval: Duration,
    pub autosave_tick: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_SECS),
            autosave_tick: Duration::from_secs(DEFAULT_TICK_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall back
    /// to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR").filter(|v| !v.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }
        if let Some(dir) = lookup("DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(secs) = parse_secs(&lookup, "AUTOSAVE_INTERVAL_SECS") {
            config.autosave_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&lookup, "AUTOSAVE_TICK_SECS") {
            config.autosave_tick = Duration::from_secs(secs);
        }

        config
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            log::warn!("{key} must be greater than zero, using default");
            None
        }
        Ok(secs) => Some(secs),
        Err(_) => {
            log::warn!("{key}={raw:?} is not a whole number of seconds, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.autosave_interval, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("DATA_DIR", "/tmp/drafts"),
            ("AUTOSAVE_INTERVAL_SECS", "5"),
            ("AUTOSAVE_TICK_SECS", "2"),
        ]));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/drafts"));
        assert_eq!(config.autosave_interval, Duration::from_secs(5));
        assert_eq!(config.autosave_tick, Duration::from_secs(2));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("AUTOSAVE_INTERVAL_SECS", "soon"),
            ("AUTOSAVE_TICK_SECS", "0"),
        ]));
        assert_eq!(config.autosave_interval, Duration::from_secs(DEFAULT_AUTOSAVE_SECS));
        assert_eq!(config.autosave_tick, Duration::from_secs(DEFAULT_TICK_SECS));
    }
}
