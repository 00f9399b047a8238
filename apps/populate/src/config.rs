use std::{fmt::Display, str::FromStr, time::Duration};

use anyhow::{Result, anyhow};
use hr_seed::SeedSettings;
use platform_client::DEFAULT_TIMEOUT;

/// Run configuration: the target API from the command line, pacing and
/// limits from the environment.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub settings: SeedSettings,
}

impl SeedConfig {
    pub fn load(base_url: String) -> Result<Self> {
        Self::from_lookup(base_url, |key| std::env::var(key).ok())
    }

    fn from_lookup(base_url: String, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = SeedSettings::default();

        let request_timeout = env_number(&lookup, "SEED_REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(anyhow!("SEED_REQUEST_TIMEOUT_SECS must be positive"));
        }

        let create_pause = env_number(&lookup, "SEED_CREATE_PAUSE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.create_pause);
        let refresh_pause = env_number(&lookup, "SEED_REFRESH_PAUSE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.refresh_pause);
        let max_failed_creates = env_number(&lookup, "SEED_MAX_FAILED_CREATES")?
            .unwrap_or(defaults.max_failed_creates);

        Ok(Self {
            base_url,
            request_timeout,
            settings: SeedSettings {
                create_pause,
                refresh_pause,
                max_failed_creates,
            },
        })
    }
}

fn env_number<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|err| anyhow!("invalid {key} {trimmed:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<SeedConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SeedConfig::from_lookup("http://localhost:8082".into(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = config(&[]).unwrap();
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.settings, SeedSettings::default());
    }

    #[test]
    fn env_overrides_pacing() {
        let config = config(&[
            ("SEED_CREATE_PAUSE_MS", "0"),
            ("SEED_REFRESH_PAUSE_MS", " 5 "),
            ("SEED_MAX_FAILED_CREATES", "3"),
            ("SEED_REQUEST_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.settings.create_pause, Duration::ZERO);
        assert_eq!(config.settings.refresh_pause, Duration::from_millis(5));
        assert_eq!(config.settings.max_failed_creates, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config(&[("SEED_CREATE_PAUSE_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SEED_CREATE_PAUSE_MS"));
        assert!(config(&[("SEED_REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }
}
