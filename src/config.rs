//! Environment-driven configuration (spec §6's variable table). Every
//! parameter is read once at startup; parse failures fall back to the
//! documented default rather than aborting (spec §4.7's "Configuration").

use std::env;
use std::time::Duration;

const DEFAULT_CLIENT_ID: &str = "hass-crds-controller";
const DEFAULT_PORT: u16 = 1883;
const DEFAULT_GC_INTERVAL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_GC_SILENCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Broker connection parameters (spec §6).
#[derive(Clone, Debug)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
}

impl MqttConfig {
    /// Reads `MQTT_*` from the process environment. `MQTT_BROKER` is
    /// required; its absence is a fatal initialisation failure (spec §7).
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("MQTT_BROKER").map_err(|_| "MQTT_BROKER is required".to_string())?;
        let port = env::var("MQTT_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let client_id = env::var("MQTT_CLIENT_ID").unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string());
        let username = env::var("MQTT_USERNAME").ok().filter(|v| !v.is_empty());
        let password = env::var("MQTT_PASSWORD").ok().filter(|v| !v.is_empty());
        let use_tls = bool_env("MQTT_USE_TLS", false);
        Ok(Self {
            host,
            port,
            client_id,
            username,
            password,
            use_tls,
        })
    }
}

/// Orphan collector cadence (spec §4.7, §6).
#[derive(Clone, Debug)]
pub struct GcConfig {
    pub enabled: bool,
    pub interval: Duration,
    pub run_on_startup: bool,
    pub silence_timeout: Duration,
}

impl GcConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: bool_env("GC_ENABLED", true),
            interval: duration_env("GC_INTERVAL", DEFAULT_GC_INTERVAL),
            run_on_startup: bool_env("GC_RUN_ON_STARTUP", true),
            silence_timeout: duration_env("GC_SILENCE_TIMEOUT", DEFAULT_GC_SILENCE_TIMEOUT),
        }
    }
}

fn bool_env(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1"),
        Err(_) => default,
    }
}

fn duration_env(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| humantime::parse_duration(&v).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_env_accepts_true_and_1() {
        std::env::set_var("TEST_BOOL_A", "true");
        std::env::set_var("TEST_BOOL_B", "1");
        std::env::set_var("TEST_BOOL_C", "false");
        assert!(bool_env("TEST_BOOL_A", false));
        assert!(bool_env("TEST_BOOL_B", false));
        assert!(!bool_env("TEST_BOOL_C", true));
        std::env::remove_var("TEST_BOOL_A");
        std::env::remove_var("TEST_BOOL_B");
        std::env::remove_var("TEST_BOOL_C");
    }

    #[test]
    fn duration_env_falls_back_on_parse_failure() {
        std::env::set_var("TEST_DURATION_BAD", "not-a-duration");
        assert_eq!(
            duration_env("TEST_DURATION_BAD", Duration::from_secs(7)),
            Duration::from_secs(7)
        );
        std::env::remove_var("TEST_DURATION_BAD");
    }

    #[test]
    fn duration_env_parses_humantime() {
        std::env::set_var("TEST_DURATION_OK", "90s");
        assert_eq!(
            duration_env("TEST_DURATION_OK", Duration::from_secs(7)),
            Duration::from_secs(90)
        );
        std::env::remove_var("TEST_DURATION_OK");
    }
}
