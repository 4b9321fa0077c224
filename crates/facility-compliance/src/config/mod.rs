use crate::deadlines::policy::{
    DeadlinePolicy, COMMISSION_DUE_SOON_DAYS, PRESCRIPTION_DUE_SOON_DAYS,
    VERIFICATION_DUE_SOON_DAYS,
};
use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the compliance service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub deadlines: DeadlineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let deadlines = DeadlineConfig {
            verification_due_soon_days: threshold_var(
                "APP_VERIFICATION_DUE_SOON_DAYS",
                VERIFICATION_DUE_SOON_DAYS,
            )?,
            prescription_due_soon_days: threshold_var(
                "APP_PRESCRIPTION_DUE_SOON_DAYS",
                PRESCRIPTION_DUE_SOON_DAYS,
            )?,
            commission_due_soon_days: threshold_var(
                "APP_COMMISSION_DUE_SOON_DAYS",
                COMMISSION_DUE_SOON_DAYS,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            deadlines,
        })
    }
}

fn threshold_var(variable: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidThreshold {
                variable,
                value: raw,
            }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Width of the "échéance proche" window per obligation kind, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineConfig {
    pub verification_due_soon_days: u32,
    pub prescription_due_soon_days: u32,
    pub commission_due_soon_days: u32,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            verification_due_soon_days: VERIFICATION_DUE_SOON_DAYS,
            prescription_due_soon_days: PRESCRIPTION_DUE_SOON_DAYS,
            commission_due_soon_days: COMMISSION_DUE_SOON_DAYS,
        }
    }
}

impl DeadlineConfig {
    pub fn policy(&self) -> DeadlinePolicy {
        DeadlinePolicy::default()
            .with_verification_days(self.verification_due_soon_days)
            .with_prescription_days(self.prescription_due_soon_days)
            .with_commission_days(self.commission_due_soon_days)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("{variable} must be a whole number of days, got '{value}'")]
    InvalidThreshold {
        variable: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadlines::domain::ObligationKind;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_VERIFICATION_DUE_SOON_DAYS");
        env::remove_var("APP_PRESCRIPTION_DUE_SOON_DAYS");
        env::remove_var("APP_COMMISSION_DUE_SOON_DAYS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.deadlines, DeadlineConfig::default());
        assert_eq!(config.deadlines.verification_due_soon_days, 60);
        assert_eq!(config.deadlines.prescription_due_soon_days, 7);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn threshold_overrides_flow_into_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_VERIFICATION_DUE_SOON_DAYS", "90");
        env::set_var("APP_PRESCRIPTION_DUE_SOON_DAYS", " 14 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        let policy = config.deadlines.policy();
        assert_eq!(
            policy.window_for(ObligationKind::PeriodicVerification).days(),
            90
        );
        assert_eq!(policy.window_for(ObligationKind::Prescription).days(), 14);
        assert_eq!(policy.window_for(ObligationKind::Commission).days(), 30);
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PRESCRIPTION_DUE_SOON_DAYS", "une semaine");
        let error = AppConfig::load().expect_err("threshold must be numeric");
        reset_env();

        match error {
            ConfigError::InvalidThreshold { variable, value } => {
                assert_eq!(variable, "APP_PRESCRIPTION_DUE_SOON_DAYS");
                assert_eq!(value, "une semaine");
            }
            other => panic!("expected invalid threshold, got {other:?}"),
        }
    }
}
