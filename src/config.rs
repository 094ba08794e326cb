//! Backend configuration, optionally read from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::VERSION;
use crate::http::DEFAULT_TIMEOUT;

/// Overrides the default timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "HTTP_UTILS_TIMEOUT_MS";
/// Overrides the User-Agent header.
pub const USER_AGENT_ENV: &str = "HTTP_UTILS_USER_AGENT";

/// Source of environment variables.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Reads the process environment.
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            user_agent: None,
        }
    }
}

impl BackendConfig {
    /// Starts from the defaults and applies any environment overrides.
    #[tracing::instrument(skip(env))]
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env.var(TIMEOUT_ENV) {
            config.timeout_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", TIMEOUT_ENV, raw))?;
        }

        if let Ok(agent) = env.var(USER_AGENT_ENV) {
            if !agent.trim().is_empty() {
                config.user_agent = Some(agent);
            }
        }

        Ok(config)
    }

    /// Default request timeout; zero disables it.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Configured user agent, or `http-utils/<version>`.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("http-utils/{}", VERSION))
    }
}
