use std::env;
use std::fmt;

use thiserror::Error;

pub const DEFAULT_PROFILES_TABLE: &str = "perfis";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Connection settings for the identity provider and the profile store.
///
/// Loaded once when the lambda starts and shared by every invocation.
#[derive(Clone)]
pub struct BackendConfig {
    pub url: String,
    pub service_role_key: String,
    pub anon_key: String,
    pub profiles_table: String,
}

impl BackendConfig {
    pub fn new(url: &str, service_role_key: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
            anon_key: anon_key.to_string(),
            profiles_table: DEFAULT_PROFILES_TABLE.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let mut config = Self::new(
            &required("SUPABASE_URL")?,
            &required("SUPABASE_SERVICE_ROLE_KEY")?,
            &required("SUPABASE_ANON_KEY")?,
        );

        if let Some(table) = lookup("PROFILES_TABLE").filter(|t| !t.is_empty()) {
            config.profiles_table = table;
        }

        Ok(config)
    }
}

// Keys stay out of logs.
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .field("anon_key", &"<redacted>")
            .field("profiles_table", &self.profiles_table)
            .finish()
    }
}
