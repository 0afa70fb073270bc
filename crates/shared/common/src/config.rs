//! Shared configuration structures.

use std::env;

use serde::{Deserialize, Serialize};

/// Default JWT signing secret when `JWT_SECRET` is unset
pub const DEFAULT_JWT_SECRET: &str = "jwt-secret";

/// JWT configuration.
///
/// Loaded and carried by the user service; registration does not issue tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET`.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
        }
    }

    /// Whether the secret is still the built-in default
    pub fn is_default(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
        }
    }
}

/// Hosting-platform agent credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlatformConfig {
    #[serde(skip_serializing)]
    pub token: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl PlatformConfig {
    /// Load from `LAB_TOKEN`/`TOKEN` and `LAB_API_KEY`/`API_KEY`.
    pub fn from_env() -> Self {
        Self {
            token: non_empty_var("LAB_TOKEN").or_else(|| non_empty_var("TOKEN")),
            api_key: non_empty_var("LAB_API_KEY").or_else(|| non_empty_var("API_KEY")),
        }
    }

    /// Both credentials are present
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.api_key.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
