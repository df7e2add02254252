/*!
Runtime configuration for the monitor
*/

use std::path::PathBuf;

use thiserror::Error;

pub const USER_NAME_VAR: &str = "H1_USER_NAME";
pub const API_TOKEN_VAR: &str = "H1_API_TOKEN";
pub const WEBHOOK_URL_VAR: &str = "GOOGLE_CHAT_WEBHOOK_URL";

const DEFAULT_BASE_URL: &str = "https://api.hackerone.com";
const DEFAULT_OUTPUT_FILE: &str = "hacktivity_output.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("H1_USER_NAME and H1_API_TOKEN environment variables must be set")]
    MissingCredentials,
}

/// Feed endpoint, credentials, and the fixed page-1 query.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: String,
    pub user_name: String,
    pub api_token: String,
    pub page_size: u32,
    pub page_number: u32,
    pub query: String,
}

/// Chat webhook destination. An unset URL downgrades every alert to a logged
/// no-op; it is never a startup failure.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: Option<String>,
}

/// Snapshot persistence settings.
#[derive(Debug, Clone)]
pub struct StateConfig {
    pub output_path: PathBuf,
}

/// Full configuration, built once in `main` and passed into each component.
/// Components never read the environment themselves.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub feed: FeedConfig,
    pub webhook: WebhookConfig,
    pub state: StateConfig,
}

impl MonitorConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key-to-value lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (Some(user_name), Some(api_token)) = (lookup(USER_NAME_VAR), lookup(API_TOKEN_VAR))
        else {
            return Err(ConfigError::MissingCredentials);
        };

        Ok(Self {
            feed: FeedConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                user_name,
                api_token,
                page_size: 100,
                page_number: 1,
                query: "disclosed:true".to_string(),
            },
            webhook: WebhookConfig {
                url: lookup(WEBHOOK_URL_VAR),
            },
            state: StateConfig {
                output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            },
        })
    }
}
