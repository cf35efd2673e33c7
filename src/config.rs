use thiserror::Error;

/// Default Clash of Clans API endpoint (royaleapi proxy, no IP allowlisting).
const COC_API_BASE_URL: &str = "https://cocproxy.royaleapi.dev/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    pub coc: CocConfig,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone)]
pub struct CocConfig {
    pub api_token: String,
    pub base_url: String,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name))
}

impl Config {
    /// Reads configuration from the process environment. Both tokens are
    /// required; the API base URL may be overridden for testing against a
    /// different proxy.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            discord: DiscordConfig {
                bot_token: required("DISCORD_TOKEN")?,
            },
            coc: CocConfig {
                api_token: required("COC_API_TOKEN")?,
                base_url: std::env::var("COC_API_BASE_URL")
                    .unwrap_or_else(|_| COC_API_BASE_URL.to_string()),
            },
        })
    }
}
