use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub claude_api_key: String,
    pub claude_model: String,
    pub claude_api_url: String,

    // Scene generation
    pub generation_timeout_secs: u64,
    pub generation_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            claude_api_key: String::new(),
            claude_model: "claude-sonnet-4-20250514".into(),
            claude_api_url: "https://api.anthropic.com/v1/messages".into(),
            generation_timeout_secs: 30,
            generation_max_tokens: 900,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(p) => p
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a number, got {p:?}"))?,
                Err(_) => defaults.port,
            },
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            claude_api_key: env::var("CLAUDE_API_KEY").unwrap_or_default(),
            claude_model: env::var("CLAUDE_MODEL").unwrap_or(defaults.claude_model),
            claude_api_url: env::var("CLAUDE_API_URL").unwrap_or(defaults.claude_api_url),

            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.generation_timeout_secs),
            generation_max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.generation_max_tokens),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ai_enabled(&self) -> bool {
        !self.claude_api_key.is_empty()
    }
}
