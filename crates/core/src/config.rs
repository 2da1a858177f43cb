use serde::{Deserialize, Serialize};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Upstream origin used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

// ─── Config ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Outbound proxy for upstream calls
    pub proxy_url: Option<String>,

    // Logging
    pub logging_to_file: bool,
    pub log_dir: Option<String>,
    pub log_json: bool,

    // Timeouts (seconds)
    pub connect_timeout: u64,
    pub request_timeout: u64,

    // Request body size limit (MB)
    pub body_limit_mb: usize,

    // Responses API settings
    pub upstream: UpstreamConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            proxy_url: None,
            logging_to_file: false,
            log_dir: None,
            log_json: false,
            connect_timeout: 30,
            request_timeout: 300,
            body_limit_mb: 1,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file, sanitize, and validate.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse config from YAML text, sanitize, and validate.
    pub fn from_yaml(contents: &str) -> Result<Self, anyhow::Error> {
        let mut config: Config = serde_yaml_ng::from_str(contents)?;
        config.sanitize();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(ref proxy) = self.proxy_url {
            crate::proxy::validate_proxy_url(proxy)?;
        }
        validate_base_url(&self.upstream.base_url)?;
        anyhow::ensure!(self.body_limit_mb > 0, "body-limit-mb must be positive");
        Ok(())
    }

    /// Normalize values so that empty strings mean "unset".
    pub fn sanitize(&mut self) {
        self.proxy_url = non_empty(self.proxy_url.take());
        self.log_dir = non_empty(self.log_dir.take());
        self.upstream.sanitize();
    }
}

// ─── Upstream ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub assistant_id: Option<String>,
    pub model: Option<String>,
    pub payload_variant: PayloadVariant,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            assistant_id: None,
            model: None,
            payload_variant: PayloadVariant::default(),
        }
    }
}

impl UpstreamConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn assistant_id(&self) -> Option<&str> {
        self.assistant_id.as_deref()
    }

    /// Configured model, or [`DEFAULT_MODEL`].
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Full URL of the Responses endpoint.
    pub fn responses_url(&self) -> String {
        format!("{}/v1/responses", self.base_url)
    }

    fn sanitize(&mut self) {
        self.api_key = non_empty(self.api_key.take());
        self.assistant_id = non_empty(self.assistant_id.take());
        self.model = non_empty(self.model.take());
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if self.base_url.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }
    }
}

/// Shape of the upstream payload when an assistant id is in play.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadVariant {
    /// `model` is always sent, `assistant_id` is added when resolved.
    #[default]
    AlwaysIncludeModel,
    /// `assistant_id` replaces `model` when resolved.
    AssistantExcludesModel,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn validate_base_url(base_url: &str) -> Result<(), anyhow::Error> {
    let parsed = url::Url::parse(base_url)
        .map_err(|e| anyhow::anyhow!("invalid upstream base URL '{base_url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(anyhow::anyhow!(
            "unsupported upstream scheme '{scheme}' in URL '{base_url}', expected http/https"
        )),
    }
}
