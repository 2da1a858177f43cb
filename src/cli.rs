//! CLI argument parsing. Every setting can also come from the environment.

use clap::{Args, Parser, Subcommand};
use relay_core::config::Config;

#[derive(Parser)]
#[command(
    name = "assistant-relay",
    version,
    about = "Relay to the OpenAI Responses API with citation cleanup"
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the relay server (default when no subcommand is given)
    Run,
    /// Load and validate configuration, print the resolved settings, and exit
    CheckConfig,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to config file (optional; defaults apply when absent)
    #[arg(short, long, default_value = "config.yaml", env = "RELAY_CONFIG", global = true)]
    pub config: String,

    /// Listen host
    #[arg(long, env = "RELAY_HOST", global = true)]
    pub host: Option<String>,

    /// Listen port
    #[arg(long, env = "RELAY_PORT", global = true)]
    pub port: Option<u16>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", env = "RELAY_LOG_LEVEL", global = true)]
    pub log_level: String,

    /// Upstream API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Default assistant id (only `asst_*` values are used)
    #[arg(long, env = "ASSISTANT_ID", global = true)]
    pub assistant_id: Option<String>,

    /// Model sent upstream
    #[arg(long, env = "MODEL", global = true)]
    pub model: Option<String>,

    /// Upstream origin, e.g. https://api.openai.com
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

impl RunArgs {
    /// Overlay flag/environment values onto a file-loaded config.
    /// Empty values are ignored.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = non_empty(&self.host) {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(key) = non_empty(&self.api_key) {
            config.upstream.api_key = Some(key);
        }
        if let Some(id) = non_empty(&self.assistant_id) {
            config.upstream.assistant_id = Some(id);
        }
        if let Some(model) = non_empty(&self.model) {
            config.upstream.model = Some(model);
        }
        if let Some(url) = non_empty(&self.base_url) {
            config.upstream.base_url = url;
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
