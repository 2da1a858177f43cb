use crate::config::Config;
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Build the upstream HTTP client from the current config snapshot.
pub fn build_http_client(config: &Config) -> Result<Client, anyhow::Error> {
    build_http_client_with_timeout(
        config.proxy_url.as_deref(),
        config.connect_timeout,
        config.request_timeout,
    )
}

/// Build an HTTP client with explicit proxy and timeout settings.
///
/// `proxy_url` of `None` means a direct connection; system proxy
/// environment variables are ignored either way.
pub fn build_http_client_with_timeout(
    proxy_url: Option<&str>,
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
) -> Result<Client, anyhow::Error> {
    let mut builder = Client::builder()
        .user_agent(concat!("assistant-relay/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(request_timeout_secs));

    if let Some(url) = proxy_url {
        let proxy = Proxy::all(url)?; // reqwest auto-detects http/https/socks5
        builder = builder.proxy(proxy);
    } else {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

/// Validate that a proxy URL is well-formed.
pub fn validate_proxy_url(url: &str) -> Result<(), anyhow::Error> {
    if url.is_empty() {
        return Ok(());
    }
    let parsed =
        url::Url::parse(url).map_err(|e| anyhow::anyhow!("invalid proxy URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" | "socks5" => Ok(()),
        scheme => Err(anyhow::anyhow!(
            "unsupported proxy scheme '{scheme}' in URL '{url}', expected http/https/socks5"
        )),
    }
}
