//! Application struct that encapsulates server assembly and serving logic.

use crate::cli::RunArgs;
use anyhow::Context;
use arc_swap::ArcSwap;
use relay_core::config::Config;
use relay_core::lifecycle::signal::SignalHandler;
use std::path::Path;
use std::sync::Arc;

/// Load the config file (if present) and overlay flag/environment values.
pub fn load_config(args: &RunArgs) -> anyhow::Result<Config> {
    let mut config = if Path::new(&args.config).exists() {
        Config::load(&args.config)
            .with_context(|| format!("failed to load config from '{}'", args.config))?
    } else {
        Config::default()
    };

    args.apply_overrides(&mut config);
    config.sanitize();
    config.validate()?;
    Ok(config)
}

/// One-line description of the effective settings. Never includes the key.
pub fn describe(config: &Config) -> String {
    format!(
        "listen={}:{} upstream={} model={} assistant-id={} payload-variant={:?} api-key={}",
        config.host,
        config.port,
        config.upstream.responses_url(),
        config.upstream.model(),
        config.upstream.assistant_id().unwrap_or("-"),
        config.upstream.payload_variant,
        if config.upstream.api_key().is_some() {
            "set"
        } else {
            "MISSING"
        },
    )
}

pub struct Application {
    config: Arc<ArcSwap<Config>>,
    app_router: axum::Router,
    args: RunArgs,
}

impl Application {
    /// Build the application from an already-loaded config.
    pub fn build(args: RunArgs, config: Config) -> Self {
        if !Path::new(&args.config).exists() {
            tracing::info!(
                "Config file '{}' not found, using defaults and environment",
                args.config
            );
        }
        if config.upstream.api_key().is_none() {
            tracing::warn!("No upstream API key configured; requests will fail with 500");
        }
        tracing::info!("Effective settings: {}", describe(&config));

        let state = relay_server::AppState::new(config);
        let config = state.config.clone();
        let app_router = relay_server::build_router(state);

        Self {
            config,
            app_router,
            args,
        }
    }

    /// Serve HTTP, reload on SIGHUP, and drain gracefully on shutdown.
    pub async fn serve(self) -> anyhow::Result<()> {
        let Self {
            config,
            app_router,
            args,
        } = self;

        let (signal_handler, mut shutdown_rx) = SignalHandler::new();

        let reload_config = config.clone();
        let reload_fn = move || match load_config(&args) {
            Ok(new_cfg) => {
                tracing::info!("Configuration reloaded: {}", describe(&new_cfg));
                reload_config.store(Arc::new(new_cfg));
            }
            Err(e) => tracing::error!("Config reload failed: {e:#}"),
        };
        tokio::spawn(signal_handler.run(reload_fn));

        let addr = {
            let cfg = config.load();
            format!("{}:{}", cfg.host, cfg.port)
        };

        tracing::info!("Starting HTTP server on {addr}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        let shutdown = async move {
            let _ = shutdown_rx.wait_for(|v| *v).await;
        };

        axum::serve(listener, app_router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shut down.");
        Ok(())
    }
}
