//! Command execution context
//!
//! Wires configuration, the session, the gateway and the typed client
//! together once per command.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use log::debug;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::cli::args::GlobalOptions;
use crate::cli::OutputFormat;
use crate::client::{ClothesClient, Gateway, GatewayEvent, ReqwestTransport};
use crate::config::Config;
use crate::error::Result;
use crate::session::{FileSessionStorage, TokenManager};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Typed API client
    pub client: ClothesClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Gateway notices not yet shown
    events: broadcast::Receiver<GatewayEvent>,
}

impl CommandContext {
    /// Build the full stack for one command.
    ///
    /// Nothing here touches the network; the session file is only read when
    /// the first request is made.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?.with_api_url(opts.api_url_ref());

        let session = Arc::new(Self::session_for(&config)?);

        let transport = Arc::new(ReqwestTransport::new(
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
        )?);
        let gateway = Arc::new(Gateway::new(transport, session));

        let events = gateway.subscribe();
        debug!("Using API at {}", config.api_url);

        Ok(Self {
            client: ClothesClient::new(gateway),
            config,
            format: opts.format,
            events,
        })
    }

    /// Session manager configured from `config`, without a client.
    pub fn session_for(config: &Config) -> Result<TokenManager> {
        let storage = Arc::new(FileSessionStorage::new(config.session.resolve_path()?));
        Ok(TokenManager::new(storage, config.session.policy()?).with_skew(config.session.skew()?))
    }

    /// Page size from preferences.
    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size
    }

    /// Hints for the gateway events received so far.
    fn drain_hints(&mut self) -> Vec<String> {
        let mut hints = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => hints.push(event_hint(event)),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Skipped {} gateway events", skipped);
                }
                Err(_) => break,
            }
        }
        hints
    }
}

/// Runs when the command finishes, before any error reaches `main`.
impl Drop for CommandContext {
    fn drop(&mut self) {
        for hint in self.drain_hints() {
            eprintln!("{}", hint);
        }
    }
}

fn event_hint(event: GatewayEvent) -> String {
    match event {
        GatewayEvent::Unauthenticated => format!(
            "{} Session is no longer valid. Run `clothop login` to sign in.",
            "⚠".yellow()
        ),
        GatewayEvent::SetupRequired => format!(
            "{} The service has not been set up yet. Run `clothop setup`.",
            "⚠".yellow()
        ),
    }
}
