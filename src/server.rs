//! Server assembly and lifecycle.

use crate::api::{AppState, create_router};
use crate::config::RegistryConfig;
use crate::registry::domain::RegistryDomainError;
use crate::registry::services::{InMemoryServiceRegistry, LivenessSweeper};
use axum::Router;
use mockable::Clock;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration cannot be turned into a running registry.
    #[error("invalid configuration: {0}")]
    Config(#[from] RegistryDomainError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The HTTP server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Registry daemon: an in-memory registry, its sweeper, and the HTTP API.
pub struct RegistryServer<C: Clock + Send + Sync + 'static> {
    config: RegistryConfig,
    registry: Arc<InMemoryServiceRegistry<C>>,
    clock: Arc<C>,
}

impl<C: Clock + Send + Sync + 'static> RegistryServer<C> {
    /// Builds the registry described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when the expiration threshold is
    /// unusable.
    pub fn new(config: RegistryConfig, clock: Arc<C>) -> Result<Self, ServerError> {
        let policy = config.expiration_policy()?;
        let registry = Arc::new(InMemoryServiceRegistry::in_memory(
            Arc::clone(&clock),
            policy,
        ));
        Ok(Self {
            config,
            registry,
            clock,
        })
    }

    /// Returns the registry served by this server.
    #[must_use]
    pub const fn registry(&self) -> &Arc<InMemoryServiceRegistry<C>> {
        &self.registry
    }

    /// Builds the HTTP router over this server's registry.
    #[must_use]
    pub fn router(&self) -> Router {
        let state = AppState::new(Arc::clone(&self.registry), Arc::clone(&self.clock));
        create_router(state, self.config.server.enable_cors)
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    ///
    /// The background sweeper, when enabled, is stopped before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the address is unavailable and
    /// [`ServerError::Serve`] when serving fails.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.listen_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] when serving fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
        let (stop_tx, stop_rx) = watch::channel(false);
        let sweeper = self.config.sweep_interval().map(|period| {
            LivenessSweeper::new(Arc::clone(&self.registry), period).spawn(stop_rx)
        });

        tracing::info!(
            addr = %local_addr,
            expiration_secs = self.config.liveness.expiration_secs,
            heartbeat_interval_secs = self.config.liveness.heartbeat_interval_secs,
            "service registry listening"
        );

        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve);

        if stop_tx.send(true).is_err() {
            tracing::debug!("liveness sweeper already stopped");
        }
        if let Some(handle) = sweeper
            && let Err(err) = handle.await
        {
            tracing::warn!(error = %err, "liveness sweeper task failed");
        }

        tracing::info!("service registry stopped");
        served
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
///
/// A signal handler that cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
