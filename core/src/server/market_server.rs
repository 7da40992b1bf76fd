//! Plugin market server implementation
//!
//! Binds the HTTP listener and serves the catalog routes until shutdown is
//! requested.

use crate::config::ServerConfig;
use crate::server::routes;
use crate::service::CatalogService;
use crate::{MarketError, MarketResult};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Main catalog server
pub struct MarketServer {
	config: ServerConfig,
	service: CatalogService,
	shutdown_token: CancellationToken,
}

impl MarketServer {
	/// Create a new server over the given catalog service
	pub fn new(config: ServerConfig, service: CatalogService) -> Self {
		Self {
			config,
			service,
			shutdown_token: CancellationToken::new(),
		}
	}

	pub fn address(&self) -> String {
		self.config.bind_address()
	}

	/// Build the HTTP router
	pub fn router(&self) -> Router {
		routes::router(self.service.clone(), self.config.enable_cors)
	}

	/// Bind the configured address and serve until shutdown
	pub async fn run(&self) -> MarketResult<()> {
		let listener = TcpListener::bind(self.address()).await?;
		self.serve(listener).await
	}

	/// Serve on an already bound listener
	pub async fn serve(&self, listener: TcpListener) -> MarketResult<()> {
		let addr: SocketAddr = listener.local_addr()?;
		tracing::info!("Plugin market listening on {}", addr);
		tracing::info!(path = %self.service.store().path().display(), "Serving catalog document");

		let token = self.shutdown_token.clone();
		axum::serve(listener, self.router())
			.with_graceful_shutdown(async move {
				token.cancelled().await;
				tracing::info!("Shutdown signal received, no longer accepting connections");
			})
			.await
			.map_err(|e| MarketError::Server(e.to_string()))?;

		Ok(())
	}

	/// Request a graceful shutdown
	pub fn shutdown(&self) {
		tracing::info!("Shutting down plugin market server...");
		self.shutdown_token.cancel();
	}

	/// Get shutdown token for external shutdown coordination
	pub fn shutdown_token(&self) -> CancellationToken {
		self.shutdown_token.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::CatalogStore;
	use std::sync::Arc;
	use tempfile::tempdir;
	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpStream;

	#[tokio::test]
	async fn test_serve_and_shutdown() {
		let dir = tempdir().unwrap();
		let store = Arc::new(CatalogStore::new(dir.path().join("plugins_data.json")));
		let server = Arc::new(MarketServer::new(
			ServerConfig::default(),
			CatalogService::new(store),
		));

		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();

		let running = {
			let server = Arc::clone(&server);
			tokio::spawn(async move { server.serve(listener).await })
		};

		let mut stream = TcpStream::connect(addr).await.unwrap();
		stream
			.write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
			.await
			.unwrap();
		let mut response = String::new();
		stream.read_to_string(&mut response).await.unwrap();
		assert!(response.starts_with("HTTP/1.1 200"));
		assert!(response.contains("\"healthy\""));

		server.shutdown();
		running.await.unwrap().unwrap();
	}
}
