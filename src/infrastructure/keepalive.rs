//! Minimal liveness responder.
//!
//! Some hosting platforms stop a process that does not answer on an HTTP
//! port. This router answers `GET /` with a fixed body and shares nothing
//! with the poll loop.

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::Result;

/// Body returned on `GET /`.
pub const ALIVE_BODY: &str = "Bot is alive!";

fn router() -> Router {
    Router::new().route("/", get(|| async { ALIVE_BODY }))
}

/// Bind `addr` and serve the liveness route on a detached task.
///
/// Returns the bound address (useful with port `0`) and the task handle.
pub async fn spawn(addr: &str) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "Keep-alive responder listening");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            warn!(error = %e, "Keep-alive responder stopped");
        }
    });

    Ok((local, handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_root_with_alive_body() {
        let (addr, handle) = spawn("127.0.0.1:0").await.unwrap();

        let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), ALIVE_BODY);
        handle.abort();
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (addr, handle) = spawn("127.0.0.1:0").await.unwrap();

        let response = reqwest::get(format!("http://{addr}/other")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        handle.abort();
    }
}
