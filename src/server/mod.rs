//! In-memory order backend
//!
//! A small axum application implementing the order and roles resources on top
//! of [`InMemoryOrderStore`]. It backs the demo and the integration tests and
//! can be reached either over TCP ([`spawn`]) or in-process
//! ([`InMemoryTransport`]).

pub mod router;
pub mod store;
pub mod transport;

pub use router::{MockServerState, router};
pub use store::{CreateOrderRequest, InMemoryOrderStore};
pub use transport::InMemoryTransport;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ResourcesConfig;

/// Serve the mock API on `addr` in a background task
///
/// Bind to port 0 to let the OS pick one; the bound address is returned.
pub async fn spawn(
    addr: SocketAddr,
    state: MockServerState,
    resources: &ResourcesConfig,
) -> std::io::Result<(SocketAddr, JoinHandle<std::io::Result<()>>)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(state, resources);

    tracing::info!("Mock order API listening on {}", local_addr);
    let handle = tokio::spawn(async move { axum::serve(listener, app).await });

    Ok((local_addr, handle))
}
