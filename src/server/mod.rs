pub mod handlers;
pub mod routes;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::dispatch::ActionDispatcher;

/// Binds the action API and serves it until the process exits. Each
/// connection is handled on its own task, so a slow SSH channel cannot
/// stall unrelated requests.
#[tracing::instrument(level = "info", name = "Panel Server", skip(dispatcher))]
pub async fn start_server(
    host: String,
    port: u16,
    dispatcher: Arc<ActionDispatcher>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let app = routes::create_routes(dispatcher).layer(cors);

    let ip: IpAddr = host.parse()?;
    let addr = SocketAddr::new(ip, port);
    tracing::info!("Starting panel server at http://{}", addr);

    let listener = TcpListener::bind(addr).await?;

    // ConnectInfo carries the peer address into the handlers; the
    // access gate keys on it.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
