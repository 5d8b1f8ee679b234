//! Listener binding and the serve loop.

use axum::Router;
use std::io;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use tokio::net::TcpListener;

/// Ports tried in order when no explicit port is configured.
pub const FALLBACK_PORTS: RangeInclusive<u16> = 8000..=8099;

/// Bind on all interfaces.
///
/// An explicit `port` is bound as-is and any failure is returned. Without one, the first free
/// port in [`FALLBACK_PORTS`] wins; only "address in use" moves on to the next candidate.
pub async fn bind_listener(port: Option<u16>) -> io::Result<TcpListener> {
    if let Some(port) = port {
        return TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await;
    }

    for candidate in FALLBACK_PORTS {
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, candidate)).await {
            Ok(listener) => return Ok(listener),
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!(port = candidate, "Port taken");
            }
            Err(err) => return Err(err),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrNotAvailable,
        format!(
            "every port in {}-{} is in use",
            FALLBACK_PORTS.start(),
            FALLBACK_PORTS.end()
        ),
    ))
}

/// Serve `app` until Ctrl-C, then let in-flight analyses finish.
pub async fn serve(listener: TcpListener, app: Router) -> io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(err) => {
                    tracing::error!(error = %err, "Cannot listen for Ctrl-C; running until killed");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
}
