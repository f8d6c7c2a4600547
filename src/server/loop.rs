// Server loop module
// Accepts connections until the shutdown notification fires

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::{Duration, Instant};

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop.
///
/// Once `shutdown` is notified the listener is closed and in-flight
/// connections get up to the request timeout to finish.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);
    let deadline = Instant::now() + state.config.performance.request_timeout();
    loop {
        let in_flight = active_connections.load(Ordering::SeqCst);
        if in_flight == 0 {
            break;
        }
        if Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutting down with {in_flight} connection(s) still open"
            ));
            break;
        }
        logger::log_debug(&format!("Waiting for {in_flight} connection(s) to finish"));
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
