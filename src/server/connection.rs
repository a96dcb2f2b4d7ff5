// Connection handling module
// Serves HTTP/1.1 on a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::watch;

use crate::flags::FlagSource;
use crate::handler;
use crate::logger;
use crate::state::AppState;
use crate::store::AssetStore;

/// Serve one connection until the client closes it, the timeout elapses,
/// or `shutdown` flips to `true`.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 keep-alive
/// 3. Serves every request on the connection through the dispatcher
/// 4. On shutdown, finishes the in-flight request and closes the connection
/// 5. Applies the connection timeout (`0` disables it)
pub async fn serve_connection<S, F>(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState<S, F>>,
    mut shutdown: watch::Receiver<bool>,
) where
    S: AssetStore,
    F: FlagSource,
{
    let io = TokioIo::new(stream);
    let timeout_secs = state.config.performance.connection_timeout;

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.config.performance.keep_alive);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer)),
    );
    tokio::pin!(conn);

    let drive = async {
        tokio::select! {
            result = conn.as_mut() => result,
            () = stopping(&mut shutdown) => {
                // Idle keep-alive connections close now, busy ones after the response
                conn.as_mut().graceful_shutdown();
                conn.as_mut().await
            }
        }
    };

    let outcome = if timeout_secs == 0 {
        Ok(drive.await)
    } else {
        tokio::time::timeout(Duration::from_secs(timeout_secs), drive).await
    };

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&peer, &err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer} timed out after {timeout_secs} seconds"
            ));
        }
    }
}

/// Resolve once the server starts shutting down
async fn stopping(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender means the server is gone
    let _ = shutdown.wait_for(|stop| *stop).await;
}
