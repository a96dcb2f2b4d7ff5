// Server loop module
// Accepts connections until a shutdown signal, then drains in-flight ones

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::connection::serve_connection;
use crate::flags::FlagSource;
use crate::logger;
use crate::state::AppState;
use crate::store::AssetStore;

/// Accept connections on `listener` until `shutdown` resolves.
///
/// After shutdown no new connections are accepted and open connections are
/// told to close once their current request is answered. The call returns
/// once every connection task has finished.
pub async fn serve<S, F>(
    listener: TcpListener,
    state: Arc<AppState<S, F>>,
    shutdown: impl Future<Output = ()>,
) where
    S: AssetStore,
    F: FlagSource,
{
    let mut tasks = JoinSet::new();
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Check shutdown first so queued connections don't delay it
            biased;

            () = &mut shutdown => {
                logger::log_shutdown(tasks.len());
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer)) => {
                        tasks.spawn(serve_connection(
                            stream,
                            peer,
                            Arc::clone(&state),
                            stop_rx.clone(),
                        ));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            // Reap finished connection tasks
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    stop_tx.send_replace(true);
    while tasks.join_next().await.is_some() {}
    logger::log_stopped();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handler::{DispatchSettings, Dispatcher};
    use crate::lookup::Lookup;
    use crate::store::MemoryAssetStore;
    use hyper::body::Bytes;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use std::time::Duration;
    use tokio::sync::oneshot;

    struct NoFlags;

    impl FlagSource for NoFlags {
        async fn fetch(&self, _country: &str) -> Lookup<Bytes> {
            Lookup::NotFound
        }
    }

    fn test_state(connection_timeout: u64) -> Arc<AppState<MemoryAssetStore, NoFlags>> {
        let mut config = Config::load_from("definitely/not/a/config/file").unwrap();
        config.logging.access_log = false;
        config.performance.connection_timeout = connection_timeout;
        let store = MemoryAssetStore::new().with_asset("/index.html", "<h1>edge</h1>");
        let dispatcher = Dispatcher::new(store, NoFlags, DispatchSettings::from_config(&config));
        Arc::new(AppState::new(config, dispatcher))
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let state = test_state(30);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, state, async {
            let _ = stop_rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        assert!(raw.to_ascii_lowercase().contains("x-frame-options: deny"));
        assert!(raw.ends_with("<h1>edge</h1>"));

        stop_tx.send(()).unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_closes_idle_keep_alive_connection() {
        // No connection timeout, so only the shutdown can end the connection
        let state = test_state(0);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, state, async {
            let _ = stop_rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        while !raw.ends_with(b"<h1>edge</h1>") {
            let n = stream.read(&mut buf).await.unwrap();
            assert_ne!(n, 0, "connection closed before the response");
            raw.extend_from_slice(&buf[..n]);
        }

        stop_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(3), server)
            .await
            .expect("server should stop while a keep-alive connection is idle")
            .unwrap();

        let mut rest = Vec::new();
        let _ = stream.read_to_end(&mut rest).await;
        assert!(rest.is_empty());
    }
}
