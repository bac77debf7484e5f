//! Integration tests for the development server.
//!
//! Tests bind a real socket on an ephemeral port and verify listener events,
//! static file serving, CORS and host validation.

use fob_config::{CorsOrigin, HostSetting, ResolvedConfig, SharedConfig, UserConfig};
use fob_dev::{DevError, DevServer, ListenerEvent};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

fn config_for(root: &Path) -> SharedConfig {
    let mut user = UserConfig::default();
    user.server.host = Some(HostSetting::from("127.0.0.1"));
    user.server.port = Some(0);
    user.server.allowed_hosts = Some(vec!["app.test".to_string()]);
    user.server.cors = Some(vec![CorsOrigin::exact("http://app.test")]);
    SharedConfig::new(ResolvedConfig::resolve(&user, root))
}

async fn request(addr: SocketAddr, path: &str, host: &str, origin: Option<&str>) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let mut raw = format!("GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n");
    if let Some(origin) = origin {
        raw.push_str(&format!("Origin: {origin}\r\n"));
    }
    raw.push_str("\r\n");
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

struct Running {
    server: Arc<DevServer>,
    events: mpsc::UnboundedReceiver<ListenerEvent>,
    task: tokio::task::JoinHandle<fob_dev::Result<()>>,
    _subscriptions: Vec<fob_dev::Subscription>,
}

async fn start(root: &Path) -> (Running, SocketAddr) {
    let server = Arc::new(DevServer::new(config_for(root)));
    let (tx, mut events) = mpsc::unbounded_channel();

    let listener = server.listener();
    let subscriptions = [ListenerEvent::Listening, ListenerEvent::Close]
        .into_iter()
        .map(|event| {
            let tx = tx.clone();
            listener.on(
                event,
                Arc::new(move || {
                    let _ = tx.send(event);
                    Ok(())
                }),
            )
        })
        .collect();

    let task = tokio::spawn({
        let server = Arc::clone(&server);
        async move { server.listen().await }
    });

    let first = timeout(Duration::from_secs(5), events.recv()).await.unwrap();
    assert_eq!(first, Some(ListenerEvent::Listening));
    let addr = server.listener().local_addr().expect("bound after Listening");

    (
        Running {
            server,
            events,
            task,
            _subscriptions: subscriptions,
        },
        addr,
    )
}

#[tokio::test]
async fn test_listen_serve_and_close() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.js"), "console.log('hi')").unwrap();

    let (mut running, addr) = start(temp.path()).await;
    assert_ne!(addr.port(), 0);
    assert_eq!(
        running.server.server_url(),
        Some(format!("http://127.0.0.1:{}", addr.port()))
    );

    let response = request(addr, "/main.js", "localhost", None).await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("console.log('hi')"));

    running.server.close();
    let result = timeout(Duration::from_secs(5), running.task).await.unwrap().unwrap();
    assert!(result.is_ok());

    assert_eq!(running.events.recv().await, Some(ListenerEvent::Close));
    assert!(running.server.listener().local_addr().is_none());
}

#[tokio::test]
async fn test_unknown_host_is_blocked() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.js"), "").unwrap();

    let (running, addr) = start(temp.path()).await;

    let blocked = request(addr, "/main.js", "evil.test", None).await;
    assert!(blocked.starts_with("HTTP/1.1 403"), "{blocked}");
    assert!(blocked.contains("Blocked request"));

    let allowed = request(addr, "/main.js", "app.test:5173", None).await;
    assert!(allowed.starts_with("HTTP/1.1 200"), "{allowed}");

    running.server.close();
    running.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cors_uses_resolved_origins() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.js"), "").unwrap();

    let (running, addr) = start(temp.path()).await;

    let trusted = request(addr, "/main.js", "localhost", Some("http://app.test")).await;
    assert!(
        trusted
            .to_ascii_lowercase()
            .contains("access-control-allow-origin: http://app.test"),
        "{trusted}"
    );

    let untrusted = request(addr, "/main.js", "localhost", Some("http://other.test")).await;
    assert!(
        !untrusted
            .to_ascii_lowercase()
            .contains("access-control-allow-origin"),
        "{untrusted}"
    );

    running.server.close();
    running.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_failing_listening_handler_aborts_listen() {
    let temp = TempDir::new().unwrap();
    let server = DevServer::new(config_for(temp.path()));

    let _sub = server.listener().on(
        ListenerEvent::Listening,
        Arc::new(|| anyhow::bail!("cannot write info file")),
    );

    let err = server.listen().await.unwrap_err();
    assert!(matches!(
        err,
        DevError::Lifecycle {
            event: ListenerEvent::Listening,
            ..
        }
    ));
    assert!(err.to_string().contains("cannot write info file"));
    assert!(server.listener().local_addr().is_none());
}

#[tokio::test]
async fn test_bind_failure_names_address() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let temp = TempDir::new().unwrap();
    let mut user = UserConfig::default();
    user.server.host = Some(HostSetting::from("127.0.0.1"));
    user.server.port = Some(port);
    let server = DevServer::new(SharedConfig::new(ResolvedConfig::resolve(&user, temp.path())));

    let err = server.listen().await.unwrap_err();
    assert!(matches!(err, DevError::Bind { ref addr, .. } if addr == &format!("127.0.0.1:{port}")));
}
