//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use confserver::config::ServerConfig;
use confserver::http::HttpServer;
use confserver::lifecycle::Shutdown;
use confserver::notification::NotificationRegistry;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const DOCUMENT: &str = r#"{
  "db": { "host": "localhost", "port": 5432, "replicas": ["a", "b"] },
  "service": { "hosts": "web1 web2 web3", "nothing": null }
}"#;

/// A server bound to an ephemeral port on localhost.
pub struct TestServer {
    pub addr: SocketAddr,
    pub document: PathBuf,
    pub shutdown: Shutdown,
    pub registry: Arc<NotificationRegistry>,
    pub handle: JoinHandle<std::io::Result<()>>,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn write_document(&self, contents: &str) {
        tokio::fs::write(&self.document, contents).await.unwrap();
    }

    /// Block until `n` requests are parked on `key`.
    pub async fn wait_for_parked(&self, key: &str, n: usize) {
        for _ in 0..500 {
            if self.registry.waiters(key) >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("nobody parked on {}", key);
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

pub async fn start_master() -> TestServer {
    start_with(|_| {}).await
}

pub async fn start_follower(master: &str) -> TestServer {
    let master = master.to_string();
    start_with(move |config| config.replication.master = Some(master)).await
}

pub async fn start_with(customize: impl FnOnce(&mut ServerConfig)) -> TestServer {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("conf.json");
    std::fs::write(&document, DOCUMENT).unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_host = "127.0.0.1".into();
    config.listener.port = 0;
    config.listener.shutdown_grace_secs = 1;
    config.document.path = document.clone();
    customize(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let registry = server.registry().clone();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        document,
        shutdown,
        registry,
        handle,
        _dir: dir,
    }
}
