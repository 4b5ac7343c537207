//! Periodic backup of the master's document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("couldn't get conf from master: {0}")]
    Http(#[from] reqwest::Error),

    #[error("master answered {0}")]
    Status(reqwest::StatusCode),

    #[error("couldn't save backup: {0}")]
    Io(#[from] std::io::Error),
}

/// `CONFFILE.YYYY-MM-DD--HH-MM-SS` in local time.
pub fn backup_path(document: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%d--%H-%M-%S");
    let mut name = document.as_os_str().to_owned();
    name.push(format!(".{}", stamp));
    PathBuf::from(name)
}

pub struct MasterPoller {
    client: reqwest::Client,
    master: String,
    document: PathBuf,
    interval: Duration,
}

impl MasterPoller {
    pub fn new(master: impl Into<String>, document: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            // No timeout: the fetch is a long poll.
            client: reqwest::Client::new(),
            master: master.into(),
            document: document.into(),
            interval,
        }
    }

    /// The long-poll URL on the master.
    pub fn url(&self) -> String {
        format!("http://{}/?wait", self.master)
    }

    /// Wait for the master's root to be triggered, then save its document.
    pub async fn fetch_once(&self) -> Result<PathBuf, ReplicationError> {
        let response = self.client.get(self.url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReplicationError::Status(status));
        }

        let path = backup_path(&self.document);
        let mut file = tokio::fs::File::create(&path).await?;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(path)
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            master = %self.master,
            interval_secs = self.interval.as_secs(),
            "Replication poller starting"
        );

        loop {
            tokio::select! {
                result = self.fetch_once() => match result {
                    Ok(path) => tracing::info!(backup = %path.display(), "Saved master conf file as backup"),
                    Err(e) => tracing::warn!(master = %self.master, error = %e, "Backup fetch failed"),
                },
                _ = shutdown.recv() => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!("Replication poller stopped");
    }
}
