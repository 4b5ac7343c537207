//! Follower backups against a live master.

use std::path::Path;
use std::time::Duration;

use confserver::replication::{MasterPoller, ReplicationError};
use reqwest::StatusCode;
use tempfile::TempDir;
use tokio::sync::broadcast;
use tokio::time::timeout;

mod common;

fn backups(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

async fn trigger_root(master: &common::TestServer) {
    let res = reqwest::Client::new()
        .put(master.url("/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_fetch_once_saves_master_document() {
    let master = common::start_master().await;
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("conf.json");

    let poller = MasterPoller::new(master.addr.to_string(), document.clone(), Duration::from_secs(10));
    let fetch = tokio::spawn(async move { poller.fetch_once().await });
    master.wait_for_parked("/", 1).await;
    trigger_root(&master).await;

    let saved = timeout(Duration::from_secs(5), fetch)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let name = saved.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("conf.json."));
    assert_eq!(saved.parent(), Some(dir.path()));

    let expected = reqwest::get(master.url("/")).await.unwrap().text().await.unwrap();
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), expected);

    master.stop().await;
}

#[tokio::test]
async fn test_failed_master_response_writes_no_backup() {
    let master = common::start_master().await;
    master.write_document("{ not json").await;
    let dir = TempDir::new().unwrap();

    let poller = MasterPoller::new(
        master.addr.to_string(),
        dir.path().join("conf.json"),
        Duration::from_secs(10),
    );
    let fetch = tokio::spawn(async move { poller.fetch_once().await });
    master.wait_for_parked("/", 1).await;
    trigger_root(&master).await;

    let result = timeout(Duration::from_secs(5), fetch).await.unwrap().unwrap();
    assert!(matches!(
        result,
        Err(ReplicationError::Status(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert!(backups(dir.path()).is_empty());

    master.stop().await;
}

#[tokio::test]
async fn test_poller_keeps_going_after_failures_and_stops_on_shutdown() {
    let dir = TempDir::new().unwrap();
    let (tx, rx) = broadcast::channel(1);
    let poller = MasterPoller::new("127.0.0.1:1", dir.path().join("conf.json"), Duration::from_millis(20));
    let handle = tokio::spawn(poller.run(rx));

    // Several refused connections go by.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!handle.is_finished());

    tx.send(()).unwrap();
    timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
    assert!(backups(dir.path()).is_empty());
}

#[tokio::test]
async fn test_poller_saves_on_trigger_and_stops_while_parked() {
    let master = common::start_master().await;
    let dir = TempDir::new().unwrap();
    let (tx, rx) = broadcast::channel(1);
    let poller = MasterPoller::new(
        master.addr.to_string(),
        dir.path().join("conf.json"),
        Duration::from_millis(20),
    );
    let handle = tokio::spawn(poller.run(rx));

    master.wait_for_parked("/", 1).await;
    trigger_root(&master).await;

    let mut saved = Vec::new();
    for _ in 0..250 {
        saved = backups(dir.path());
        if !saved.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(saved.len(), 1);

    // Back on the long poll; shutdown must still end the loop.
    master.wait_for_parked("/", 1).await;
    tx.send(()).unwrap();
    timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();

    master.stop().await;
}
