//! Background Task Tests
//!
//! Tasks run against loopback servers standing in for the message sender
//! and hook targets.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use service_rating::application::tasks::{DeliverHookJob, Job, JobExecutor, TaskError};
use service_rating::domain::Invite;
use service_rating::infrastructure::clients::{HttpHookDeliverer, HttpMessageSender};
use service_rating::infrastructure::queue::{InMemoryJobQueue, JobQueue, Worker};

use crate::common::{StaticInviteRepository, StubServer, INVITE_TEXT};

fn invite(data: Value) -> Invite {
    Invite::new("8a1c", data.as_object().cloned().unwrap_or_default())
}

fn executor(sender_base: &str, invites: Vec<Invite>) -> JobExecutor {
    let client = reqwest::Client::new();
    JobExecutor::new(
        Arc::new(StaticInviteRepository::with(invites)),
        Arc::new(HttpMessageSender::new(client.clone(), sender_base, "sender-secret")),
        Arc::new(HttpHookDeliverer::new(client, "hook-secret")),
        INVITE_TEXT,
    )
}

fn hook_job(target: String) -> Job {
    Job::DeliverHook(DeliverHookJob {
        target,
        payload: json!({"event": "created"}),
        instance_id: None,
        hook_id: 7,
    })
}

#[tokio::test]
async fn test_send_invite_message_reports_message_id() {
    let sender = StubServer::start(StatusCode::CREATED, json!({"id": "abc123"})).await;
    let invite = invite(json!({"to_addr": "+27123456789"}));
    let invite_id = invite.id;
    let executor = executor(&sender.url("/api/v1"), vec![invite]);

    let result = executor
        .execute(&Job::SendInviteMessage { invite_id })
        .await
        .unwrap();

    assert_eq!(result, "Message queued for send. ID: <abc123>");

    let requests = sender.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/v1/outbound/");
    assert_eq!(requests[0].header("authorization"), Some("Token sender-secret"));
    assert_eq!(
        requests[0].body,
        json!({"to_addr": "+27123456789", "content": INVITE_TEXT, "metadata": {}})
    );
}

#[tokio::test]
async fn test_send_invite_message_surfaces_api_errors() {
    let sender = StubServer::start(StatusCode::BAD_REQUEST, json!({"to_addr": ["invalid"]})).await;
    let invite = invite(json!({"to_addr": "nope", "content": "hi"}));
    let invite_id = invite.id;
    let executor = executor(&sender.url("/api/v1"), vec![invite]);

    let err = executor
        .execute(&Job::SendInviteMessage { invite_id })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("400"));
    assert_eq!(sender.requests().len(), 1);
}

#[tokio::test]
async fn test_send_invite_message_for_unknown_invite_sends_nothing() {
    let sender = StubServer::start(StatusCode::CREATED, json!({"id": "abc123"})).await;
    let executor = executor(&sender.url("/api/v1"), vec![]);
    let invite_id = uuid::Uuid::new_v4();

    let err = executor
        .execute(&Job::SendInviteMessage { invite_id })
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::InviteNotFound(id) if id == invite_id));
    assert!(sender.requests().is_empty());
}

#[tokio::test]
async fn test_hook_delivery_posts_once_and_ignores_status() {
    let target = StubServer::start(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
    let executor = executor("http://127.0.0.1:1/api/v1", vec![]);

    let result = executor.execute(&hook_job(target.url("/hook"))).await;
    assert!(result.is_ok());

    // Give a retry, if there were one, the chance to arrive
    tokio::time::sleep(Duration::from_millis(100)).await;

    let requests = target.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/hook");
    assert_eq!(requests[0].body, json!({"event": "created"}));
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    assert_eq!(requests[0].header("authorization"), Some("Token hook-secret"));
}

#[tokio::test]
async fn test_worker_pool_drains_queue() {
    let target = StubServer::start(StatusCode::OK, json!({})).await;
    let queue = Arc::new(InMemoryJobQueue::new());
    queue.enqueue(hook_job(target.url("/a"))).await.unwrap();
    queue.enqueue(hook_job(target.url("/b"))).await.unwrap();

    let executor = Arc::new(executor("http://127.0.0.1:1/api/v1", vec![]));
    let handle = Worker::new(queue.clone(), executor, 2, Duration::from_millis(10)).spawn();

    let requests = target.wait_for(2, Duration::from_secs(5)).await;
    handle.shutdown().await;

    let mut paths: Vec<String> = requests.into_iter().map(|r| r.path).collect();
    paths.sort();
    assert_eq!(paths, vec!["/a", "/b"]);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_worker_runs_failed_job_once() {
    let sender = StubServer::start(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    let invite = invite(json!({"to_addr": "+27123456789"}));
    let invite_id = invite.id;

    let queue = Arc::new(InMemoryJobQueue::new());
    queue.enqueue(Job::SendInviteMessage { invite_id }).await.unwrap();

    let executor = Arc::new(executor(&sender.url("/api/v1"), vec![invite]));
    let handle = Worker::new(queue.clone(), executor, 2, Duration::from_millis(10)).spawn();

    sender.wait_for(1, Duration::from_secs(5)).await;
    // Leave the loops time to pick the job up again if it were re-queued
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.shutdown().await;

    assert_eq!(sender.requests().len(), 1);
    assert!(queue.is_empty());
}
