#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bhv360_core::channels::Channel;
use bhv360_core::notification::Notification;
use bhv360_events::{ChannelSender, DeliveryError, NotificationDispatcher, StaticChannelResolver};
use http_body_util::BodyExt;
use tower::ServiceExt;

use bhv360_api::config::ServerConfig;
use bhv360_api::router::build_app_router;
use bhv360_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        channel_timeout_secs: 20,
        bulk_concurrency: 4,
        default_channels: vec![Channel::Push],
    }
}

/// Channel sender that fails for notifications whose title matches one of
/// `failing_titles`, optionally stalls first, and counts how often it was
/// called.
pub struct FakeSender {
    channel: Channel,
    failing_titles: Vec<String>,
    delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeSender {
    pub fn ok(channel: Channel) -> Arc<Self> {
        Self::failing_on(channel, &[])
    }

    pub fn failing_on(channel: Channel, titles: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            channel,
            failing_titles: titles.iter().map(|t| t.to_string()).collect(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    /// A sender whose provider never answers within any test deadline.
    pub fn hanging(channel: Channel) -> Arc<Self> {
        Arc::new(Self {
            channel,
            failing_titles: Vec::new(),
            delay: Duration::from_secs(3600),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelSender for FakeSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.failing_titles.contains(&notification.title) {
            return Err(DeliveryError::Failed(format!(
                "{} provider rejected the message",
                self.channel
            )));
        }
        Ok(())
    }
}

/// Build a dispatcher with the default push-only resolver and the given
/// senders.
pub fn dispatcher_with(senders: Vec<Arc<FakeSender>>) -> NotificationDispatcher {
    let config = test_config();
    let resolver = StaticChannelResolver::new(&config.default_channels);
    let dispatcher = NotificationDispatcher::new(Arc::new(resolver))
        .with_channel_timeout(Duration::from_secs(config.channel_timeout_secs))
        .with_bulk_concurrency(config.bulk_concurrency);
    senders
        .into_iter()
        .fold(dispatcher, |d, s| d.with_sender(s))
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs` so integration tests exercise the
/// production middleware stack.
pub fn build_test_app(dispatcher: NotificationDispatcher) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(dispatcher),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
