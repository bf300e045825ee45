//! Best-effort email notifications.
//!
//! `spawn_send` detaches the send from the response path: a submission
//! succeeds or fails on its own merits and a dead mail relay only produces a
//! warning in the logs.

pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay request failed: {0}")]
    Relay(String),

    #[error("mail relay returned status {0}")]
    Status(u16),
}

/// Fire-and-forget mail sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts messages to an HTTP mail relay.
pub struct HttpMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl HttpMailer {
    pub fn new(relay_url: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html: html_body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailError::Relay(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Logs instead of sending. Used when no relay is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), MailError> {
        info!(%to, %subject, "mail relay not configured; dropping email");
        Ok(())
    }
}

/// Sends off the response path. Errors are swallowed after logging; a
/// notification failure must never fail or roll back the caller's request.
pub fn spawn_send(mailer: Arc<dyn Mailer>, to: String, subject: String, html_body: String) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &html_body).await {
            warn!(%to, "notification email failed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingMailer {
        sent: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for CountingMailer {
        async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), MailError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(MailError::Status(502))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_spawn_send_delivers() {
        let sent = Arc::new(AtomicUsize::new(0));
        let mailer = Arc::new(CountingMailer {
            sent: sent.clone(),
            fail: false,
        });

        spawn_send(
            mailer,
            "a@example.com".to_string(),
            "hi".to_string(),
            "<p>hi</p>".to_string(),
        );
        tokio::task::yield_now().await;
        // The spawned task may need a beat on a busy runtime.
        for _ in 0..100 {
            if sent.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spawn_send_swallows_failure() {
        let sent = Arc::new(AtomicUsize::new(0));
        let mailer = Arc::new(CountingMailer {
            sent: sent.clone(),
            fail: true,
        });

        // Must not panic or propagate.
        spawn_send(
            mailer,
            "a@example.com".to_string(),
            "hi".to_string(),
            "<p>hi</p>".to_string(),
        );
        for _ in 0..100 {
            if sent.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        assert!(LogMailer.send("a@b.c", "s", "<p></p>").await.is_ok());
    }
}
