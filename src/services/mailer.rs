//! Outgoing mail.
//!
//! Delivery itself is out of scope; the default sender only records the link
//! in the logs so a developer can follow it.
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, link: &Url) -> Result<(), MailError>;
}

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, to: &str, link: &Url) -> Result<(), MailError> {
        tracing::info!(to = %to, link = %link, "verification email");
        Ok(())
    }
}

#[cfg(test)]
pub mod recording {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every sent verification link, keyed by recipient.
    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<(String, Url)>>,
    }

    impl RecordingMailer {
        pub fn last_link_for(&self, to: &str) -> Option<Url> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(recipient, _)| recipient == to)
                .map(|(_, link)| link.clone())
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_verification(&self, to: &str, link: &Url) -> Result<(), MailError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), link.clone()));
            Ok(())
        }
    }
}
