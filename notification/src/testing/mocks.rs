use std::sync::{Arc, Mutex};

use crate::error::{NotifyError, Result};
use crate::payload::NotificationPayload;
use crate::traits::WebhookSender;

/// Webhook sender that records every payload instead of posting it
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<NotificationPayload>>>,
    failure: Option<(u16, String)>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send is recorded and then rejected with the given status
    pub fn with_failure(mut self, status: u16, body: &str) -> Self {
        self.failure = Some((status, body.to_string()));
        self
    }

    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn attempts(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }
}

impl WebhookSender for RecordingSender {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(payload.clone());
        }

        match &self.failure {
            Some((status, body)) => Err(NotifyError::delivery_failed(*status, body.clone())),
            None => Ok(()),
        }
    }
}
