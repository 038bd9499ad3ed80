use crate::error::Result;
use crate::payload::NotificationPayload;
use std::future::Future;

/// Trait for delivering a notification payload
pub trait WebhookSender: Send + Sync {
    /// Post the payload once. Retrying is left to the caller.
    fn send(&self, payload: &NotificationPayload) -> impl Future<Output = Result<()>> + Send;
}
