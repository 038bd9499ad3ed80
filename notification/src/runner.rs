use crate::assembler::{Assembler, Notification};
use crate::color::AccentColor;
use crate::context::ReleaseContext;
use crate::error::Result;
use crate::pandoc::PandocClient;
use crate::traits::WebhookSender;

/// Drives one release through assembly and delivery
pub struct ReleaseNotifier<S: WebhookSender> {
    assembler: Assembler,
    sender: S,
    remote_converter: Option<PandocClient>,
    color: Option<AccentColor>,
}

impl<S: WebhookSender> ReleaseNotifier<S> {
    pub fn new(assembler: Assembler, sender: S) -> Self {
        Self {
            assembler,
            sender,
            remote_converter: None,
            color: None,
        }
    }

    /// Convert through a remote service instead of the built-in converter
    #[must_use]
    pub fn with_remote_converter(mut self, converter: PandocClient) -> Self {
        self.remote_converter = Some(converter);
        self
    }

    /// Use a fixed accent colour instead of sampling one
    #[must_use]
    pub fn with_color(mut self, color: AccentColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Builds the notification without delivering it
    pub async fn prepare(&self, context: &ReleaseContext) -> Result<Notification> {
        let body = context.body()?;

        let changes = match &self.remote_converter {
            Some(converter) => converter.convert(&self.assembler.group(body)).await?,
            None => self.assembler.render_changes(body),
        };
        let color = self.color.unwrap_or_else(AccentColor::random);

        Ok(self.assembler.assemble_with(context, changes, color))
    }

    /// Delivers an already prepared notification
    pub async fn deliver(&self, notification: &Notification) -> Result<()> {
        self.sender.send(&notification.payload).await
    }

    /// Prepares and delivers. Nothing is sent when preparation fails.
    pub async fn notify(&self, context: &ReleaseContext) -> Result<Notification> {
        let notification = self.prepare(context).await?;
        self.deliver(&notification).await?;
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{CHANGES, RELEASE_DETAILS, RELEASE_INFORMATION};
    use crate::error::NotifyError;
    use crate::testing::RecordingSender;

    fn context(body: Option<&str>) -> ReleaseContext {
        let context = ReleaseContext::new("v1.0.0", "acme/widgets", "octocat", "https://x.test/r");
        match body {
            Some(body) => context.with_body(body),
            None => context,
        }
    }

    #[tokio::test]
    async fn test_notify_sends_once() {
        let notifier = ReleaseNotifier::new(Assembler::default(), RecordingSender::new())
            .with_color(AccentColor::new(0x123456).unwrap());

        let notification = notifier.notify(&context(Some("## Added\n- x"))).await.unwrap();

        let sent = notifier.sender().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], notification.payload);
        assert_eq!(notification.color_hex(), "123456");
        assert_eq!(notification.changes, "*Added*:\n- x");
    }

    #[tokio::test]
    async fn test_missing_body_sends_nothing() {
        for body in [None, Some(""), Some("   \n")] {
            let notifier = ReleaseNotifier::new(Assembler::default(), RecordingSender::new());

            let err = notifier.notify(&context(body)).await.unwrap_err();

            assert!(matches!(err, NotifyError::MissingInput));
            assert_eq!(notifier.sender().attempts(), 0);
        }
    }

    #[tokio::test]
    async fn test_delivery_failure_is_surfaced() {
        let sender = RecordingSender::new().with_failure(404, "no_service");
        let notifier = ReleaseNotifier::new(Assembler::default(), sender);

        let err = notifier.notify(&context(Some("- x"))).await.unwrap_err();

        assert!(err.is_delivery_failure());
        assert_eq!(notifier.sender().attempts(), 1);
    }

    #[tokio::test]
    async fn test_field_order_is_fixed() {
        let notifier = ReleaseNotifier::new(Assembler::default(), RecordingSender::new());
        let notification = notifier.prepare(&context(Some("text"))).await.unwrap();

        assert_eq!(
            notification.payload.field_titles(),
            vec![RELEASE_INFORMATION, CHANGES, RELEASE_DETAILS]
        );
        assert_eq!(notifier.sender().attempts(), 0);
    }
}
