use reqwest::{Client, Url};
use std::time::Duration;

use crate::config::DeliveryConfig;
use crate::error::{NotifyError, Result};
use crate::payload::NotificationPayload;
use crate::traits::WebhookSender;

/// Posts payloads as JSON to an incoming-webhook URL
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: Url,
}

impl WebhookClient {
    /// Create a new webhook client with delivery configuration
    pub fn new(url: &str, config: &DeliveryConfig) -> Result<Self> {
        let url = parse_endpoint(url, "webhook")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl WebhookSender for WebhookClient {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::delivery_failed(status.as_u16(), body.trim()))
    }
}

pub(crate) fn parse_endpoint(url: &str, what: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(NotifyError::invalid_config(format!("{what} URL is empty")));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| NotifyError::invalid_config(format!("invalid {what} URL '{trimmed}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(NotifyError::invalid_config(format!(
            "{what} URL must use http or https, got '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_urls() {
        let config = DeliveryConfig::default();

        for url in ["", "   ", "not a url", "ftp://hooks.example.com/x"] {
            let err = WebhookClient::new(url, &config).err().unwrap();
            assert!(matches!(err, NotifyError::InvalidConfig { .. }), "url: {url:?}");
        }
    }

    #[test]
    fn test_accepts_https_url() {
        let client =
            WebhookClient::new(" https://hooks.example.com/services/T0/B0/xyz ", &DeliveryConfig::default())
                .unwrap();
        assert_eq!(client.url().host_str(), Some("hooks.example.com"));
    }
}
