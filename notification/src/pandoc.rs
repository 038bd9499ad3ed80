//! Client for a remote Markdown converter service.
//!
//! The service takes `{"markdown": "..."}` and answers with the converted
//! text as the response body. It replaces the built-in dialect converter when
//! selected; categorization still runs locally first.

use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

use crate::config::DeliveryConfig;
use crate::error::{NotifyError, Result};
use crate::webhook::parse_endpoint;

pub const DEFAULT_PANDOC_URL: &str = "http://pandoc:8080";

#[derive(Serialize)]
struct ConvertRequest<'a> {
    markdown: &'a str,
}

#[derive(Clone)]
pub struct PandocClient {
    client: Client,
    url: Url,
}

impl PandocClient {
    pub fn new(url: &str, config: &DeliveryConfig) -> Result<Self> {
        let url = parse_endpoint(url, "converter")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, url })
    }

    pub async fn convert(&self, markdown: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&ConvertRequest { markdown })
            .send()
            .await
            .map_err(|e| NotifyError::converter(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NotifyError::converter(format!(
                "{} answered {}: {}",
                self.url,
                status.as_u16(),
                body.trim()
            )));
        }

        Ok(body.trim_end().to_string())
    }
}
