use std::sync::Arc;

use changelog::{ChangelogConfig, MarkdownConverter, SlackConverter};

use crate::color::AccentColor;
use crate::config::{ChangesPolicy, LayoutMode, MessageTemplates, NotifyConfig};
use crate::context::ReleaseContext;
use crate::error::Result;
use crate::payload::{Attachment, Field, NotificationPayload};

pub const RELEASE_INFORMATION: &str = "Release Information";
pub const CHANGES: &str = "Changes";
pub const RELEASE_DETAILS: &str = "Release Details";

/// An assembled notification together with its named outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub payload: NotificationPayload,
    /// The transformed changelog text, also used as the "Changes" field
    pub changes: String,
    pub color: AccentColor,
}

impl Notification {
    #[must_use]
    pub fn color_hex(&self) -> String {
        self.color.to_hex()
    }
}

/// Turns a release context into a notification payload
#[derive(Clone)]
pub struct Assembler {
    config: NotifyConfig,
    converter: Arc<dyn MarkdownConverter>,
}

impl Assembler {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            converter: Arc::new(SlackConverter::new()),
        }
    }

    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn MarkdownConverter>) -> Self {
        self.converter = converter;
        self
    }

    #[must_use]
    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Applies the changes policy without converting markup.
    ///
    /// Categorized bodies become grouped text. A body with no category
    /// structure is returned unchanged.
    #[must_use]
    pub fn group(&self, body: &str) -> String {
        match self.config.changes.policy {
            ChangesPolicy::Raw => body.to_string(),
            ChangesPolicy::Categorized => {
                let changelog_config = ChangelogConfig {
                    skip_empty_categories: self.config.changes.skip_empty_categories,
                };
                changelog::group_changes(body, &changelog_config)
                    .unwrap_or_else(|| body.to_string())
            }
        }
    }

    /// Groups then converts the body into chat markup
    #[must_use]
    pub fn render_changes(&self, body: &str) -> String {
        self.converter.convert(&self.group(body))
    }

    /// Builds the notification with a freshly sampled accent colour.
    ///
    /// Fails with `MissingInput` when the release has no body.
    pub fn assemble(&self, context: &ReleaseContext) -> Result<Notification> {
        let changes = self.render_changes(context.body()?);
        Ok(self.assemble_with(context, changes, AccentColor::random()))
    }

    /// Builds the notification from already transformed changes
    #[must_use]
    pub fn assemble_with(
        &self,
        context: &ReleaseContext,
        changes: String,
        color: AccentColor,
    ) -> Notification {
        let messages = &self.config.message;
        let payload = NotificationPayload {
            text: messages.text.clone(),
            attachments: vec![Attachment {
                fallback: messages.fallback.clone(),
                color: color.to_css(),
                pretext: messages.pretext.clone(),
                fields: self.fields(context, &changes),
            }],
        };

        Notification {
            payload,
            changes,
            color,
        }
    }

    fn fields(&self, context: &ReleaseContext, changes: &str) -> Vec<Field> {
        let changes_field = Field::wide(CHANGES, changes);

        if self.config.changes.layout == LayoutMode::Minimal {
            return vec![changes_field];
        }

        let messages = &self.config.message;
        let values = [
            ("tag", context.tag()),
            ("repository", context.repository()),
            ("author", context.author()),
            ("url", context.html_url()),
        ];

        let mut fields = Vec::with_capacity(3);
        if context.has_release_information() {
            fields.push(Field::wide(
                RELEASE_INFORMATION,
                MessageTemplates::fill(&messages.release_information, &values),
            ));
        }
        fields.push(changes_field);
        if !context.html_url().is_empty() {
            fields.push(Field::wide(
                RELEASE_DETAILS,
                MessageTemplates::fill(&messages.release_details, &values),
            ));
        }
        fields
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(NotifyConfig::default())
    }
}
