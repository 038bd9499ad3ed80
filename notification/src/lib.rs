//! Release notification assembly and delivery
//!
//! Builds a chat webhook payload from a [`ReleaseContext`]: the changelog is
//! grouped and converted by the `changelog` crate, wrapped in a fixed field
//! layout with a random accent colour, and posted by a [`WebhookSender`].

pub mod assembler;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod pandoc;
pub mod payload;
pub mod runner;
pub mod testing;
pub mod traits;
pub mod webhook;

pub use assembler::{Assembler, CHANGES, Notification, RELEASE_DETAILS, RELEASE_INFORMATION};
pub use color::AccentColor;
pub use config::{
    ChangesConfig, ChangesPolicy, DEFAULT_CONFIG_FILE, DeliveryConfig, LayoutMode,
    MessageTemplates, NotifyConfig, PLACEHOLDERS,
};
pub use context::ReleaseContext;
pub use error::{NotifyError, Result};
pub use pandoc::{DEFAULT_PANDOC_URL, PandocClient};
pub use payload::{Attachment, Field, NotificationPayload};
pub use runner::ReleaseNotifier;
pub use traits::WebhookSender;
pub use webhook::WebhookClient;
