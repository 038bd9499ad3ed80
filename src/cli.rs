use clap::{Parser, Subcommand, ValueEnum};
use notification::{ChangesPolicy, DEFAULT_CONFIG_FILE, DEFAULT_PANDOC_URL, LayoutMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "release-notify")]
#[command(
    author,
    version,
    about = "Turn release changelogs into chat notifications"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the notification for a published release and post it to the webhook
    Send {
        /// Incoming webhook URL the payload is posted to
        #[clap(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
        webhook_url: Option<String>,

        /// Release event payload written by the CI runner
        #[clap(long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<PathBuf>,

        /// Configuration file path (ignored when missing)
        #[clap(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Fields to include in the attachment (overrides the config file)
        #[clap(long, value_enum)]
        layout: Option<Layout>,

        /// How the changelog is grouped before conversion (overrides the config file)
        #[clap(long, value_enum)]
        policy: Option<Policy>,

        /// Markdown converter used for the changes text
        #[clap(long, value_enum, default_value_t = ConverterKind::Builtin)]
        converter: ConverterKind,

        /// Address of the remote converter service (only used with --converter pandoc)
        #[clap(long, env = "PANDOC_URL", default_value = DEFAULT_PANDOC_URL)]
        pandoc_url: String,

        /// Fixed accent colour as hex digits instead of a random one
        #[clap(long, env = "ACCENT_COLOR")]
        color: Option<String>,

        /// File that receives the `changes` and `color_hex` step outputs
        #[clap(long, env = "GITHUB_OUTPUT")]
        output_file: Option<PathBuf>,

        /// Print the payload instead of posting it
        #[clap(long, default_value_t = false)]
        dry_run: bool,

        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },

    /// Print the chat-formatted changes of a Markdown file
    Preview {
        /// Markdown file to convert
        file: PathBuf,

        /// How the changelog is grouped before conversion
        #[clap(long, value_enum, default_value_t = Policy::Categorized)]
        policy: Policy,

        /// List the detected categories instead of the converted text
        #[clap(long, default_value_t = false)]
        categories: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Release information, changes and release link
    Full,
    /// Changes only
    Minimal,
}

impl From<Layout> for LayoutMode {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Full => LayoutMode::Full,
            Layout::Minimal => LayoutMode::Minimal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Group `## heading` sections into category blocks
    Categorized,
    /// Convert the body as written
    Raw,
}

impl From<Policy> for ChangesPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Categorized => ChangesPolicy::Categorized,
            Policy::Raw => ChangesPolicy::Raw,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConverterKind {
    /// Built-in Markdown to chat markup pipeline
    Builtin,
    /// Remote converter service
    Pandoc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_flags() {
        let cli = Cli::try_parse_from([
            "release-notify",
            "send",
            "--webhook-url",
            "https://hooks.example.com/x",
            "--layout",
            "minimal",
            "--policy",
            "raw",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Send {
                webhook_url,
                layout,
                policy,
                converter,
                dry_run,
                ..
            } => {
                assert_eq!(webhook_url.as_deref(), Some("https://hooks.example.com/x"));
                assert_eq!(layout, Some(Layout::Minimal));
                assert_eq!(policy, Some(Policy::Raw));
                assert_eq!(converter, ConverterKind::Builtin);
                assert!(dry_run);
            }
            Commands::Preview { .. } => panic!("expected send"),
        }
    }
}
