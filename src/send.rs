use crate::cli::{ConverterKind, Layout, Policy};
use crate::error::{CliError, Result, ResultExt};
use crate::event::{self, ContextSource};
use crate::outputs;
use crate::progress::ProgressTracker;
use crate::ui;
use notification::{
    AccentColor, Assembler, NotificationPayload, NotifyConfig, PandocClient, ReleaseNotifier,
    WebhookClient, WebhookSender,
};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct SendArgs {
    pub webhook_url: Option<String>,
    pub event_path: Option<PathBuf>,
    pub config_path: PathBuf,
    pub layout: Option<Layout>,
    pub policy: Option<Policy>,
    pub converter: ConverterKind,
    pub pandoc_url: String,
    pub color: Option<String>,
    pub output_file: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Delivery target selected on the command line
enum Delivery {
    Webhook(WebhookClient),
    DryRun,
}

impl WebhookSender for Delivery {
    async fn send(&self, payload: &NotificationPayload) -> notification::Result<()> {
        match self {
            Self::Webhook(client) => client.send(payload).await,
            Self::DryRun => {
                println!("{}", payload.to_json_pretty()?);
                Ok(())
            }
        }
    }
}

pub fn execute(args: SendArgs) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(execute_async(args))
}

async fn execute_async(args: SendArgs) -> Result<()> {
    configure_status_output(&args);

    let mut progress = ProgressTracker::new("Release Notification").with_steps([
        "Loading configuration",
        "Reading release",
        "Building notification",
        "Writing step outputs",
        "Delivering notification",
    ]);

    progress.start_step();
    let config = load_config(&args)?;
    progress.complete_step();

    progress.start_step();
    let env = event::env_snapshot();
    let (context, source) = event::load_release_context(args.event_path.as_deref(), &env)?;
    if args.verbose {
        ui::info_message(&format!(
            "Release {} of {} read from {}",
            display_or_unknown(context.tag()),
            display_or_unknown(context.repository()),
            source.describe()
        ));
    }
    if source == ContextSource::Environment && args.event_path.is_some() {
        ui::warning_message("Event payload has no release, using environment variables");
    }
    progress.complete_step();

    progress.start_step();
    let notifier = build_notifier(&args, config)?;
    let notification = notifier
        .prepare(&context)
        .await
        .with_context(|| "Failed to build the notification")?;
    if args.verbose {
        ui::detail_block("changes", &notification.changes);
        ui::info_message(&format!("Accent colour: #{}", notification.color_hex()));
    }
    progress.complete_step();

    progress.start_step();
    match &args.output_file {
        Some(path) => {
            let color_hex = notification.color_hex();
            outputs::write_step_outputs(
                path,
                &[("changes", &notification.changes), ("color_hex", &color_hex)],
            )?;
            progress.complete_step();
        }
        None => progress.skip_step("no output file configured"),
    }

    progress.start_step();
    notifier
        .deliver(&notification)
        .await
        .with_context(|| "Failed to deliver the notification")?;
    progress.complete_step();

    progress.complete();
    Ok(())
}

/// A dry run owns stdout for the payload JSON
fn configure_status_output(args: &SendArgs) {
    if args.dry_run {
        ui::route_status_to_stderr();
    }
}

fn load_config(args: &SendArgs) -> Result<NotifyConfig> {
    let mut config = NotifyConfig::load_or_default(&args.config_path)
        .with_context(|| format!("Failed to load {}", args.config_path.display()))?;

    if let Some(layout) = args.layout {
        config.changes.layout = layout.into();
    }
    if let Some(policy) = args.policy {
        config.changes.policy = policy.into();
    }

    if args.verbose {
        ui::info_message(&format!(
            "Layout: {:?}, policy: {:?}, timeout: {}s",
            config.changes.layout, config.changes.policy, config.delivery.timeout_seconds
        ));
    }

    Ok(config)
}

fn build_notifier(args: &SendArgs, config: NotifyConfig) -> Result<ReleaseNotifier<Delivery>> {
    let delivery = if args.dry_run {
        Delivery::DryRun
    } else {
        let url = args
            .webhook_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(CliError::MissingWebhookUrl)?;
        Delivery::Webhook(WebhookClient::new(url, &config.delivery)?)
    };

    let remote_converter = match args.converter {
        ConverterKind::Pandoc => Some(PandocClient::new(&args.pandoc_url, &config.delivery)?),
        ConverterKind::Builtin => None,
    };

    let mut notifier = ReleaseNotifier::new(Assembler::new(config), delivery);
    if let Some(converter) = remote_converter {
        notifier = notifier.with_remote_converter(converter);
    }
    if let Some(color) = &args.color {
        let color: AccentColor = color.parse().with_context(|| "Invalid --color")?;
        notifier = notifier.with_color(color);
    }

    Ok(notifier)
}

fn display_or_unknown(value: &str) -> &str {
    if value.is_empty() { "(unknown)" } else { value }
}
