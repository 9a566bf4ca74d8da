//! waconsole CLI
//!
//! Command-line console for the assistant backend: an embedded chat
//! widget plus one-shot conversation and analytics commands.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use application::{ConsoleService, HistoryMessage, WidgetSession};
use clap::{Parser, Subcommand};
use domain::{DisplayName, WaId, WidgetPosition};
use infrastructure::{AppConfig, init_tracing, log_filter_from_verbosity};
use integration_webhook::WebhookClient;
use tracing::debug;

/// waconsole CLI
#[derive(Parser)]
#[command(name = "waconsole")]
#[command(author, version, about = "Chat widget and console for the assistant backend", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the embedded chat widget
    Chat {
        /// Conversation id to resume (a fresh anonymous id is minted when omitted)
        #[arg(long)]
        wa_id: Option<String>,

        /// Display name sent with each message
        #[arg(short, long)]
        name: Option<String>,

        /// Anchor: bottom-right, bottom-left, top-right, top-left or center
        #[arg(short, long)]
        position: Option<String>,

        /// Center the widget (same as --position center)
        #[arg(long, conflicts_with = "position")]
        fullscreen: bool,

        /// Widget header title
        #[arg(long)]
        title: Option<String>,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Send one message and print the reply
    Send {
        /// Message to send
        message: String,

        /// Conversation id to send as
        #[arg(long)]
        wa_id: String,

        /// Display name sent with the message
        #[arg(short, long)]
        name: Option<String>,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show the stored transcript for a conversation
    History {
        /// Conversation id to inspect
        wa_id: String,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Hand a conversation back to the assistant after a human takeover
    ResetHandover {
        /// Conversation id to reset
        wa_id: String,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Delete a conversation permanently
    Delete {
        /// Conversation id to delete
        wa_id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Send one message to many conversations
    Broadcast {
        /// Message to send
        message: String,

        /// Recipient conversation id (repeatable)
        #[arg(long = "to", value_name = "WA_ID", required = true)]
        to: Vec<String>,

        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show aggregate usage counters
    Analytics {
        /// Backend base URL (overrides config file and environment)
        #[arg(short, long)]
        url: Option<String>,
    },
}

/// Load the layered configuration, letting a `--url` flag win.
fn load_config(url: Option<String>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(url) = url {
        config.api.base_url = url;
    }
    Ok(config)
}

fn console_service(config: AppConfig) -> anyhow::Result<ConsoleService> {
    let client = WebhookClient::new(config.api)?;
    Ok(ConsoleService::new(Arc::new(client)))
}

/// One printable transcript row.
fn history_line(message: &HistoryMessage) -> String {
    let stamp = message.timestamp.as_deref().unwrap_or("--");
    format!("[{stamp}] {}: {}", message.role, message.content)
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);
    let interactive = matches!(cli.command, Commands::Chat { .. });
    // The widget owns the terminal, so stay quiet there unless asked.
    if !interactive || cli.verbose > 0 {
        init_tracing(filter);
    }

    match cli.command {
        Commands::Chat {
            wa_id,
            name,
            position,
            fullscreen,
            title,
            url,
        } => {
            let mut config = load_config(url)?;
            if let Some(wa_id) = wa_id {
                config.widget.wa_id = Some(wa_id);
            }
            if let Some(name) = name {
                config.widget.name = name;
            }
            if let Some(position) = position {
                config.widget.position = position.parse::<WidgetPosition>()?;
            }
            if fullscreen {
                config.widget.position = WidgetPosition::Center;
            }
            if let Some(title) = title {
                config.widget.title = title;
            }
            debug!(base_url = %config.api.base_url, "Configuration loaded");

            let widget_config = config.widget.to_widget_config()?;
            let gateway = Arc::new(WebhookClient::new(config.api)?);
            let session = WidgetSession::new(widget_config, gateway);

            presentation_tui::run(session).await?;
        },

        Commands::Send {
            message,
            wa_id,
            name,
            url,
        } => {
            let service = console_service(load_config(url)?)?;
            let wa_id = WaId::new(wa_id)?;
            let name = match name {
                Some(name) => DisplayName::new(name)?,
                None => DisplayName::default(),
            };

            println!("💬 Sending to {}", wa_id.as_str());

            match service.send_direct(&wa_id, &name, &message).await {
                Ok(reply) => {
                    println!();
                    println!("🤖 {}", reply.text);
                },
                Err(e) => {
                    println!("❌ Send failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::History { wa_id, url } => {
            let service = console_service(load_config(url)?)?;
            let wa_id = WaId::new(wa_id)?;

            match service.history(&wa_id).await {
                Ok(snapshot) => {
                    println!("📜 Conversation {}", snapshot.wa_id);
                    println!(
                        "   Handled by: {}",
                        if snapshot.handover_triggered {
                            "human agent"
                        } else {
                            "assistant"
                        }
                    );
                    println!("   Fallbacks:  {}", snapshot.fallback_count);
                    println!();

                    if snapshot.last_messages.is_empty() {
                        println!("(no stored messages)");
                    }
                    for message in &snapshot.last_messages {
                        println!("{}", history_line(message));
                    }
                },
                Err(e) => {
                    println!("❌ History lookup failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::ResetHandover { wa_id, url } => {
            let service = console_service(load_config(url)?)?;
            let wa_id = WaId::new(wa_id)?;

            println!("🤝 Handing {} back to the assistant...", wa_id.as_str());

            match service.reset_handover(&wa_id).await {
                Ok(ack) => println!("✅ {}", ack.message),
                Err(e) => {
                    println!("❌ Reset failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Delete { wa_id, yes, url } => {
            if !yes {
                println!("❌ Deleting a conversation is permanent. Re-run with --yes to confirm.");
                std::process::exit(1);
            }

            let service = console_service(load_config(url)?)?;
            let wa_id = WaId::new(wa_id)?;

            match service.delete_conversation(&wa_id).await {
                Ok(ack) => println!("🗑️  {}", ack.message),
                Err(e) => {
                    println!("❌ Delete failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Broadcast { message, to, url } => {
            let service = console_service(load_config(url)?)?;

            println!("📣 Broadcasting to {} recipient(s)...", to.len());

            match service.broadcast(&to, &message).await {
                Ok(outcome) => {
                    println!("✅ {}", outcome.message);
                    println!("   Delivered: {}", outcome.successes.len());
                    if !outcome.failures.is_empty() {
                        println!("   Failed:    {}", outcome.failures.len());
                        for wa_id in &outcome.failures {
                            println!("     - {wa_id}");
                        }
                    }
                },
                Err(e) => {
                    println!("❌ Broadcast failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Analytics { url } => {
            let service = console_service(load_config(url)?)?;

            match service.analytics().await {
                Ok(snapshot) => {
                    println!("📊 Usage:");
                    println!("   Active users:   {}", snapshot.active_users);
                    println!("   Handovers:      {}", snapshot.handovers);
                    println!("   Total messages: {}", snapshot.total_messages);
                },
                Err(e) => {
                    println!("❌ Analytics fetch failed: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
