use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fcm_push::http::ReqwestTransport;
use fcm_push::{Client, Config, Message, Notification, Priority, Response};

/// fcm-push - Firebase Cloud Messaging sender
///
/// Sends one push notification through the FCM legacy HTTP API and prints the
/// gateway's response as JSON. Connection failures and 5xx responses are
/// retried with exponential backoff.
///
/// Examples:
///   fcm-push send --to <TOKEN> --title Hello --body World
///   fcm-push send --registration-id <ID1> --registration-id <ID2> --data key=value
#[derive(Parser, Debug)]
#[command(author, version = env!("FCM_PUSH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// FCM server key
    #[arg(
        long = "server-key",
        env = "FCM_SERVER_KEY",
        hide_env_values = true,
        value_name = "KEY",
        default_value = "",
        global = true
    )]
    pub server_key: String,

    /// Send endpoint (defaults to https://fcm.googleapis.com/fcm/send)
    #[arg(long, env = "FCM_ENDPOINT", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Retries after the first attempt (default 5, 0 disables retries)
    #[arg(long = "max-retries", env = "FCM_MAX_RETRIES", value_name = "N", global = true)]
    pub max_retries: Option<u32>,

    /// Timeout for each HTTP attempt, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    pub timeout: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a message to a device, a topic, or a list of devices
    Send(SendArgs),
}

#[derive(clap::Args, Debug)]
pub struct SendArgs {
    /// Registration token or /topics/<name>
    #[arg(long, value_name = "TOKEN")]
    pub to: Option<String>,

    /// Registration token of one recipient (repeatable)
    #[arg(long = "registration-id", value_name = "ID")]
    pub registration_ids: Vec<String>,

    /// Topic condition expression
    #[arg(long, value_name = "EXPR")]
    pub condition: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub body: Option<String>,

    /// Custom data entry (repeatable)
    #[arg(long = "data", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub data: Vec<(String, String)>,

    /// Time to live, in seconds
    #[arg(long, value_name = "SECS")]
    pub ttl: Option<u32>,

    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,

    #[arg(long = "collapse-key", value_name = "KEY")]
    pub collapse_key: Option<String>,

    /// Ask the gateway to validate the message without delivering it
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityArg {
    Normal,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Normal => Priority::Normal,
            PriorityArg::High => Priority::High,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

impl SendArgs {
    fn into_message(self) -> Message {
        let notification = if self.title.is_some() || self.body.is_some() {
            Some(Notification {
                title: self.title,
                body: self.body,
                ..Default::default()
            })
        } else {
            None
        };

        Message {
            to: self.to,
            registration_ids: self.registration_ids,
            condition: self.condition,
            collapse_key: self.collapse_key,
            priority: self.priority.map(Priority::from),
            ttl: self.ttl,
            dry_run: self.dry_run,
            data: self.data.into_iter().collect(),
            notification,
            ..Default::default()
        }
    }
}

fn build_client(cli: &Cli) -> Result<Client> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("fcm-push/", env!("FCM_PUSH_VERSION")))
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to build HTTP client")?;

    let mut config =
        Config::new(cli.server_key.clone()).with_transport(Arc::new(ReqwestTransport::new(http)));
    config.max_retries = cli.max_retries;
    config.endpoint = cli.endpoint.clone();

    Ok(Client::new(config))
}

/// Prints per-recipient problems that a successful call can still carry.
fn report(response: &Response) {
    if let Some(error) = &response.error {
        eprintln!("warning: topic delivery failed: {}", error);
    }
    for (index, result) in response.results.iter().enumerate() {
        if let Some(error) = &result.error {
            eprintln!("warning: recipient #{} failed: {}", index, error);
        }
        if result.token_changed() {
            eprintln!(
                "warning: recipient #{} has a new canonical registration id: {}",
                index,
                result.registration_id.as_deref().unwrap_or_default()
            );
        }
    }
}

async fn send(client: &Client, args: SendArgs) -> Result<()> {
    let message = args.into_message();

    let response = client
        .send(&message)
        .await
        .context("Failed to send message")?;

    report(&response);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Send(args) => send(&client, args).await?,
    }
    Ok(())
}
