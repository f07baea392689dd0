//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::cli::say::run_say;
use crate::core::chat_client::{ClientSettings, CompletionClient, HistoryMode};
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::controller::ChatController;
use crate::core::history::{InMemoryHistoryStore, SessionId};
use crate::logging::init_tracing;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "sessionchat", version)]
#[command(about = "A terminal chat interface with per-session history")]
#[command(
    long_about = "sessionchat is a terminal chat interface that forwards your messages to a hosted \
chat-completion API (Groq by default) and keeps a separate in-memory transcript for every \
session id. Nothing is saved when the program exits.\n\n\
Environment Variables:\n\
  GROQ_API_KEY      API key for the completion service (read from .env as well)\n\
  RUST_LOG          Log filter used together with --log-file\n\
  NO_COLOR          Disable colours in the transcript\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message / activate the selected button\n\
  Tab               Switch between the session id field and the message field\n\
  Left/Right        Choose between Continue Chat and Clear History\n\
  c / x             Continue Chat / Clear History\n\
  PageUp/PageDown   Scroll through chat history\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to use for chat
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Session id to start in
    #[arg(short = 's', long, global = true, value_name = "ID")]
    pub session: Option<String>,

    /// Send the whole session history with each message instead of only the newest one
    #[arg(long, global = true)]
    pub full_history: bool,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message without the TUI and print the reply
    Say {
        /// Message to send (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write a config file with every default spelled out
        #[arg(long)]
        init: bool,
    },
}

impl Args {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(session) = &self.session {
            config.default_session = Some(session.clone());
        }
        if self.full_history {
            config.history_mode = Some(HistoryMode::FullHistory);
        }
        config
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if let Err(err) = runtime.block_on(async_main()) {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let dotenv_path = dotenvy::dotenv().ok();
    init_tracing(args.log_file.as_deref())?;
    if let Some(path) = &dotenv_path {
        debug!(path = %path_display(path), "loaded .env");
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };
    let config = args.apply_overrides(Config::load_from_path(&config_path)?);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            info!(model = config.model(), base_url = config.base_url(), "starting chat");
            let client = CompletionClient::new(ClientSettings::from_config(&config))?;
            let controller = ChatController::new(
                InMemoryHistoryStore::new(),
                client,
                SessionId::from(config.default_session()),
            );
            run_chat(controller, Theme::from_env()).await
        }
        Commands::Say { prompt } => run_say(prompt, &config).await,
        Commands::Config { init } => show_config(&config_path, &config, init),
    }
}

fn show_config(path: &Path, config: &Config, init: bool) -> Result<(), Box<dyn Error>> {
    if init {
        if path.exists() {
            eprintln!(
                "⚠️  Config already exists at {}; leaving it unchanged",
                path_display(path)
            );
        } else {
            Config::with_defaults().save_to_path(path)?;
            println!("✅ Wrote default config to {}", path_display(path));
        }
    }

    println!("Config file: {}", path_display(path));
    config.print_all();
    Ok(())
}
