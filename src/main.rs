mod common;
mod config;
mod format;
mod network;
mod ui;

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use common::ChatMessage;
use config::AppConfig;
use format::Rendered;
use network::{ChatClient, HttpChatBackend};
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "travel-chat",
    version,
    about = "Desktop chat client for the travel assistant"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat server, overrides the config file
    #[arg(long, env = "TRAVEL_CHAT_SERVER", value_name = "URL")]
    server: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Send a single message and print the rendered reply
    Ask { message: String },
    /// Format a reply read from FILE (or stdin) and print the result
    Format {
        file: Option<PathBuf>,
        /// Print only the visible text of the formatted reply
        #[arg(long)]
        strip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(server) = cli.server {
        app_config.server_url = server;
    }

    match cli.mode {
        Some(Mode::Ask { message }) => run_ask(&app_config, &message).await,
        Some(Mode::Format { file, strip }) => run_format(file.as_deref(), strip),
        None => run_full_client(app_config).await,
    }
}

async fn run_ask(app_config: &AppConfig, message: &str) -> Result<(), Box<dyn Error>> {
    let message = message.trim();
    if message.is_empty() {
        log::warn!("Message is empty; nothing to send");
        return Ok(());
    }

    let backend = HttpChatBackend::new(app_config.chat_endpoint());
    log::info!("Sending message to {}", backend.endpoint());

    let reply = network::fetch_bot_response(&backend, message).await;
    print_rendered(&ChatMessage::bot(reply));
    Ok(())
}

fn run_format(file: Option<&Path>, strip: bool) -> Result<(), Box<dyn Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let message = ChatMessage::bot(text);
    match format::render(&message) {
        Rendered::Markup(markup) if strip => println!("{}", format::markup::strip(&markup)),
        _ => print_rendered(&message),
    }
    Ok(())
}

fn print_rendered(message: &ChatMessage) {
    match format::render(message) {
        Rendered::Plain(text) | Rendered::Markup(text) => println!("{text}"),
    }
}

async fn run_full_client(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Network Task (Chạy ngầm)
    let backend = HttpChatBackend::new(app_config.chat_endpoint());
    log::info!("Chat endpoint: {}", backend.endpoint());
    tokio::spawn(ChatClient::new(backend, event_tx, cmd_rx).run());

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let title = app_config.window_title.clone();

    eframe::run_native(
        &app_config.window_title,
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, title, cmd_tx, event_rx)))),
    )?;

    Ok(())
}
