mod app_state;
mod debug_log;
mod tui;
mod ui;

use clap::{Parser, Subcommand};
use homesync_models::{render_response, TICKET_RESPONSE_HEADER, VOICE_RESPONSE_HEADER};
use homesync_sdk::{capture, BackendClient, BackendConfig};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppController;
use crate::debug_log::RingLog;
use crate::tui::EventHandler;
use crate::ui::screen::TicketScreen;

#[derive(Parser, Debug)]
#[command(name = "homesync-cli")]
#[command(about = "HomeSync AI demonstrator CLI")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Backend host (overrides HOMESYNC_HOST)
    #[arg(long)]
    host: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive screen (default)
    Tui,
    /// Send a ticket image for extraction and print the reply
    Ticket {
        /// Path to the ticket image
        image: String,
    },
    /// Send a voice-style text command and print the reply
    Voice {
        /// Command text (e.g. "add milk to the shopping list")
        text: String,
    },
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The host is required up front. A missing or malformed value aborts
    // startup instead of producing requests to a half-formed URL.
    let config = match &cli.host {
        Some(host) => BackendConfig::from_host(host)?,
        None => BackendConfig::from_env()?,
    };
    let client = BackendClient::new(config);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(client).await,
        Commands::Ticket { image } => {
            init_stderr_tracing();
            let image = capture::pick_from_library(&image)?;
            match client.process_ticket(&image).await {
                Ok(reply) => {
                    println!("{}", render_response(TICKET_RESPONSE_HEADER, &reply));
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        Commands::Voice { text } => {
            init_stderr_tracing();
            match client.process_voice_command(&text).await {
                Ok(reply) => {
                    println!("{}", render_response(VOICE_RESPONSE_HEADER, &reply));
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::io::stderr)
        .init();
}

async fn run_tui(client: BackendClient) -> anyhow::Result<()> {
    // The terminal owns stdout while the screen runs, so traces go to a file.
    let log_file = std::fs::File::create(std::env::temp_dir().join("homesync-cli.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(250);
    let mut screen = TicketScreen::new(client, Box::new(RingLog::default()), events.get_sender());

    terminal.draw(|f| screen.render(f))?;
    while let Some(action) = events.next_async().await {
        screen.update(action);
        terminal.draw(|f| screen.render(f))?;
        if screen.should_quit() {
            break;
        }
    }

    tui::restore()?;
    Ok(())
}
