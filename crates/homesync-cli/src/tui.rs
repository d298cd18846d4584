//! Terminal setup and the event/action plumbing for the screen.
//!
//! Input is read on a dedicated blocking thread and forwarded, together
//! with tick events and settled backend calls, through one unbounded
//! action channel. The screen controller consumes actions one at a time,
//! so its state never needs locking.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn init() -> io::Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

pub fn restore() -> io::Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Everything that can happen to the screen.
///
/// The two `Settled` variants carry either the backend's JSON reply or
/// an already-extracted user-facing error message; the controller is the
/// only place that turns them into rendered text.
#[derive(Debug, Clone)]
pub enum Action {
    Tick,
    Quit,
    Resize(u16, u16),
    Key(event::KeyEvent),
    TicketSettled(Result<serde_json::Value, String>),
    VoiceSettled(Result<serde_json::Value, String>),
}

pub struct EventHandler {
    sender: mpsc::UnboundedSender<Action>,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // 1. Tick loop (async)
        let tick_sender = sender.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(tick_rate));
            loop {
                interval.tick().await;
                if tick_sender.send(Action::Tick).is_err() {
                    break;
                }
            }
        });

        // 2. Input loop (blocking thread)
        let event_sender = sender.clone();
        std::thread::spawn(move || loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Press {
                        if event_sender.send(Action::Key(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(Event::Resize(w, h)) => {
                    if event_sender.send(Action::Resize(w, h)).is_err() {
                        break;
                    }
                }
                Err(_) => {
                    // On error, we exit the input loop
                    break;
                }
                _ => {}
            }
        });

        Self { sender, receiver }
    }

    pub async fn next_async(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }

    pub fn get_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.sender.clone()
    }
}
