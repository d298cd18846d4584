use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app_state::{AppController, InputMode};
use crate::debug_log::DebugSink;
use crate::tui::Action;
use crossterm::event::KeyCode;
use homesync_models::{render_response, CapturedImage, TICKET_RESPONSE_HEADER, VOICE_RESPONSE_HEADER};
use homesync_sdk::{capture, BackendClient};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

const NO_IMAGE_NOTICE: &str =
    "Please select or take a photo of the ticket first to process it.";
const EMPTY_COMMAND_NOTICE: &str = "Please enter a voice command.";

/// The ticket-and-voice screen.
///
/// Two independent interactions share it: sending a captured ticket image
/// for extraction, and sending a typed voice-style command. Each has its
/// own pending flag, its own response slot, and its own in-flight task.
/// All mutation happens in `update`, driven by the action channel, so the
/// pending flags flip synchronously with the user's send and settle
/// exactly once per call.
pub struct TicketScreen {
    client: BackendClient,
    tx: UnboundedSender<Action>,
    should_quit: bool,

    // Ticket interaction
    captured: Option<CapturedImage>,
    ticket_pending: bool,
    ticket_response: Option<String>,
    ticket_task: Option<AbortHandle>,

    // Voice interaction
    command_input: String,
    voice_pending: bool,
    voice_response: Option<String>,
    voice_task: Option<AbortHandle>,

    // Modal / input state
    input_mode: InputMode,
    path_buffer: String,

    // Debug panel
    debug: Box<dyn DebugSink>,
    show_debug: bool,

    // Notifications
    notification: Option<(String, std::time::Instant)>,
}

impl TicketScreen {
    pub fn new(client: BackendClient, debug: Box<dyn DebugSink>, tx: UnboundedSender<Action>) -> Self {
        Self {
            client,
            tx,
            should_quit: false,
            captured: None,
            ticket_pending: false,
            ticket_response: None,
            ticket_task: None,
            command_input: String::new(),
            voice_pending: false,
            voice_response: None,
            voice_task: None,
            input_mode: InputMode::Normal,
            path_buffer: String::new(),
            debug,
            show_debug: false,
            notification: None,
        }
    }

    fn show_notification(&mut self, msg: String) {
        self.notification = Some((msg, std::time::Instant::now()));
    }

    // ------------------------------------------------------------------
    // Capture
    // ------------------------------------------------------------------

    fn start_pick(&mut self) {
        self.input_mode = InputMode::EditingPath;
        self.path_buffer.clear();
    }

    fn cancel_pick(&mut self) {
        self.input_mode = InputMode::Normal;
        self.path_buffer.clear();
        self.debug.log("Image selection canceled");
    }

    /// Resolve the typed path into a captured image.
    ///
    /// An empty path is treated as a canceled picker: logged, nothing else
    /// changes. A successful capture replaces the previous one and clears
    /// the stale ticket response.
    fn finish_pick(&mut self) {
        let path = self.path_buffer.trim().to_string();
        self.input_mode = InputMode::Normal;
        self.path_buffer.clear();

        if path.is_empty() {
            self.debug.log("Image selection canceled");
            return;
        }

        match capture::pick_from_library(&path) {
            Ok(image) => {
                self.debug.log("Image selected successfully");
                self.debug
                    .log(&format!("Image base64 length: {}", image.base64_len()));
                self.debug
                    .log(&format!("Base64 preview: {}", image.base64_preview()));
                self.captured = Some(image);
                self.ticket_response = None;
            }
            Err(e) => {
                let msg = e.user_message();
                self.debug.log(&format!("Image selection failed: {msg}"));
                self.show_notification(msg);
            }
        }
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    fn send_ticket(&mut self) {
        if self.ticket_pending {
            // Send is disabled while a call is in flight.
            return;
        }
        let Some(image) = self.captured.clone() else {
            self.debug.log("Ticket send refused: no image selected");
            self.show_notification(NO_IMAGE_NOTICE.to_string());
            return;
        };

        self.ticket_pending = true;
        self.ticket_response = None;
        self.debug.log(&format!(
            "Processing ticket ({} base64 chars)",
            image.base64_len()
        ));

        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = client
                .process_ticket(&image)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(Action::TicketSettled(result));
        });
        self.ticket_task = Some(handle.abort_handle());
    }

    fn send_voice(&mut self) {
        if self.voice_pending {
            return;
        }
        let command = self.command_input.trim().to_string();
        if command.is_empty() {
            self.debug.log("Voice send refused: empty command");
            self.show_notification(EMPTY_COMMAND_NOTICE.to_string());
            return;
        }

        self.voice_pending = true;
        self.voice_response = None;
        self.debug.log(&format!("Sending voice command: {command}"));

        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = client
                .process_voice_command(&command)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(Action::VoiceSettled(result));
        });
        self.voice_task = Some(handle.abort_handle());
    }

    // ------------------------------------------------------------------
    // Settling
    // ------------------------------------------------------------------

    fn settle_ticket(&mut self, result: Result<serde_json::Value, String>) {
        self.ticket_pending = false;
        self.ticket_task = None;
        match result {
            Ok(reply) => {
                self.ticket_response = Some(render_response(TICKET_RESPONSE_HEADER, &reply));
                self.debug.log("Ticket processed");
            }
            Err(msg) => {
                self.ticket_response = Some(format!("Error: {msg}"));
                self.debug.log(&format!("Ticket processing failed: {msg}"));
                self.show_notification(msg);
            }
        }
    }

    fn settle_voice(&mut self, result: Result<serde_json::Value, String>) {
        self.voice_pending = false;
        self.voice_task = None;
        match result {
            Ok(reply) => {
                self.voice_response = Some(render_response(VOICE_RESPONSE_HEADER, &reply));
                self.debug.log("Voice command processed");
            }
            Err(msg) => {
                self.voice_response = Some(format!("Error: {msg}"));
                self.debug.log(&format!("Voice command failed: {msg}"));
                self.show_notification(msg);
            }
        }
    }

    /// In-flight calls do not outlive the screen.
    fn teardown(&mut self) {
        if let Some(task) = self.ticket_task.take() {
            task.abort();
        }
        if let Some(task) = self.voice_task.take() {
            task.abort();
        }
        self.should_quit = true;
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        match self.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.teardown(),
                KeyCode::Char('p') => self.start_pick(),
                KeyCode::Char('t') => self.send_ticket(),
                KeyCode::Char('v') => self.input_mode = InputMode::EditingCommand,
                KeyCode::Char('d') => self.show_debug = !self.show_debug,
                KeyCode::Char('c') => self.debug.clear(),
                _ => {}
            },
            InputMode::EditingPath => match key.code {
                KeyCode::Enter => self.finish_pick(),
                KeyCode::Esc => self.cancel_pick(),
                KeyCode::Char(c) => self.path_buffer.push(c),
                KeyCode::Backspace => {
                    self.path_buffer.pop();
                }
                _ => {}
            },
            InputMode::EditingCommand => match key.code {
                KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                    self.send_voice();
                }
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Char(c) => self.command_input.push(c),
                KeyCode::Backspace => {
                    self.command_input.pop();
                }
                _ => {}
            },
        }
    }
}

impl Drop for TicketScreen {
    fn drop(&mut self) {
        if let Some(task) = self.ticket_task.take() {
            task.abort();
        }
        if let Some(task) = self.voice_task.take() {
            task.abort();
        }
    }
}

impl AppController for TicketScreen {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::TicketSettled(result) => self.settle_ticket(result),
            Action::VoiceSettled(result) => self.settle_voice(result),
            Action::Quit => self.teardown(),
            Action::Tick | Action::Resize(_, _) => {}
        }

        // Clear notification
        if let Some((_, time)) = self.notification {
            if time.elapsed().as_secs() > 3 {
                self.notification = None;
            }
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
        if self.show_debug {
            constraints.push(Constraint::Length(2 + self.debug.entries().len() as u16));
        }
        constraints.push(Constraint::Length(3));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        // Top: title and backend address
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "HomeSync AI",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  backend: {}", self.client.config().base_url())),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        // Middle: ticket column and voice column
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let capture_line = match &self.captured {
            Some(image) => Line::from(vec![
                Span::raw("Image: "),
                Span::styled(image.path.clone(), Style::default().fg(Color::Green)),
            ]),
            None => Line::from(Span::styled(
                "No image selected",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let mut ticket_lines = vec![capture_line];
        if self.ticket_pending {
            ticket_lines.push(Line::from(Span::styled(
                "Processing ticket...",
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(response) = &self.ticket_response {
            ticket_lines.push(Line::raw(""));
            for line in response.lines() {
                ticket_lines.push(Line::raw(line.to_string()));
            }
        }
        let ticket = Paragraph::new(ticket_lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Purchase Ticket"));
        f.render_widget(ticket, columns[0]);

        let input_style = if self.input_mode == InputMode::EditingCommand {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut voice_lines = vec![Line::from(vec![
            Span::raw("Command: "),
            Span::styled(self.command_input.clone(), input_style),
        ])];
        if self.voice_pending {
            voice_lines.push(Line::from(Span::styled(
                "Sending command...",
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(response) = &self.voice_response {
            voice_lines.push(Line::raw(""));
            for line in response.lines() {
                voice_lines.push(Line::raw(line.to_string()));
            }
        }
        let voice = Paragraph::new(voice_lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Voice Command"));
        f.render_widget(voice, columns[1]);

        // Debug panel
        let mut next_chunk = 2;
        if self.show_debug {
            let lines: Vec<Line> = self
                .debug
                .entries()
                .into_iter()
                .map(|entry| Line::from(Span::styled(entry, Style::default().fg(Color::DarkGray))))
                .collect();
            let panel = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Debug"));
            f.render_widget(panel, chunks[next_chunk]);
            next_chunk += 1;
        }

        // Footer: key hints
        let hints = match self.input_mode {
            InputMode::Normal => "p: pick image | t: send ticket | v: voice command | d: debug | c: clear log | q: quit",
            InputMode::EditingPath => "Enter: confirm path | Esc: cancel",
            InputMode::EditingCommand => "Enter: send | Esc: back",
        };
        let footer = Paragraph::new(hints).block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, chunks[next_chunk]);

        // Notification overlay
        if let Some((msg, _)) = &self.notification {
            let area = centered_rect(60, 20, f.area());
            let block = Paragraph::new(msg.as_str()).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Notice")
                    .style(Style::default().bg(Color::Blue).fg(Color::White)),
            );
            f.render_widget(Clear, area);
            f.render_widget(block, area);
        }

        // Modal overlay for the image path
        if self.input_mode == InputMode::EditingPath {
            let area = centered_rect(50, 20, f.area());
            f.render_widget(Clear, area);
            let input_block = Paragraph::new(self.path_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title("Image path:"));
            f.render_widget(input_block, area);
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_log::RingLog;
    use homesync_models::BackendHost;
    use homesync_sdk::BackendConfig;
    use serde_json::json;
    use std::io::Write;
    use tokio::sync::mpsc;

    fn test_screen() -> (TicketScreen, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        // Nothing listens on this port; tests settle the calls by hand.
        let host = BackendHost::new("127.0.0.1").unwrap();
        let client = BackendClient::new(BackendConfig::new(host, 9));
        let screen = TicketScreen::new(client, Box::new(RingLog::default()), tx);
        (screen, rx)
    }

    fn sample_image() -> CapturedImage {
        CapturedImage {
            path: "ticket.png".into(),
            mime_type: "image/png".into(),
            image_base64: "aGVsbG8=".into(),
        }
    }

    #[tokio::test]
    async fn ticket_send_without_image_is_refused() {
        let (mut screen, mut rx) = test_screen();

        screen.send_ticket();

        assert!(!screen.ticket_pending);
        assert!(screen.ticket_task.is_none());
        assert!(rx.try_recv().is_err());
        let (notice, _) = screen.notification.as_ref().unwrap();
        assert_eq!(notice, NO_IMAGE_NOTICE);
    }

    #[tokio::test]
    async fn voice_send_with_blank_command_is_refused() {
        let (mut screen, mut rx) = test_screen();
        screen.command_input = "   \t".to_string();

        screen.send_voice();

        assert!(!screen.voice_pending);
        assert!(screen.voice_task.is_none());
        assert!(rx.try_recv().is_err());
        let (notice, _) = screen.notification.as_ref().unwrap();
        assert_eq!(notice, EMPTY_COMMAND_NOTICE);
    }

    #[tokio::test]
    async fn successful_capture_replaces_image_and_clears_response() {
        let (mut screen, _rx) = test_screen();
        screen.ticket_response = Some("stale".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticket.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello")
            .unwrap();

        screen.path_buffer = path.to_string_lossy().to_string();
        screen.input_mode = InputMode::EditingPath;
        screen.finish_pick();

        assert_eq!(screen.input_mode, InputMode::Normal);
        assert!(screen.ticket_response.is_none());
        assert_eq!(screen.captured.as_ref().unwrap().image_base64, "aGVsbG8=");
    }

    #[tokio::test]
    async fn empty_path_is_a_canceled_selection() {
        let (mut screen, _rx) = test_screen();
        screen.ticket_response = Some("kept".to_string());

        screen.path_buffer = "  ".to_string();
        screen.input_mode = InputMode::EditingPath;
        screen.finish_pick();

        assert!(screen.captured.is_none());
        assert_eq!(screen.ticket_response.as_deref(), Some("kept"));
        assert!(screen.notification.is_none());
    }

    #[tokio::test]
    async fn failed_capture_keeps_previous_image() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());

        screen.path_buffer = "/no/such/file.png".to_string();
        screen.input_mode = InputMode::EditingPath;
        screen.finish_pick();

        assert!(screen.captured.is_some());
        assert!(screen.notification.is_some());
    }

    #[tokio::test]
    async fn ticket_pending_flips_on_send_and_settles_once() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());

        screen.send_ticket();
        assert!(screen.ticket_pending);
        assert!(screen.ticket_response.is_none());
        assert!(screen.ticket_task.is_some());

        screen.update(Action::TicketSettled(Ok(json!({ "total": 12.5 }))));
        assert!(!screen.ticket_pending);
        assert_eq!(
            screen.ticket_response.as_deref(),
            Some(render_response(TICKET_RESPONSE_HEADER, &json!({ "total": 12.5 })).as_str())
        );
    }

    #[tokio::test]
    async fn ticket_error_shows_extracted_message() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());

        screen.send_ticket();
        screen.update(Action::TicketSettled(Err("invalid image".to_string())));

        assert!(!screen.ticket_pending);
        assert_eq!(screen.ticket_response.as_deref(), Some("Error: invalid image"));
        let (notice, _) = screen.notification.as_ref().unwrap();
        assert_eq!(notice, "invalid image");
    }

    #[tokio::test]
    async fn voice_settles_with_rendered_header() {
        let (mut screen, _rx) = test_screen();
        screen.command_input = "what do we need to buy?".to_string();

        screen.send_voice();
        assert!(screen.voice_pending);

        screen.update(Action::VoiceSettled(Ok(json!({ "items": ["milk"] }))));
        assert!(!screen.voice_pending);
        let response = screen.voice_response.as_deref().unwrap();
        assert!(response.starts_with(VOICE_RESPONSE_HEADER));
        assert!(response.contains("milk"));
    }

    #[tokio::test]
    async fn interactions_are_tracked_independently() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());
        screen.command_input = "add milk".to_string();

        screen.send_ticket();
        screen.send_voice();
        assert!(screen.ticket_pending);
        assert!(screen.voice_pending);

        screen.update(Action::VoiceSettled(Ok(json!({ "ok": true }))));
        assert!(screen.ticket_pending);
        assert!(!screen.voice_pending);
    }

    #[tokio::test]
    async fn send_is_a_no_op_while_pending() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());

        screen.send_ticket();
        screen.ticket_response = Some("partial".to_string());
        screen.send_ticket();

        // The second send did not restart the interaction.
        assert!(screen.ticket_pending);
        assert_eq!(screen.ticket_response.as_deref(), Some("partial"));
    }

    #[tokio::test]
    async fn quit_aborts_in_flight_work() {
        let (mut screen, _rx) = test_screen();
        screen.captured = Some(sample_image());
        screen.send_ticket();

        screen.update(Action::Quit);

        assert!(screen.should_quit());
        assert!(screen.ticket_task.is_none());
        assert!(screen.voice_task.is_none());
    }
}
