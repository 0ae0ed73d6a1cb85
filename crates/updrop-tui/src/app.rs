//! App: component-based event loop around the upload controller.
//!
//! Architecture:
//! - `App` owns the components and the `UploadController`, whose surface is
//!   the `FormState` the components draw from.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and from upload tasks.
//! - Components return `Vec<Action>`; App dispatches each Action to one
//!   controller handler.
//! - Uploads run on their own task and come back as `UploadFinished`, so the
//!   UI keeps drawing (and the spinner keeps turning) while a request is out.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use updrop_proto::config::Config;
use updrop_proto::protocol::{SelectedFile, ServerReply};
use updrop_proto::upload::{UploadError, Uploader};

use crate::{
    action::Action,
    app_state::FormState,
    component::Component,
    components::{
        message_area::MessageArea, metadata_table::MetadataTable, upload_form::UploadForm,
    },
    controller::UploadController,
    theme::{C_ACCENT, C_BG, C_SECONDARY},
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// Outcome of the upload task started by the last accepted submit.
    UploadFinished(Result<ServerReply, UploadError>),
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<U: Uploader> {
    controller: UploadController<FormState, U>,

    // ── Components ────────────────────────────────────────────────────────────
    upload_form: UploadForm,
    message_area: MessageArea,
    metadata_table: MetadataTable,

    mouse_capture: bool,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,

    /// Whether to quit on next iteration.
    should_quit: bool,
}

impl<U: Uploader> App<U> {
    pub fn new(uploader: U, config: &Config) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(256);
        let form = FormState::new(config.endpoint.url.clone());
        Self {
            controller: UploadController::new(form, uploader, config.ui.success_dismiss()),
            upload_form: UploadForm::new(),
            message_area: MessageArea::new(),
            metadata_table: MetadataTable::new(),
            mouse_capture: config.ui.mouse_capture,
            tx,
            rx: Some(rx),
            should_quit: false,
        }
    }

    /// Select `path` before the UI starts, as if it had been typed into the
    /// picker.
    pub fn preselect(&mut self, path: &Path) {
        let raw = path.to_string_lossy();
        self.upload_form.set_path(&raw);
        self.controller.select_path(&raw);
        if let Some(file) = self.controller.selection() {
            info!("preselected {}", file.name);
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        if self.mouse_capture {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        if self.mouse_capture {
            execute!(terminal.backend_mut(), DisableMouseCapture)?;
        }
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        let mut rx = self.rx.take().context("event loop already started")?;

        // ── Background task: keyboard/mouse/paste events ──────────────────────
        // Polls so the reader notices the app is gone instead of blocking
        // shutdown on the next keypress.
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        // Spinner animation + success message expiry.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("updrop ready, endpoint {}", self.controller.surface().endpoint);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = ui_tick.tick() => {
                    self.controller.surface_mut().advance_spinner();
                    self.controller.tick_at(Instant::now());
                    needs_redraw = true;
                }
            }
        }

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message requires a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    self.dispatch_all(actions);
                }
                Event::Mouse(mouse) => {
                    let actions = self
                        .upload_form
                        .handle_mouse(mouse, self.controller.surface());
                    self.dispatch_all(actions);
                }
                Event::Paste(text) => {
                    debug!("paste of {} bytes treated as drop", text.len());
                    let actions = self
                        .upload_form
                        .handle_paste(&text, self.controller.surface());
                    self.dispatch_all(actions);
                }
                Event::Resize(_, _) => {}
                _ => return false,
            },

            AppMessage::UploadFinished(result) => {
                self.controller.complete_submit(result);
            }
        }
        true
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return vec![Action::Quit],
                KeyCode::Char('u') => return vec![Action::Submit],
                _ => {}
            }
        }
        self.upload_form.handle_key(key, self.controller.surface())
    }

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::CommitPath(path) => self.controller.select_path(&path),
            Action::DragEnter => self.controller.on_drag_enter(),
            Action::DragOver => self.controller.on_drag_over(),
            Action::DragLeave => self.controller.on_drag_leave(),
            Action::Drop(paths) => {
                // Keep the picker line in step with what the drop selected.
                if let Some(first) = paths.first() {
                    self.upload_form.set_path(&first.to_string_lossy());
                }
                self.controller.on_drop(paths);
            }
            Action::Submit => {
                debug!("submit requested while {:?}", self.controller.state());
                if let Some(file) = self.controller.begin_submit() {
                    self.spawn_upload(file);
                }
            }
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Run the request on its own task. A panic inside the uploader comes
    /// back as `Aborted` so the controller still settles.
    fn spawn_upload(&self, file: SelectedFile) {
        let uploader = self.controller.uploader();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move { uploader.upload(file).await });
            let result = match request.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("upload task did not finish: {}", e);
                    Err(UploadError::Aborted(e.to_string()))
                }
            };
            if tx.send(AppMessage::UploadFinished(result)).await.is_err() {
                debug!("app gone before upload finished");
            }
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let state = self.controller.surface();
        let form_h = self.upload_form.height(state);
        let message_h = self.message_area.height(state);
        let table_h = self.metadata_table.height(state);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(form_h),
                Constraint::Length(message_h),
                Constraint::Length(table_h),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        draw_header(frame, rows[0], &state.endpoint);
        status_bar::draw_separator(frame, rows[1]);

        self.upload_form.draw(frame, rows[2], true, state);
        self.message_area.draw(frame, rows[3], false, state);
        if table_h > 0 {
            self.metadata_table.draw(frame, rows[4], false, state);
        }

        status_bar::draw_separator(frame, rows[6]);
        let mode = self.upload_form.input_mode(state);
        status_bar::draw_keys_bar(frame, rows[7], mode);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, endpoint: &str) {
    let line = Line::from(vec![
        Span::styled(
            " updrop ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("→ {}", endpoint), Style::default().fg(C_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
