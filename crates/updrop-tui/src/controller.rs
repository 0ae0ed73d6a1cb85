//! UploadController: owns the upload lifecycle.
//!
//! File selection (picker or drop), the single in-flight request, the
//! Idle → Loading → Success/Error → Idle state machine, and the metadata
//! table all live here. The controller is built once with its surface and
//! uploader injected, and every UI event is routed to one named handler.
//!
//! The request itself can be driven two ways:
//! - `submit().await` runs the whole round trip in place (headless host, tests).
//! - `begin_submit()` hands out the file for a background task, and
//!   `complete_submit()` is fed the task's result (TUI event loop).
//!
//! Both paths leave Loading through `ResumeIdle`, whose `Drop` restores the
//! idle presentation on every exit path, unwinding included.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use updrop_proto::protocol::{SelectedFile, ServerReply, UploadResponse};
use updrop_proto::upload::{UploadError, Uploader};

use crate::surface::{
    MessageKind, MetadataRow, UploadSurface, FILE_PLACEHOLDER, SUBMIT_BUSY_TEXT,
    SUBMIT_IDLE_TEXT,
};

pub const MSG_NO_FILE: &str = "Please select a file!";
pub const MSG_UPLOADED: &str = "File uploaded successfully! ✅";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed. Please try again.";
pub const MSG_NETWORK_ERROR: &str = "Network error. Please check your connection.";

/// Presentation state of the upload workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

pub struct UploadController<S, U> {
    surface: S,
    uploader: Arc<U>,
    /// At most one file; extra dropped files never reach this slot.
    selection: Option<SelectedFile>,
    state: UiState,
    /// Outcome of the most recent request, kept after returning to Idle.
    last_outcome: Option<UiState>,
    /// When the visible success message should disappear.
    message_deadline: Option<Instant>,
    success_dismiss: Duration,
}

impl<S: UploadSurface, U: Uploader> UploadController<S, U> {
    pub fn new(surface: S, uploader: U, success_dismiss: Duration) -> Self {
        let mut controller = Self {
            surface,
            uploader: Arc::new(uploader),
            selection: None,
            state: UiState::Idle,
            last_outcome: None,
            message_deadline: None,
            success_dismiss,
        };
        controller.apply_idle_presentation();
        controller.on_file_selected(None);
        controller.hide_message();
        controller.hide_metadata();
        controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn uploader(&self) -> Arc<U> {
        Arc::clone(&self.uploader)
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<UiState> {
        self.last_outcome
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    // ── File selection ────────────────────────────────────────────────────────

    /// Picker `change`: reflect the chosen file (or its absence) in the label.
    pub fn on_file_selected(&mut self, file: Option<SelectedFile>) {
        match &file {
            Some(f) => {
                debug!("selected {} ({} bytes)", f.name, f.size());
                self.surface.set_file_label(&f.name);
                self.surface.set_has_file(true);
            }
            None => {
                self.surface.set_file_label(FILE_PLACEHOLDER);
                self.surface.set_has_file(false);
            }
        }
        self.selection = file;
    }

    /// Picker commit from a typed path. Blank input clears the selection.
    pub fn select_path(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            self.on_file_selected(None);
            return;
        }
        self.select_file_at(Path::new(raw));
    }

    fn select_file_at(&mut self, path: &Path) {
        match SelectedFile::open(path) {
            Ok(file) => self.on_file_selected(Some(file)),
            Err(e) => {
                warn!("selection failed: {}", e);
                self.on_file_selected(None);
                self.show_message(
                    &format!("Could not read file: {}", path.display()),
                    MessageKind::Error,
                );
            }
        }
    }

    // ── Drag and drop ─────────────────────────────────────────────────────────

    pub fn on_drag_enter(&mut self) {
        self.surface.set_drop_highlight(true);
    }

    pub fn on_drag_over(&mut self) {
        self.surface.set_drop_highlight(true);
    }

    pub fn on_drag_leave(&mut self) {
        self.surface.set_drop_highlight(false);
    }

    /// Drop onto the target: the first path is selected exactly as if it had
    /// come from the picker. An empty drop keeps the current selection.
    pub fn on_drop(&mut self, paths: Vec<PathBuf>) {
        self.surface.set_drop_highlight(false);
        match paths.first() {
            Some(first) => {
                if paths.len() > 1 {
                    debug!("drop carried {} files, keeping the first", paths.len());
                }
                self.select_file_at(first);
            }
            None => debug!("drop carried no files"),
        }
    }

    // ── Submission ────────────────────────────────────────────────────────────

    /// Validate and enter Loading. Returns the file to send, or `None` when
    /// nothing should be sent (no selection, or a request already in flight).
    pub fn begin_submit(&mut self) -> Option<SelectedFile> {
        if self.state == UiState::Loading {
            debug!("submit ignored: upload already in flight");
            return None;
        }

        let Some(file) = self.selection.clone() else {
            info!("submit rejected: no file selected");
            self.show_message(MSG_NO_FILE, MessageKind::Error);
            return None;
        };

        self.set_loading(true);
        self.hide_message();
        self.hide_metadata();
        info!("uploading {} ({} bytes)", file.name, file.size());
        Some(file)
    }

    /// Settle the in-flight request with its outcome and return to Idle.
    pub fn complete_submit(&mut self, result: Result<ServerReply, UploadError>) {
        if self.state != UiState::Loading {
            warn!("upload result arrived while {:?}; ignoring", self.state);
            return;
        }
        let mut this = ResumeIdle(self);
        this.render_outcome(result);
    }

    /// Whole round trip in place: validate, send, render, return to Idle.
    pub async fn submit(&mut self) {
        let Some(file) = self.begin_submit() else {
            return;
        };
        let uploader = self.uploader();
        let mut this = ResumeIdle(self);
        let result = uploader.upload(file).await;
        this.render_outcome(result);
    }

    fn render_outcome(&mut self, result: Result<ServerReply, UploadError>) {
        match result {
            Ok(reply) if reply.accepted() => {
                self.transition(UiState::Success);
                self.show_message(MSG_UPLOADED, MessageKind::Success);
                self.display_metadata(&reply.body);
                self.surface.reset_form();
                self.on_file_selected(None);
            }
            Ok(reply) => {
                self.transition(UiState::Error);
                warn!(
                    "upload rejected: status={} error={:?}",
                    reply.status, reply.body.error
                );
                let text = reply.body.error_message().unwrap_or(MSG_UPLOAD_FAILED);
                self.show_message(text, MessageKind::Error);
            }
            Err(UploadError::Io { path, source }) => {
                self.transition(UiState::Error);
                warn!("selected file unreadable at send time: {}", source);
                self.on_file_selected(None);
                self.show_message(
                    &format!("Could not read file: {}", path.display()),
                    MessageKind::Error,
                );
            }
            Err(e) => {
                self.transition(UiState::Error);
                error!("upload failed: {}", e);
                self.show_message(MSG_NETWORK_ERROR, MessageKind::Error);
            }
        }
    }

    // ── Presentation ──────────────────────────────────────────────────────────

    /// Fill the metadata table with exactly three rows and show it.
    pub fn display_metadata(&mut self, response: &UploadResponse) {
        let rows = vec![
            MetadataRow::new("File Name", response.name.clone().unwrap_or_default()),
            MetadataRow::new("File Size", response.size_label()),
            MetadataRow::new(
                "Upload Time",
                response.timestamp.clone().unwrap_or_default(),
            ),
        ];
        self.surface.set_metadata_rows(rows);
        self.surface.set_metadata_visible(true);
    }

    pub fn hide_metadata(&mut self) {
        self.surface.set_metadata_visible(false);
    }

    pub fn hide_message(&mut self) {
        self.message_deadline = None;
        self.surface.hide_message();
    }

    /// Show a message. Success messages get a fresh dismiss deadline, which
    /// also drops any deadline left over from an earlier message.
    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message_deadline = match kind {
            // An interval too large to represent never expires.
            MessageKind::Success => Instant::now().checked_add(self.success_dismiss),
            MessageKind::Error => None,
        };
        self.surface.show_message(text, kind);
    }

    /// Expire the success message once its deadline has passed.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(deadline) = self.message_deadline {
            if now >= deadline {
                debug!("success message dismissed");
                self.hide_message();
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.transition(UiState::Loading);
            self.surface.set_submit_enabled(false);
            self.surface.set_submit_text(SUBMIT_BUSY_TEXT);
            self.surface.set_spinner_visible(true);
        } else {
            self.transition(UiState::Idle);
            self.apply_idle_presentation();
        }
    }

    fn apply_idle_presentation(&mut self) {
        self.surface.set_submit_enabled(true);
        self.surface.set_submit_text(SUBMIT_IDLE_TEXT);
        self.surface.set_spinner_visible(false);
    }

    fn transition(&mut self, next: UiState) {
        if next != self.state {
            info!("upload: state {:?} → {:?}", self.state, next);
            if matches!(next, UiState::Success | UiState::Error) {
                self.last_outcome = Some(next);
            }
            self.state = next;
        }
    }
}

/// Holds the controller for the rest of a submission and puts it back in
/// Idle when dropped, whether the outcome rendered, errored, or panicked.
struct ResumeIdle<'a, S: UploadSurface, U: Uploader>(&'a mut UploadController<S, U>);

impl<S: UploadSurface, U: Uploader> Deref for ResumeIdle<'_, S, U> {
    type Target = UploadController<S, U>;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<S: UploadSurface, U: Uploader> DerefMut for ResumeIdle<'_, S, U> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl<S: UploadSurface, U: Uploader> Drop for ResumeIdle<'_, S, U> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::FormState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// What the fake endpoint answers with.
    #[derive(Clone)]
    enum Script {
        Reply(u16, UploadResponse),
        NotJson,
        Dropped,
        Vanished,
    }

    struct ScriptedUploader {
        script: Script,
        calls: AtomicUsize,
        sent: Mutex<Vec<SelectedFile>>,
    }

    impl ScriptedUploader {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Uploader for ScriptedUploader {
        async fn upload(&self, file: SelectedFile) -> Result<ServerReply, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(file);
            match &self.script {
                Script::Reply(status, body) => Ok(ServerReply {
                    status: *status,
                    body: body.clone(),
                }),
                Script::NotJson => Err(UploadError::Decode(
                    serde_json::from_str::<UploadResponse>("<html>").unwrap_err(),
                )),
                Script::Dropped => Err(UploadError::Aborted("connection reset".into())),
                Script::Vanished => Err(UploadError::Io {
                    path: PathBuf::from("/tmp/vanished.pdf"),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        }
    }

    fn report_ok() -> Script {
        Script::Reply(
            200,
            UploadResponse {
                success: true,
                name: Some("report.pdf".into()),
                size: Some(128.0),
                timestamp: Some("2024-01-01T10:00:00Z".into()),
                error: None,
            },
        )
    }

    fn failure(status: u16, error: Option<&str>) -> Script {
        Script::Reply(
            status,
            UploadResponse {
                success: false,
                error: error.map(str::to_string),
                ..Default::default()
            },
        )
    }

    fn controller(script: Script) -> UploadController<FormState, ScriptedUploader> {
        UploadController::new(
            FormState::new("http://test/upload"),
            ScriptedUploader::new(script),
            Duration::from_secs(5),
        )
    }

    fn report_pdf() -> SelectedFile {
        SelectedFile::from_bytes("report.pdf", vec![1u8; 128 * 1024])
    }

    fn assert_idle(c: &UploadController<FormState, ScriptedUploader>) {
        let form = c.surface();
        assert_eq!(c.state(), UiState::Idle);
        assert!(form.submit_enabled);
        assert_eq!(form.submit_text, SUBMIT_IDLE_TEXT);
        assert!(!form.spinner_visible);
    }

    #[test]
    fn starts_idle_with_placeholder() {
        let c = controller(report_ok());
        assert_idle(&c);
        assert_eq!(c.surface().file_label, FILE_PLACEHOLDER);
        assert!(!c.surface().has_file);
        assert!(c.surface().message.is_none());
        assert!(!c.surface().metadata_visible);
    }

    #[tokio::test]
    async fn submit_without_file_makes_no_request() {
        let mut c = controller(report_ok());
        c.submit().await;

        assert_eq!(c.uploader().calls(), 0);
        assert_eq!(c.surface().message_text(), Some(MSG_NO_FILE));
        assert_eq!(
            c.surface().message.as_ref().map(|m| m.kind),
            Some(MessageKind::Error)
        );
        assert_idle(&c);
        assert_eq!(c.last_outcome(), None);
    }

    #[tokio::test]
    async fn successful_upload_renders_metadata_and_resets_form() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        assert_eq!(c.surface().file_label, "report.pdf");
        assert!(c.surface().has_file);

        let generation = c.surface().reset_generation;
        c.submit().await;

        assert_eq!(c.uploader().calls(), 1);
        assert_eq!(c.uploader().sent.lock().unwrap()[0].name, "report.pdf");

        let form = c.surface();
        assert_eq!(form.message_text(), Some(MSG_UPLOADED));
        assert_eq!(
            form.metadata_rows,
            vec![
                MetadataRow::new("File Name", "report.pdf"),
                MetadataRow::new("File Size", "128 KB"),
                MetadataRow::new("Upload Time", "2024-01-01T10:00:00Z"),
            ]
        );
        assert!(form.metadata_visible);
        assert_eq!(form.file_label, FILE_PLACEHOLDER);
        assert!(!form.has_file);
        assert_eq!(form.reset_generation, generation + 1);
        assert!(c.selection().is_none());
        assert_eq!(c.last_outcome(), Some(UiState::Success));
        assert_idle(&c);
    }

    #[tokio::test]
    async fn success_message_dismisses_after_deadline() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        c.tick_at(Instant::now());
        assert_eq!(c.surface().message_text(), Some(MSG_UPLOADED));

        c.tick_at(Instant::now() + Duration::from_secs(5));
        assert!(c.surface().message.is_none());
        // Metadata is not part of the dismissal.
        assert!(c.surface().metadata_visible);
    }

    #[tokio::test]
    async fn newer_message_replaces_dismiss_deadline() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        // Selection was cleared, so this shows the validation error.
        c.submit().await;
        c.tick_at(Instant::now() + Duration::from_secs(10));
        assert_eq!(c.surface().message_text(), Some(MSG_NO_FILE));
    }

    #[tokio::test]
    async fn server_error_is_shown_verbatim() {
        let mut c = controller(failure(400, Some("File type not allowed")));
        c.on_file_selected(Some(SelectedFile::from_bytes("tool.exe", b"MZ".to_vec())));
        c.submit().await;

        assert_eq!(c.surface().message_text(), Some("File type not allowed"));
        assert!(!c.surface().metadata_visible);
        assert_eq!(c.last_outcome(), Some(UiState::Error));
        // Failure keeps the selection so the user can retry.
        assert_eq!(c.surface().file_label, "tool.exe");
        assert!(c.selection().is_some());
        assert_idle(&c);
    }

    #[tokio::test]
    async fn success_flag_false_with_ok_status_is_a_failure() {
        let mut c = controller(failure(200, Some("quota exceeded")));
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        assert_eq!(c.surface().message_text(), Some("quota exceeded"));
        assert!(!c.surface().metadata_visible);
        assert_idle(&c);
    }

    #[tokio::test]
    async fn ok_body_with_bad_status_is_a_failure() {
        let mut c = controller(Script::Reply(
            500,
            UploadResponse {
                success: true,
                ..Default::default()
            },
        ));
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        assert_eq!(c.surface().message_text(), Some(MSG_UPLOAD_FAILED));
        assert!(!c.surface().metadata_visible);
        assert_idle(&c);
    }

    #[tokio::test]
    async fn failure_without_error_field_uses_fallback() {
        for script in [failure(500, None), failure(400, Some(""))] {
            let mut c = controller(script);
            c.on_file_selected(Some(report_pdf()));
            c.submit().await;
            assert_eq!(c.surface().message_text(), Some(MSG_UPLOAD_FAILED));
            assert_idle(&c);
        }
    }

    #[tokio::test]
    async fn transport_and_decode_failures_show_network_error() {
        for script in [Script::Dropped, Script::NotJson] {
            let mut c = controller(script);
            c.on_file_selected(Some(report_pdf()));
            c.submit().await;
            assert_eq!(c.surface().message_text(), Some(MSG_NETWORK_ERROR));
            assert!(!c.surface().metadata_visible);
            assert_eq!(c.last_outcome(), Some(UiState::Error));
            assert_idle(&c);
        }
    }

    #[test]
    fn loading_blocks_resubmission() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));

        let file = c.begin_submit().expect("first submit proceeds");
        assert_eq!(file.name, "report.pdf");
        assert_eq!(c.state(), UiState::Loading);
        assert!(!c.surface().submit_enabled);
        assert_eq!(c.surface().submit_text, SUBMIT_BUSY_TEXT);
        assert!(c.surface().spinner_visible);

        assert!(c.begin_submit().is_none());
        assert_eq!(c.state(), UiState::Loading);

        c.complete_submit(Err(UploadError::Aborted("task panicked".into())));
        assert_eq!(c.surface().message_text(), Some(MSG_NETWORK_ERROR));
        assert_idle(&c);
    }

    #[test]
    fn begin_submit_clears_previous_message_and_metadata() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        let _ = c.begin_submit();
        c.complete_submit(match report_ok() {
            Script::Reply(status, body) => Ok(ServerReply { status, body }),
            _ => unreachable!(),
        });
        assert!(c.surface().metadata_visible);

        c.on_file_selected(Some(report_pdf()));
        let _ = c.begin_submit();
        assert!(c.surface().message.is_none());
        assert!(!c.surface().metadata_visible);
    }

    #[test]
    fn stray_result_outside_loading_is_ignored() {
        let mut c = controller(report_ok());
        c.complete_submit(Err(UploadError::Aborted("late".into())));
        assert!(c.surface().message.is_none());
        assert_idle(&c);
    }

    /// A surface whose message element blows up, to prove the idle reset
    /// still runs while unwinding.
    struct PanickyForm(FormState);

    impl UploadSurface for PanickyForm {
        fn set_file_label(&mut self, text: &str) {
            self.0.set_file_label(text)
        }
        fn set_has_file(&mut self, has_file: bool) {
            self.0.set_has_file(has_file)
        }
        fn set_drop_highlight(&mut self, on: bool) {
            self.0.set_drop_highlight(on)
        }
        fn set_submit_enabled(&mut self, enabled: bool) {
            self.0.set_submit_enabled(enabled)
        }
        fn set_submit_text(&mut self, text: &str) {
            self.0.set_submit_text(text)
        }
        fn set_spinner_visible(&mut self, visible: bool) {
            self.0.set_spinner_visible(visible)
        }
        fn show_message(&mut self, _text: &str, _kind: MessageKind) {
            panic!("message element detached");
        }
        fn hide_message(&mut self) {
            self.0.hide_message()
        }
        fn set_metadata_rows(&mut self, rows: Vec<MetadataRow>) {
            self.0.set_metadata_rows(rows)
        }
        fn set_metadata_visible(&mut self, visible: bool) {
            self.0.set_metadata_visible(visible)
        }
        fn reset_form(&mut self) {
            self.0.reset_form()
        }
    }

    #[test]
    fn idle_is_restored_even_when_rendering_panics() {
        let mut c = UploadController::new(
            PanickyForm(FormState::default()),
            ScriptedUploader::new(Script::Dropped),
            Duration::from_secs(5),
        );
        c.on_file_selected(Some(report_pdf()));
        assert!(c.begin_submit().is_some());
        assert!(!c.surface().0.submit_enabled);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            c.complete_submit(Err(UploadError::Aborted("boom".into())));
        }));
        assert!(outcome.is_err());

        assert_eq!(c.state(), UiState::Idle);
        let form = &c.surface().0;
        assert!(form.submit_enabled);
        assert_eq!(form.submit_text, SUBMIT_IDLE_TEXT);
        assert!(!form.spinner_visible);
    }

    #[test]
    fn drop_selects_first_file_like_the_picker() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        std::fs::write(&first, b"png").unwrap();
        std::fs::write(&second, b"png2").unwrap();

        let mut dropped = controller(report_ok());
        dropped.on_drag_enter();
        assert!(dropped.surface().drop_highlight);
        dropped.on_drop(vec![first.clone(), second]);
        assert!(!dropped.surface().drop_highlight);

        let mut picked = controller(report_ok());
        picked.select_path(first.to_str().unwrap());

        assert_eq!(dropped.surface().file_label, "first.png");
        assert_eq!(dropped.surface().file_label, picked.surface().file_label);
        assert_eq!(dropped.surface().has_file, picked.surface().has_file);
        assert_eq!(dropped.selection(), picked.selection());
    }

    #[test]
    fn empty_drop_keeps_selection() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        c.on_drag_over();
        c.on_drop(Vec::new());

        assert!(!c.surface().drop_highlight);
        assert_eq!(c.surface().file_label, "report.pdf");
        assert_eq!(c.selection().map(|f| f.name.as_str()), Some("report.pdf"));
    }

    #[test]
    fn drag_leave_removes_highlight() {
        let mut c = controller(report_ok());
        c.on_drag_enter();
        c.on_drag_leave();
        assert!(!c.surface().drop_highlight);
    }

    #[test]
    fn blank_path_reverts_to_placeholder() {
        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        c.select_path("   ");
        assert_eq!(c.surface().file_label, FILE_PLACEHOLDER);
        assert!(!c.surface().has_file);
        assert!(c.selection().is_none());
    }

    #[test]
    fn unreadable_path_clears_selection_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let mut c = controller(report_ok());
        c.on_file_selected(Some(report_pdf()));
        c.select_path(missing.to_str().unwrap());

        assert!(c.selection().is_none());
        assert_eq!(c.surface().file_label, FILE_PLACEHOLDER);
        let text = c.surface().message_text().unwrap_or_default();
        assert!(text.starts_with("Could not read file:"), "got {text:?}");
    }

    #[tokio::test]
    async fn huge_dismiss_interval_keeps_message_without_panicking() {
        let mut c = UploadController::new(
            FormState::new("http://test/upload"),
            ScriptedUploader::new(report_ok()),
            Duration::from_secs(i64::MAX as u64),
        );
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        assert_eq!(c.last_outcome(), Some(UiState::Success));
        c.tick_at(Instant::now() + Duration::from_secs(3600));
        assert_eq!(c.surface().message_text(), Some(MSG_UPLOADED));
        assert_idle(&c);
    }

    #[tokio::test]
    async fn file_unreadable_at_send_time_is_reported_by_path() {
        let mut c = controller(Script::Vanished);
        c.on_file_selected(Some(report_pdf()));
        c.submit().await;

        assert_eq!(
            c.surface().message_text(),
            Some("Could not read file: /tmp/vanished.pdf")
        );
        assert_eq!(c.last_outcome(), Some(UiState::Error));
        assert!(c.selection().is_none());
        assert_eq!(c.surface().file_label, FILE_PLACEHOLDER);
        assert_idle(&c);
    }

    #[test]
    fn hide_operations_are_idempotent() {
        let mut c = controller(report_ok());
        c.hide_message();
        c.hide_message();
        c.hide_metadata();
        c.hide_metadata();
        assert!(c.surface().message.is_none());
        assert!(!c.surface().metadata_visible);
    }

    #[test]
    fn display_metadata_replaces_previous_rows() {
        let mut c = controller(report_ok());
        c.display_metadata(&UploadResponse {
            success: true,
            name: Some("a.txt".into()),
            size: Some(0.5),
            timestamp: Some("t1".into()),
            error: None,
        });
        c.display_metadata(&UploadResponse {
            success: true,
            name: Some("b.txt".into()),
            size: Some(12.25),
            timestamp: Some("t2".into()),
            error: None,
        });
        let rows = &c.surface().metadata_rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], MetadataRow::new("File Name", "b.txt"));
        assert_eq!(rows[1], MetadataRow::new("File Size", "12.25 KB"));
        assert_eq!(rows[2], MetadataRow::new("Upload Time", "t2"));
        assert!(c.surface().metadata_visible);
    }
}
