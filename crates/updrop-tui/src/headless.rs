//! Headless host: one upload from the command line, no terminal UI.
//!
//! Runs the same controller as the TUI against a console surface: messages
//! and the metadata table are written to `out`; the rest of the form is only
//! traced.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, trace, warn};

use updrop_proto::upload::Uploader;

use crate::controller::{UiState, UploadController};
use crate::surface::{MessageKind, MetadataRow, UploadSurface};

pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("console write failed: {}", e);
        }
    }
}

impl<W: Write> UploadSurface for ConsoleSurface<W> {
    fn set_file_label(&mut self, text: &str) {
        trace!("file label: {}", text);
    }

    fn set_has_file(&mut self, _has_file: bool) {}

    fn set_drop_highlight(&mut self, _on: bool) {}

    fn set_submit_enabled(&mut self, enabled: bool) {
        trace!("submit enabled: {}", enabled);
    }

    fn set_submit_text(&mut self, text: &str) {
        debug!("{}", text);
    }

    fn set_spinner_visible(&mut self, _visible: bool) {}

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        let icon = match kind {
            MessageKind::Success => "✓",
            MessageKind::Error => "✗",
        };
        self.line(&format!("{} {}", icon, text));
    }

    fn hide_message(&mut self) {}

    fn set_metadata_rows(&mut self, rows: Vec<MetadataRow>) {
        let width = rows.iter().map(|r| r.property.len()).max().unwrap_or(0);
        for row in rows {
            self.line(&format!("  {:<width$}  {}", row.property, row.value));
        }
    }

    fn set_metadata_visible(&mut self, _visible: bool) {}

    fn reset_form(&mut self) {}
}

/// Upload `path` and report on `out`. Returns `true` when the server
/// accepted the file.
pub async fn upload_once<U: Uploader, W: Write>(
    uploader: U,
    path: &Path,
    out: W,
) -> (bool, W) {
    let mut controller =
        UploadController::new(ConsoleSurface::new(out), uploader, Duration::ZERO);
    controller.select_path(&path.to_string_lossy());
    controller.submit().await;
    let accepted = controller.last_outcome() == Some(UiState::Success);
    (accepted, controller.into_surface().into_inner())
}
