//! FormState: the on-screen upload form, as plain data.
//!
//! The controller writes to it through `UploadSurface`; components only read
//! it while drawing.

use crate::surface::{
    MessageKind, MetadataRow, UploadSurface, FILE_PLACEHOLDER, SUBMIT_IDLE_TEXT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub file_label: String,
    pub has_file: bool,
    pub drop_highlight: bool,

    pub submit_enabled: bool,
    pub submit_text: String,
    pub spinner_visible: bool,
    /// Advanced on every UI tick while the spinner is shown.
    pub spinner_frame: usize,

    pub message: Option<Message>,

    pub metadata_rows: Vec<MetadataRow>,
    pub metadata_visible: bool,

    /// Bumped on every form reset; the path input clears itself when it
    /// sees a new value.
    pub reset_generation: u64,

    /// Endpoint shown in the header.
    pub endpoint: String,
}

impl FormState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            file_label: FILE_PLACEHOLDER.to_string(),
            has_file: false,
            drop_highlight: false,
            submit_enabled: true,
            submit_text: SUBMIT_IDLE_TEXT.to_string(),
            spinner_visible: false,
            spinner_frame: 0,
            message: None,
            metadata_rows: Vec::new(),
            metadata_visible: false,
            reset_generation: 0,
            endpoint: endpoint.into(),
        }
    }

    pub fn advance_spinner(&mut self) {
        if self.spinner_visible {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    #[cfg(test)]
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl UploadSurface for FormState {
    fn set_file_label(&mut self, text: &str) {
        self.file_label = text.to_string();
    }

    fn set_has_file(&mut self, has_file: bool) {
        self.has_file = has_file;
    }

    fn set_drop_highlight(&mut self, on: bool) {
        self.drop_highlight = on;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_submit_text(&mut self, text: &str) {
        self.submit_text = text.to_string();
    }

    fn set_spinner_visible(&mut self, visible: bool) {
        self.spinner_visible = visible;
        if !visible {
            self.spinner_frame = 0;
        }
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message = Some(Message {
            text: text.to_string(),
            kind,
        });
    }

    fn hide_message(&mut self) {
        self.message = None;
    }

    fn set_metadata_rows(&mut self, rows: Vec<MetadataRow>) {
        self.metadata_rows = rows;
    }

    fn set_metadata_visible(&mut self, visible: bool) {
        self.metadata_visible = visible;
    }

    fn reset_form(&mut self) {
        self.reset_generation = self.reset_generation.wrapping_add(1);
    }
}
