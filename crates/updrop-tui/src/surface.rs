//! UploadSurface: the UI elements the upload controller binds to.
//!
//! The controller never looks anything up; whoever constructs it hands over
//! one surface, and every visible change goes through these methods.

/// Label text shown while no file is selected.
pub const FILE_PLACEHOLDER: &str = "Choose a file...";
/// Submit control label when idle.
pub const SUBMIT_IDLE_TEXT: &str = "Upload File";
/// Submit control label while a request is in flight.
pub const SUBMIT_BUSY_TEXT: &str = "Uploading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// One row of the metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub property: &'static str,
    pub value: String,
}

impl MetadataRow {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

pub trait UploadSurface {
    /// Text of the file-name label.
    fn set_file_label(&mut self, text: &str);
    /// "Has file" visual flag on the drop target.
    fn set_has_file(&mut self, has_file: bool);
    /// Drag-over highlight on the drop target.
    fn set_drop_highlight(&mut self, on: bool);

    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_submit_text(&mut self, text: &str);
    fn set_spinner_visible(&mut self, visible: bool);

    fn show_message(&mut self, text: &str, kind: MessageKind);
    fn hide_message(&mut self);

    /// Replace the table body with `rows`.
    fn set_metadata_rows(&mut self, rows: Vec<MetadataRow>);
    fn set_metadata_visible(&mut self, visible: bool);

    /// Clear the picker's own input, like a native form reset.
    fn reset_form(&mut self);
}
