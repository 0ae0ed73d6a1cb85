//! Action enum: everything the form can ask the app to do.

use std::path::PathBuf;

/// Components produce Actions; the App dispatches them to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Picker ───────────────────────────────────────────────────────────────
    /// Path typed into the picker and confirmed.
    CommitPath(String),

    // ── Drop target ──────────────────────────────────────────────────────────
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),

    // ── Form ─────────────────────────────────────────────────────────────────
    Submit,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
